//! # Domain Layer
//!
//! このモジュールはワクチン接種枠検索の核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（HTTPやファイルシステムについて何も知らない）
//! - フレームワークに依存しない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（District, Center, SlotRecordなど）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（接種枠のフィルタリング規則）

pub mod entities;
pub mod repositories;
pub mod services;
