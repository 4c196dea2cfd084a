//! # Vaxslots
//!
//! CoWIN 公開APIから州・地区ごとのワクチン接種枠を集計するツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: 地域・接種枠のエンティティと抽出ルール（外部依存なし）
//! - **Application層**: 集計・地区一覧のユースケース
//! - **Adapter層**: 外部システムとの統合（CoWIN API, 設定ファイル, キャッシュ）
//! - **Driver層**: CLI、出力、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
