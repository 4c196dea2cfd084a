//! # Driver Layer (Presentation)
//!
//! CLIやその他の外部インターフェースを提供
//!
//! ## 特徴
//!
//! - Use Caseを呼び出して検索を起動
//! - 依存性注入（DI）を行い、全てを組み立てる
//! - ユーザーとのインターフェース
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **render**: 表・JSON形式の出力
//! - **workflow**: ワークフロー全体のオーケストレーション

pub mod cli;
pub mod render;
pub mod workflow;

pub use cli::Args;
pub use workflow::AvailabilityWorkflow;
