//! Adapter Layer
//!
//! 外部システム（CoWIN公開API, 設定ファイル, 静的な州ディレクトリ）との統合

pub mod config;
pub mod cowin;
pub mod repositories;
