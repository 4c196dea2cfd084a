//! CoWIN API Adapter Modules
//!
//! CoWIN公開APIとの通信のためのアダプターモジュール

pub mod client;
pub mod errors;
pub mod models;
