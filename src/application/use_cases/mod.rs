//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **AggregateAvailabilityUseCase**: 地区ごとの接種枠を集計する
//! - **ListDistrictsUseCase**: 州の地区一覧を取得する（失敗時は空）

pub mod aggregate_availability;
pub mod list_districts;
