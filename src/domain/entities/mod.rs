//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **State / District / RegionSelector**: 地域の階層と検索対象の指定
//! - **Center / Session**: 接種会場と、その会場で提供される接種枠
//! - **SlotRecord / AvailabilityReport**: 集計結果の行とレポート

pub mod center;
pub mod region;
pub mod slot_record;
