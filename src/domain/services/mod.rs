//! # Domain Services
//!
//! エンティティをまたぐビジネスルール
//!
//! - **SlotFilterService**: 年齢区分・空き枠・日付による接種枠の抽出

pub mod slot_filter;
