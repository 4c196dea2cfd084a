//! # Center / Session Entities
//!
//! 接種会場と接種枠のドメインエンティティ

use serde::{Deserialize, Serialize};

/// 接種枠
///
/// 会場で提供される1日分の接種枠定義。問い合わせのたびに取得し直す（キャッシュしない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// 接種日（DD-MM-YYYY）
    pub date: String,
    /// 対象年齢区分の下限
    pub min_age_limit: u32,
    /// 残り枠数
    pub available_capacity: i64,
    pub vaccine: String,
}

impl Session {
    /// 空き枠があるかどうか
    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.available_capacity > 0
    }
}

/// 接種会場
///
/// `sessions` は上流サービスの応答順を保持する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Center {
    pub name: String,
    pub pincode: String,
    pub address: String,
    pub fee_type: String,
    pub district_name: String,
    pub sessions: Vec<Session>,
}
