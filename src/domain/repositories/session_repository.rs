//! # Session Repository Trait
//!
//! 地区ごとの接種会場・接種枠の取得を抽象化

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::entities::center::Center;

/// セッションリポジトリ（Upstream Session Service）
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 地区の接種会場を取得する
    ///
    /// 上流サービスは `date` から始まる1週間分の接種枠を返す
    ///
    /// # Arguments
    ///
    /// * `district_id` - 地区ID
    /// * `date` - 検索開始日
    ///
    /// # Errors
    ///
    /// 失敗応答・タイムアウト・不正な応答本文の場合にエラーを返す
    async fn find_centers(&self, district_id: u32, date: NaiveDate) -> Result<Vec<Center>>;
}
