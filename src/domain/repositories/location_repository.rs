//! # Location Repository Trait
//!
//! 州から地区一覧への解決を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::region::District;

/// ロケーションリポジトリ（Location Directory）
///
/// 州IDを地区の一覧に解決する
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// 州に属する地区の一覧を取得する
    ///
    /// # Arguments
    ///
    /// * `state_id` - 州ID
    ///
    /// # Returns
    ///
    /// 上流サービスの応答順に並んだ地区の一覧
    ///
    /// # Errors
    ///
    /// 上流サービスが失敗応答を返した場合、または応答を解釈できない場合にエラーを返す
    async fn list_districts(&self, state_id: u32) -> Result<Vec<District>>;
}
