//! # List Districts Use Case
//!
//! 州の地区一覧取得ユースケース

use log::{info, warn};
use std::sync::Arc;

use crate::domain::entities::region::District;
use crate::domain::repositories::location_repository::LocationRepository;

/// 地区一覧取得ユースケース（District Resolution Helper）
///
/// 失敗しても例外を投げず、ログを出して空の一覧を返す
pub struct ListDistrictsUseCase<L: LocationRepository> {
    location_repository: Arc<L>,
}

impl<L: LocationRepository> ListDistrictsUseCase<L> {
    /// 新しいユースケースを作成
    pub fn new(location_repository: Arc<L>) -> Self {
        Self {
            location_repository,
        }
    }

    /// 州の地区一覧を取得する
    ///
    /// # Arguments
    ///
    /// * `state_id` - 州ID
    ///
    /// # Returns
    ///
    /// 上流サービスの応答順の地区一覧。失敗時は空
    pub async fn execute(&self, state_id: u32) -> Vec<District> {
        match self.location_repository.list_districts(state_id).await {
            Ok(districts) => {
                info!("State {} has {} districts", state_id, districts.len());
                districts
            }
            Err(e) => {
                warn!("Failed to list districts for state {}: {:#}", state_id, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

    struct MockLocationRepository {
        should_succeed: bool,
    }

    #[async_trait]
    impl LocationRepository for MockLocationRepository {
        async fn list_districts(&self, _state_id: u32) -> Result<Vec<District>> {
            if self.should_succeed {
                Ok(vec![District::new(141, "Central Delhi"), District::new(145, "East Delhi")])
            } else {
                anyhow::bail!("HTTP status 401")
            }
        }
    }

    #[tokio::test]
    async fn test_list_districts_success() {
        let mock_repo = Arc::new(MockLocationRepository {
            should_succeed: true,
        });
        let use_case = ListDistrictsUseCase::new(mock_repo);

        let districts = use_case.execute(9).await;

        assert_eq!(districts.len(), 2);
        assert_eq!(districts[0], District::new(141, "Central Delhi"));
        assert_eq!(districts[1].id, 145);
    }

    #[tokio::test]
    async fn test_list_districts_failure_is_empty() {
        let mock_repo = Arc::new(MockLocationRepository {
            should_succeed: false,
        });
        let use_case = ListDistrictsUseCase::new(mock_repo);

        let districts = use_case.execute(9).await;

        assert!(districts.is_empty());
    }
}
