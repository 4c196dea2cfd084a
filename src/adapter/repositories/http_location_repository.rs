//! HTTP Location Repository Implementation
//!
//! LocationRepositoryのCoWIN API実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::adapter::cowin::client::{CowinEndpoints, HttpFetcher};
use crate::adapter::cowin::errors::FetchError;
use crate::adapter::cowin::models::DistrictsResponse;
use crate::domain::entities::region::District;
use crate::domain::repositories::location_repository::LocationRepository;

/// CoWIN APIベースのロケーションリポジトリ
pub struct HttpLocationRepository {
    fetcher: Arc<dyn HttpFetcher>,
    endpoints: CowinEndpoints,
}

impl HttpLocationRepository {
    /// 新しいリポジトリを作成
    pub fn new(fetcher: Arc<dyn HttpFetcher>, endpoints: CowinEndpoints) -> Self {
        Self { fetcher, endpoints }
    }

    /// 応答本文を地区一覧に変換
    fn parse_districts(url: &str, body: &str) -> Result<Vec<District>, FetchError> {
        let response: DistrictsResponse =
            serde_json::from_str(body).map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })?;

        Ok(response.districts.into_iter().map(District::from).collect())
    }
}

#[async_trait]
impl LocationRepository for HttpLocationRepository {
    async fn list_districts(&self, state_id: u32) -> Result<Vec<District>> {
        let url = self.endpoints.districts(state_id)?;
        let url_str = url.to_string();

        let body = self
            .fetcher
            .get_text(url)
            .await
            .with_context(|| format!("Failed to fetch districts for state {}", state_id))?;

        let districts = Self::parse_districts(&url_str, &body)?;
        info!("Fetched {} districts for state {}", districts.len(), state_id);

        Ok(districts)
    }
}
