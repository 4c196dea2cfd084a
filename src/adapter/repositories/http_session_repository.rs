//! HTTP Session Repository Implementation
//!
//! SessionRepositoryのCoWIN API実装（キャッシュしない）

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::adapter::cowin::client::{CowinEndpoints, HttpFetcher};
use crate::adapter::cowin::errors::FetchError;
use crate::adapter::cowin::models::CalendarResponse;
use crate::domain::entities::center::Center;
use crate::domain::repositories::session_repository::SessionRepository;

/// CoWIN APIベースのセッションリポジトリ
pub struct HttpSessionRepository {
    fetcher: Arc<dyn HttpFetcher>,
    endpoints: CowinEndpoints,
}

impl HttpSessionRepository {
    /// 新しいリポジトリを作成
    pub fn new(fetcher: Arc<dyn HttpFetcher>, endpoints: CowinEndpoints) -> Self {
        Self { fetcher, endpoints }
    }

    fn parse_centers(url: &str, body: &str) -> Result<Vec<Center>, FetchError> {
        let response: CalendarResponse =
            serde_json::from_str(body).map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })?;

        Ok(response.centers.into_iter().map(Center::from).collect())
    }
}

#[async_trait]
impl SessionRepository for HttpSessionRepository {
    async fn find_centers(&self, district_id: u32, date: NaiveDate) -> Result<Vec<Center>> {
        let url = self.endpoints.calendar_by_district(district_id, date)?;
        let url_str = url.to_string();

        let body = self
            .fetcher
            .get_text(url)
            .await
            .with_context(|| format!("Failed to fetch sessions for district {}", district_id))?;

        Ok(Self::parse_centers(&url_str, &body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::cowin::client::MockHttpFetcher;

    fn create_repository(mock: MockHttpFetcher) -> HttpSessionRepository {
        let endpoints = CowinEndpoints::new("https://cdn-api.co-vin.in/api/v2/").unwrap();
        HttpSessionRepository::new(Arc::new(mock), endpoints)
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_find_centers_success() {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get_text()
            .withf(|url| url.query() == Some("district_id=188&date=01-06-2021"))
            .times(1)
            .returning(|_| {
                Ok(r#"{"centers":[{
                    "name":"PHC Sohna",
                    "district_name":"Gurgaon",
                    "pincode":122103,
                    "address":"Sohna",
                    "fee_type":"Free",
                    "sessions":[
                        {"date":"01-06-2021","min_age_limit":45,"available_capacity":5,"vaccine":"COVISHIELD"},
                        {"date":"02-06-2021","min_age_limit":18,"available_capacity":0,"vaccine":"COVAXIN"}
                    ]
                }]}"#
                    .to_string())
            });
        let repository = create_repository(mock);

        let centers = repository.find_centers(188, june_first()).await.unwrap();

        assert_eq!(centers.len(), 1);
        assert_eq!(centers[0].name, "PHC Sohna");
        assert_eq!(centers[0].pincode, "122103");
        assert_eq!(centers[0].sessions.len(), 2);
        assert_eq!(centers[0].sessions[1].vaccine, "COVAXIN");
    }

    #[tokio::test]
    async fn test_find_centers_empty_response() {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get_text()
            .returning(|_| Ok(r#"{"centers":[]}"#.to_string()));
        let repository = create_repository(mock);

        let centers = repository.find_centers(188, june_first()).await.unwrap();

        assert!(centers.is_empty());
    }

    #[tokio::test]
    async fn test_find_centers_timeout() {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get_text().returning(|url| {
            Err(FetchError::Timeout {
                url: url.to_string(),
            })
        });
        let repository = create_repository(mock);

        let err = repository.find_centers(188, june_first()).await.unwrap_err();

        assert!(err.to_string().contains("district 188"));
        let fetch_error = err.downcast_ref::<FetchError>().unwrap();
        assert!(fetch_error.is_timeout());
    }

    #[tokio::test]
    async fn test_find_centers_malformed_body() {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get_text()
            .returning(|_| Ok(r#"{"centers": "unavailable"}"#.to_string()));
        let repository = create_repository(mock);

        let result = repository.find_centers(188, june_first()).await;

        assert!(result.is_err());
    }
}
