//! CoWIN HTTP Client Abstractions
//!
//! HTTPクライアントの抽象化と実装

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Duration;
use url::Url;

#[cfg(test)]
use mockall::automock;

use super::errors::FetchError;
use crate::adapter::config::Config;
use crate::domain::services::slot_filter::format_upstream_date;

/// Trait for plain GET requests against the upstream API
/// This enables mocking in tests while using reqwest in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// GET the url and return the body of a success response
    async fn get_text(&self, url: Url) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher carrying the headers the public API expects
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(user_agent: &str, accept_language: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(accept_language)
                .map_err(|e| FetchError::InvalidHeader(format!("Accept-Language: {e}")))?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| FetchError::InvalidHeader(format!("User-Agent: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(
            &config.user_agent,
            &config.accept_language,
            config.request_timeout(),
        )
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        let url_str = url.to_string();
        debug!("GET {}", url_str);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&url_str, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url_str,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(&url_str, &e))
    }
}

/// Builds the two upstream endpoint urls from the configured base
#[derive(Debug, Clone)]
pub struct CowinEndpoints {
    base: Url,
}

impl CowinEndpoints {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        // Url::join drops the last path segment unless the base ends with '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base =
            Url::parse(&normalized).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self { base })
    }

    /// `{base}/admin/location/districts/{state_id}`
    pub fn districts(&self, state_id: u32) -> Result<Url, FetchError> {
        self.join(&format!("admin/location/districts/{}", state_id))
    }

    /// `{base}/appointment/sessions/public/calendarByDistrict?district_id={id}&date={DD-MM-YYYY}`
    pub fn calendar_by_district(&self, district_id: u32, date: NaiveDate) -> Result<Url, FetchError> {
        let mut url = self.join("appointment/sessions/public/calendarByDistrict")?;
        url.query_pairs_mut()
            .append_pair("district_id", &district_id.to_string())
            .append_pair("date", &format_upstream_date(date));
        Ok(url)
    }

    fn join(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{path}: {e}")))
    }
}
