//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{bail, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::application::use_cases::aggregate_availability::AggregationOptions;
use crate::domain::services::slot_filter::DateFilter;

pub const DEFAULT_BASE_URL: &str = "https://cdn-api.co-vin.in/api/v2/";
// The public API rejects requests without a browser-like user agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_1) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/39.0.2171.95 Safari/537.36";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "hi_IN";
pub const DEFAULT_DISTRICT_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_STATES_PATH: &str = "./metadata/states.json";
pub const DEFAULT_MIN_AGE_BANDS: [u32; 2] = [18, 45];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    pub accept_language: String,
    pub request_timeout_secs: u64,
    pub max_concurrency: usize,
    pub district_cache_ttl_secs: u64,

    // Static state directory
    pub states_path: String,

    // Query rules
    pub min_age_bands: Vec<u32>,
    pub date_filter: DateFilter,
}

impl Default for Config {
    fn default() -> Self {
        // Concurrency and timeout share the aggregator's defaults
        let aggregation = AggregationOptions::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            request_timeout_secs: aggregation.fetch_timeout.as_secs(),
            max_concurrency: aggregation.max_concurrency,
            district_cache_ttl_secs: DEFAULT_DISTRICT_CACHE_TTL_SECS,
            states_path: DEFAULT_STATES_PATH.to_string(),
            min_age_bands: DEFAULT_MIN_AGE_BANDS.to_vec(),
            date_filter: DateFilter::default(),
        }
    }
}

impl Config {
    /// Load and validate a JSON config file. Missing fields fall back to defaults.
    pub fn load(path: &str) -> Result<Self> {
        let path = shellexpand::tilde(path).to_string();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path).to_string();
        if !Path::new(&expanded).exists() {
            info!("No config file at {}, using defaults", expanded);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base_url: {}", self.base_url))?;

        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than 0");
        }
        if self.max_concurrency == 0 {
            bail!("max_concurrency must be greater than 0");
        }
        if self.min_age_bands.is_empty() {
            bail!("min_age_bands must not be empty");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn district_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.district_cache_ttl_secs)
    }

    /// `states_path` with `~` expanded
    pub fn expanded_states_path(&self) -> String {
        shellexpand::tilde(&self.states_path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_age_bands, vec![18, 45]);
        assert_eq!(config.date_filter, DateFilter::Window);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_default_matches_aggregation_defaults() {
        let config = Config::default();
        let options = AggregationOptions::default();

        assert_eq!(config.max_concurrency, options.max_concurrency);
        assert_eq!(config.request_timeout(), options.fetch_timeout);
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        let json = r#"{
            "base_url": "http://127.0.0.1:8080/api/v2/",
            "max_concurrency": 8,
            "date_filter": "exact_date"
        }"#;
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:8080/api/v2/");
        assert_eq!(config.max_concurrency, 8);
        assert_eq!(config.date_filter, DateFilter::ExactDate);
        assert_eq!(config.accept_language, DEFAULT_ACCEPT_LANGUAGE);
        assert_eq!(config.district_cache_ttl_secs, DEFAULT_DISTRICT_CACHE_TTL_SECS);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"max_concurrency": 0}"#).unwrap();

        let err = Config::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("max_concurrency"));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = Config::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let config = Config::load_or_default(path.to_str().unwrap()).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = Config {
            base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_age_bands() {
        let config = Config {
            min_age_bands: vec![],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
