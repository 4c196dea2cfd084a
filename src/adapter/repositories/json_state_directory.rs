//! JSON State Directory Implementation
//!
//! StateDirectoryのJSON実装（起動時に一度だけ州一覧を読み込む）

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::entities::region::State;
use crate::domain::repositories::state_directory::StateDirectory;

/// JSONファイルベースの州ディレクトリ
#[derive(Debug, Clone)]
pub struct JsonStateDirectory {
    states: Vec<State>,
}

/// 州ディレクトリファイル（JSON永続化用の内部表現）
#[derive(Debug, Deserialize)]
struct StatesFileJson {
    states: Vec<StateJson>,
}

#[derive(Debug, Deserialize)]
struct StateJson {
    state_id: u32,
    state_name: String,
}

impl JsonStateDirectory {
    /// 読み込み済みの州一覧から作成
    pub fn new(states: Vec<State>) -> Self {
        Self { states }
    }

    /// ファイルから州ディレクトリを読み込む
    ///
    /// # Errors
    ///
    /// ファイルの読み込み、またはJSONのパースに失敗した場合にエラーを返す
    pub async fn load(path: &str) -> Result<Self> {
        let path = shellexpand::tilde(path).to_string();
        let states = tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(Self::new(states))
    }

    /// ファイルから州一覧を読み込む（同期処理）
    fn load_sync(path: &str) -> Result<Vec<State>> {
        let content = fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read state directory file: {}", path))?;

        let file: StatesFileJson =
            serde_json::from_str(&content).context("Failed to parse state directory JSON")?;

        info!("Loaded {} states from {}", file.states.len(), path);

        Ok(file.states.into_iter().map(Self::to_domain_state).collect())
    }

    /// JSON形式からDomain形式に変換
    fn to_domain_state(json_state: StateJson) -> State {
        State {
            state_id: json_state.state_id,
            state_name: json_state.state_name,
        }
    }
}

impl StateDirectory for JsonStateDirectory {
    fn states(&self) -> &[State] {
        &self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_sync_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        let json = r#"{
            "states": [
                {"state_id": 1, "state_name": "Andaman and Nicobar Islands"},
                {"state_id": 12, "state_name": "Haryana"}
            ],
            "ttl": 24
        }"#;
        file.write_all(json.as_bytes()).unwrap();

        let states = JsonStateDirectory::load_sync(file.path().to_str().unwrap()).unwrap();

        assert_eq!(states.len(), 2);
        assert_eq!(states[1].state_id, 12);
        assert_eq!(states[1].state_name, "Haryana");
    }

    #[test]
    fn test_load_sync_missing_file() {
        let result = JsonStateDirectory::load_sync("/nonexistent/path/states.json");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to read state directory file"));
    }

    #[test]
    fn test_load_sync_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"states": {}}"#).unwrap();

        let result = JsonStateDirectory::load_sync(file.path().to_str().unwrap());

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_async() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"states": [{"state_id": 9, "state_name": "Delhi"}]}"#)
            .unwrap();

        let directory = JsonStateDirectory::load(file.path().to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(directory.state_name(9), Some("Delhi"));
        assert_eq!(directory.states().len(), 1);
    }
}
