use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/client.json";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "BOOK_AI_API_URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    /// `GET /api/v1/search?query=..&top_k=..`
    Get,
    /// `POST /api/v1/search` with a JSON body.
    Post,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub top_k: usize,
    pub search_method: SearchMethod,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            top_k: 3,
            search_method: SearchMethod::Get,
        }
    }
}

impl AppConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Apply an explicit base URL (env var or CLI flag) over the file value.
    pub fn with_api_url(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url.map(str::trim).filter(|url| !url.is_empty()) {
            self.api_base_url = url.to_string();
        }
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        self.api_base_url = if trimmed.is_empty() {
            DEFAULT_API_URL.to_string()
        } else {
            trimmed.to_string()
        };
        self.top_k = self.top_k.max(1);
        self.timeout_secs = self.timeout_secs.max(1);
        self
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    let config = match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    };
    config.normalized()
}

/// Resolve the effective configuration: file, then `BOOK_AI_API_URL`, then
/// the `--api-url` flag. Clap already folds the env var into `api_url`.
pub fn resolve(path: &str, api_url: Option<&str>) -> AppConfig {
    let config = load_config(path).with_api_url(api_url);
    log::info!(
        "Using backend {} (timeout {}s, top_k {}, {:?} search)",
        config.api_base_url,
        config.timeout_secs,
        config.top_k,
        config.search_method
    );
    config
}

pub fn save_config(path: &str, config: &AppConfig) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let config = load_config(path.to_str().unwrap());
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.search_method, SearchMethod::Get);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        fs::write(
            &path,
            r#"{"api_base_url": "http://books.local:9000/", "search_method": "post"}"#,
        )
        .unwrap();

        let config = load_config(path.to_str().unwrap());
        assert_eq!(config.api_base_url, "http://books.local:9000");
        assert_eq!(config.search_method, SearchMethod::Post);
        assert_eq!(config.top_k, 3);
    }

    #[test]
    fn malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config(path.to_str().unwrap()).api_base_url, DEFAULT_API_URL);
    }

    #[test]
    fn explicit_url_overrides_file() {
        let config = AppConfig::default().with_api_url(Some(" http://10.0.0.2:8000// "));
        assert_eq!(config.api_base_url, "http://10.0.0.2:8000");

        let untouched = AppConfig::default().with_api_url(Some("   "));
        assert_eq!(untouched.api_base_url, DEFAULT_API_URL);
    }

    #[test]
    fn zero_values_are_clamped() {
        let config = AppConfig {
            top_k: 0,
            timeout_secs: 0,
            ..AppConfig::default()
        }
        .with_api_url(None);
        assert_eq!(config.top_k, 1);
        assert_eq!(config.timeout_secs, 1);
    }

    #[test]
    fn saved_config_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("client.json");
        let path = path.to_str().unwrap();
        let config = AppConfig {
            top_k: 5,
            ..AppConfig::default()
        };
        save_config(path, &config).unwrap();
        assert_eq!(load_config(path).top_k, 5);
    }
}
