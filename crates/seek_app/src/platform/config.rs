use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use seek_client::ServiceSettings;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "shallowseek.ron";
/// Overrides `base_url` when set and non-empty.
pub const BASE_URL_ENV: &str = "SHALLOWSEEK_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub toast_ms: u64,
    pub results_path: PathBuf,
    pub log: LogDestination,
    pub log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let service = ServiceSettings::default();
        Self {
            base_url: service.base_url,
            connect_timeout_ms: service.connect_timeout.as_millis() as u64,
            request_timeout_ms: service.request_timeout.as_millis() as u64,
            toast_ms: seek_core::DEFAULT_TOAST_TTL.as_millis() as u64,
            results_path: PathBuf::from("./shallowseek_results.html"),
            log: LogDestination::File,
            log_path: PathBuf::from("./shallowseek.log"),
        }
    }
}

impl AppConfig {
    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    fn with_base_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        self
    }
}

/// Loads the config file, falling back to defaults.
///
/// Logging is not running yet when this is called, so a problem with the
/// file is handed back as text for the caller to log.
pub fn load(path: &Path) -> (AppConfig, Option<String>) {
    let (config, problem) = read_file(path);
    let config = config.with_base_url_override(std::env::var(BASE_URL_ENV).ok());
    (config, problem)
}

fn read_file(path: &Path) -> (AppConfig, Option<String>) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), None);
        }
        Err(err) => {
            return (
                AppConfig::default(),
                Some(format!("Failed to read config from {:?}: {}", path, err)),
            );
        }
    };

    match ron::from_str::<AppConfig>(&content) {
        Ok(config) => (config, None),
        Err(err) => (
            AppConfig::default(),
            Some(format!("Failed to parse config from {:?}: {}", path, err)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_means_defaults() {
        let temp = TempDir::new().unwrap();
        let (config, problem) = read_file(&temp.path().join(CONFIG_FILENAME));

        assert_eq!(config, AppConfig::default());
        assert_eq!(problem, None);
        assert_eq!(config.toast_ttl(), Duration::from_secs(3));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, r#"(base_url: "http://search.local:9000", toast_ms: 5000, log: Both)"#)
            .unwrap();

        let (config, problem) = read_file(&path);
        assert_eq!(problem, None);
        assert_eq!(config.base_url, "http://search.local:9000");
        assert_eq!(config.toast_ttl(), Duration::from_secs(5));
        assert_eq!(config.log, LogDestination::Both);
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[test]
    fn malformed_file_reports_problem() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(base_url: 12").unwrap();

        let (config, problem) = read_file(&path);
        assert_eq!(config, AppConfig::default());
        assert!(problem.unwrap().starts_with("Failed to parse config"));
    }

    #[test]
    fn env_value_overrides_base_url() {
        let config = AppConfig::default().with_base_url_override(Some(" http://other:1 ".into()));
        assert_eq!(config.base_url, "http://other:1");

        let config = AppConfig::default().with_base_url_override(Some("  ".into()));
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn settings_carry_timeouts() {
        let config = AppConfig {
            connect_timeout_ms: 250,
            ..AppConfig::default()
        };
        let settings = config.service_settings();
        assert_eq!(settings.connect_timeout, Duration::from_millis(250));
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }
}
