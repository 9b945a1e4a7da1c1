use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crawler_engine::ApiSettings;
use crawler_logging::{crawler_info, crawler_warn};
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_FILENAME: &str = "crawler.ron";

/// Shell configuration, read from a RON file. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ClientConfig {
    pub api_base_url: String,
    pub poll_interval_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_download_bytes: u64,
    pub output_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_base_url: api.base_url,
            poll_interval_ms: duration_ms(api.poll_interval),
            connect_timeout_ms: duration_ms(api.connect_timeout),
            request_timeout_ms: duration_ms(api.request_timeout),
            max_download_bytes: api.max_download_bytes,
            output_dir: PathBuf::from("output"),
        }
    }
}

impl ClientConfig {
    pub(crate) fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            // A zero period would spin; clamp to 1ms.
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
            max_download_bytes: self.max_download_bytes,
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Loads the config at `path`, falling back to defaults when the file is
/// missing or unreadable.
pub(crate) fn load_config(path: &Path) -> ClientConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            crawler_info!("No config at {:?}; using defaults", path);
            return ClientConfig::default();
        }
        Err(err) => {
            crawler_warn!("Failed to read config from {:?}: {}", path, err);
            return ClientConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            crawler_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            crawler_warn!("Failed to parse config from {:?}: {}", path, err);
            ClientConfig::default()
        }
    }
}
