//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{bail, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::application::dto::alert_config::{AlertConfig, DEFAULT_TONE_DURATION_MS};
use crate::application::dto::poll_config::{PollConfig, StatusErrorPolicy, DEFAULT_POLL_INTERVAL_MS};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: Option<u32>,
    pub status_errors_as_pending: bool,

    // Alerts
    pub enable_notifications: bool,
    pub enable_sound: bool,
    pub tone_duration_ms: u64,

    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_poll_attempts: None,
            status_errors_as_pending: false,
            enable_notifications: true,
            enable_sound: true,
            tone_duration_ms: DEFAULT_TONE_DURATION_MS,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(path);
        let content = std::fs::read_to_string(&*expanded_path)
            .with_context(|| format!("Failed to read config file {}", expanded_path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", expanded_path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", expanded_path))?;
        Ok(config)
    }

    /// 値の範囲を確認する
    pub fn validate(&self) -> Result<()> {
        // 0 だと待ち時間なしで確認を繰り返してしまう
        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be at least 1");
        }
        Ok(())
    }

    /// ファイルがなければデフォルト設定を返す
    pub fn load_or_default(path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(path);
        if !Path::new(&*expanded_path).exists() {
            debug!("Config file {} not found, using defaults", expanded_path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn poll_config(&self) -> PollConfig {
        let policy = if self.status_errors_as_pending {
            StatusErrorPolicy::TreatAsPending
        } else {
            StatusErrorPolicy::Fatal
        };
        PollConfig::new(
            Duration::from_millis(self.poll_interval_ms),
            self.max_poll_attempts,
            policy,
        )
    }

    pub fn alert_config(&self) -> AlertConfig {
        AlertConfig::default().with_tone_duration(Duration::from_millis(self.tone_duration_ms))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
