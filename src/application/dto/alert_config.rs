//! # Alert Configuration DTO
//!
//! 完了通知の内容

use std::time::Duration;

pub const COMPLETION_TITLE: &str = "CSV Processing Complete";
pub const COMPLETION_BODY: &str = "Your CSV is ready to view";
pub const DEFAULT_TONE_DURATION_MS: u64 = 200;

/// 完了通知の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertConfig {
    pub title: String,
    pub body: String,
    /// 音を鳴らす長さ（経過後に自動停止）
    pub tone_duration: Duration,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            title: COMPLETION_TITLE.to_string(),
            body: COMPLETION_BODY.to_string(),
            tone_duration: Duration::from_millis(DEFAULT_TONE_DURATION_MS),
        }
    }
}

impl AlertConfig {
    pub fn with_tone_duration(mut self, tone_duration: Duration) -> Self {
        self.tone_duration = tone_duration;
        self
    }
}
