//! # Poll Configuration DTO
//!
//! 完了ポーリングの設定

use std::time::Duration;

/// デフォルトのポーリング間隔（1秒、バックオフなし）
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// ステータス確認で通信エラーが起きたときの扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusErrorPolicy {
    /// サイクル全体を失敗させる
    #[default]
    Fatal,
    /// 「まだ処理中」とみなしてポーリングを続ける
    TreatAsPending,
}

/// ポーリング設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// ステータス確認の間隔（固定）
    pub interval: Duration,
    /// 最大確認回数（`None` なら無制限）
    pub max_attempts: Option<u32>,
    pub status_error_policy: StatusErrorPolicy,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_attempts: None,
            status_error_policy: StatusErrorPolicy::Fatal,
        }
    }
}

impl PollConfig {
    /// 新しいポーリング設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use std::time::Duration;
    /// use cvsubmit::application::dto::poll_config::{PollConfig, StatusErrorPolicy};
    ///
    /// let config = PollConfig::new(Duration::from_secs(1), Some(600), StatusErrorPolicy::Fatal);
    ///
    /// assert!(!config.attempts_exhausted(599));
    /// assert!(config.attempts_exhausted(600));
    /// ```
    pub fn new(
        interval: Duration,
        max_attempts: Option<u32>,
        status_error_policy: StatusErrorPolicy,
    ) -> Self {
        Self {
            interval,
            max_attempts,
            status_error_policy,
        }
    }

    /// 確認回数が上限に達したか
    pub fn attempts_exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}
