//! # Notify Completion Use Case
//!
//! バッチ完了時のベストエフォート通知

use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::application::dto::alert_config::AlertConfig;
use crate::domain::entities::process_result::ProcessResult;
use crate::domain::repositories::alert_channel::{NotificationChannel, ToneChannel};

/// 完了通知ユースケース
///
/// バッチ結果のリンクが新しく現れたときに一度だけ通知する。
/// 同じ結果を何度観測しても再通知しない。空の結果を観測するとリセットされる。
/// 単一送信の結果（`pdf_link` のみ）は通知しない。
///
/// 各チャネルの失敗はログに残すだけで、呼び出し側には伝播しない。
pub struct CompletionNotifier {
    notification: Option<Arc<dyn NotificationChannel>>,
    tone: Option<Arc<dyn ToneChannel>>,
    config: AlertConfig,
    permission_requested: AtomicBool,
    last_alerted: Mutex<Option<String>>,
}

impl CompletionNotifier {
    /// チャネルを持たない通知ユースケースを作成
    pub fn new(config: AlertConfig) -> Self {
        Self {
            notification: None,
            tone: None,
            config,
            permission_requested: AtomicBool::new(false),
            last_alerted: Mutex::new(None),
        }
    }

    pub fn with_notification(mut self, channel: Arc<dyn NotificationChannel>) -> Self {
        self.notification = Some(channel);
        self
    }

    pub fn with_tone(mut self, channel: Arc<dyn ToneChannel>) -> Self {
        self.tone = Some(channel);
        self
    }

    /// 通知の許可を要求する
    ///
    /// プロセス開始時に呼ぶ。2回目以降は何もしない。
    pub async fn prepare(&self) {
        if self.permission_requested.swap(true, Ordering::SeqCst) {
            return;
        }
        let Some(channel) = &self.notification else {
            return;
        };

        match channel.request_permission().await {
            Ok(state) => info!("Notification permission: {:?}", state),
            Err(e) => warn!("Notification permission request failed: {:#}", e),
        }
    }

    /// 結果を観測する
    ///
    /// # Returns
    ///
    /// 今回の観測で通知を発火した場合に `true`
    pub async fn observe(&self, result: &ProcessResult) -> bool {
        let Some(location) = result.batch_location() else {
            *self.last_alerted() = None;
            return false;
        };

        {
            let mut last = self.last_alerted();
            if last.as_deref() == Some(location) {
                debug!("Completion already alerted for {}", location);
                return false;
            }
            *last = Some(location.to_string());
        }

        self.alert().await;
        true
    }

    fn last_alerted(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.last_alerted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    async fn alert(&self) {
        if let Some(channel) = &self.notification {
            if channel.permission().is_granted() {
                if let Err(e) = channel.show(&self.config.title, &self.config.body).await {
                    warn!("Completion notification failed: {:#}", e);
                }
            } else {
                debug!("Notification permission not granted, skipping notification");
            }
        }

        if let Some(tone) = &self.tone {
            if let Err(e) = tone.play(self.config.tone_duration).await {
                warn!("Completion tone failed: {:#}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{RecordingNotification, RecordingTone};
    use std::time::Duration;

    fn notifier_with(
        notification: Arc<RecordingNotification>,
        tone: Arc<RecordingTone>,
    ) -> CompletionNotifier {
        CompletionNotifier::new(AlertConfig::default())
            .with_notification(notification)
            .with_tone(tone)
    }

    #[tokio::test]
    async fn test_observe_batch_result_fires_both_channels() {
        let notification = Arc::new(RecordingNotification::granted());
        let tone = Arc::new(RecordingTone::new());
        let notifier = notifier_with(notification.clone(), tone.clone());

        let fired = notifier
            .observe(&ProcessResult::batch("https://drive.example/out.csv"))
            .await;

        assert!(fired);
        assert_eq!(
            notification.shown(),
            vec![(
                "CSV Processing Complete".to_string(),
                "Your CSV is ready to view".to_string()
            )]
        );
        assert_eq!(tone.plays(), 1);
        assert_eq!(tone.last_duration(), Some(Duration::from_millis(200)));
    }

    #[tokio::test]
    async fn test_observe_same_result_twice_fires_once() {
        let notification = Arc::new(RecordingNotification::granted());
        let tone = Arc::new(RecordingTone::new());
        let notifier = notifier_with(notification.clone(), tone.clone());
        let result = ProcessResult::batch("https://drive.example/out.csv");

        assert!(notifier.observe(&result).await);
        assert!(!notifier.observe(&result).await);
        assert!(!notifier.observe(&result.clone()).await);

        assert_eq!(notification.shown().len(), 1);
        assert_eq!(tone.plays(), 1);
    }

    #[tokio::test]
    async fn test_observe_after_reset_fires_again() {
        let notification = Arc::new(RecordingNotification::granted());
        let tone = Arc::new(RecordingTone::new());
        let notifier = notifier_with(notification.clone(), tone.clone());
        let result = ProcessResult::batch("https://drive.example/out.csv");

        notifier.observe(&result).await;
        // 新しいサイクルの開始で結果が空になる
        notifier.observe(&ProcessResult::empty()).await;
        let fired = notifier.observe(&result).await;

        assert!(fired);
        assert_eq!(tone.plays(), 2);
    }

    #[tokio::test]
    async fn test_observe_distinct_results_fire_each() {
        let tone = Arc::new(RecordingTone::new());
        let notifier = CompletionNotifier::new(AlertConfig::default()).with_tone(tone.clone());

        notifier.observe(&ProcessResult::batch("https://x/1.csv")).await;
        notifier.observe(&ProcessResult::batch("https://x/2.csv")).await;

        assert_eq!(tone.plays(), 2);
    }

    #[tokio::test]
    async fn test_single_result_does_not_fire() {
        let notification = Arc::new(RecordingNotification::granted());
        let tone = Arc::new(RecordingTone::new());
        let notifier = notifier_with(notification.clone(), tone.clone());

        let fired = notifier
            .observe(&ProcessResult::single("https://drive.example/result1.pdf"))
            .await;

        assert!(!fired);
        assert!(notification.shown().is_empty());
        assert_eq!(tone.plays(), 0);
    }

    #[tokio::test]
    async fn test_permission_not_granted_still_plays_tone() {
        let notification = Arc::new(RecordingNotification::denied());
        let tone = Arc::new(RecordingTone::new());
        let notifier = notifier_with(notification.clone(), tone.clone());

        notifier.prepare().await;
        let fired = notifier.observe(&ProcessResult::batch("https://x/out.csv")).await;

        assert!(fired);
        assert!(notification.shown().is_empty());
        assert_eq!(tone.plays(), 1);
    }

    #[tokio::test]
    async fn test_channel_failures_are_swallowed() {
        let notification = Arc::new(RecordingNotification::failing());
        let tone = Arc::new(RecordingTone::failing());
        let notifier = notifier_with(notification.clone(), tone.clone());

        let fired = notifier.observe(&ProcessResult::batch("https://x/out.csv")).await;

        assert!(fired);
        assert_eq!(tone.plays(), 1);
        // 失敗しても同じ結果では再通知しない
        assert!(!notifier.observe(&ProcessResult::batch("https://x/out.csv")).await);
    }

    #[tokio::test]
    async fn test_prepare_requests_permission_once() {
        let notification = Arc::new(RecordingNotification::grant_on_request());
        let notifier = CompletionNotifier::new(AlertConfig::default())
            .with_notification(notification.clone());

        notifier.prepare().await;
        notifier.prepare().await;

        assert_eq!(notification.permission_requests(), 1);
        assert!(notification.permission().is_granted());
    }

    #[tokio::test]
    async fn test_no_channels() {
        let notifier = CompletionNotifier::new(AlertConfig::default());

        notifier.prepare().await;
        assert!(notifier.observe(&ProcessResult::batch("https://x/out.csv")).await);
    }
}
