//! テスト用の記録チャネル

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::repositories::alert_channel::{NotificationChannel, PermissionState, ToneChannel};

/// 表示した通知を記録するチャネル
pub(crate) struct RecordingNotification {
    permission: Mutex<PermissionState>,
    grant_on_request: bool,
    fail_on_show: bool,
    requests: AtomicU32,
    shown: Mutex<Vec<(String, String)>>,
}

impl RecordingNotification {
    fn build(permission: PermissionState, grant_on_request: bool, fail_on_show: bool) -> Self {
        Self {
            permission: Mutex::new(permission),
            grant_on_request,
            fail_on_show,
            requests: AtomicU32::new(0),
            shown: Mutex::new(Vec::new()),
        }
    }

    /// 許可済み
    pub(crate) fn granted() -> Self {
        Self::build(PermissionState::Granted, true, false)
    }

    /// 要求すると許可される
    pub(crate) fn grant_on_request() -> Self {
        Self::build(PermissionState::Default, true, false)
    }

    /// 要求しても拒否される
    pub(crate) fn denied() -> Self {
        Self::build(PermissionState::Default, false, false)
    }

    /// 許可済みだが表示に失敗する
    pub(crate) fn failing() -> Self {
        Self::build(PermissionState::Granted, true, true)
    }

    pub(crate) fn shown(&self) -> Vec<(String, String)> {
        self.shown.lock().unwrap().clone()
    }

    pub(crate) fn permission_requests(&self) -> u32 {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationChannel for RecordingNotification {
    async fn request_permission(&self) -> Result<PermissionState> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let state = if self.grant_on_request {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        };
        *self.permission.lock().unwrap() = state;
        Ok(state)
    }

    fn permission(&self) -> PermissionState {
        *self.permission.lock().unwrap()
    }

    async fn show(&self, title: &str, body: &str) -> Result<()> {
        if self.fail_on_show {
            anyhow::bail!("notification daemon unavailable");
        }
        self.shown
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}

/// 再生回数を記録するチャネル
pub(crate) struct RecordingTone {
    fail: bool,
    plays: AtomicU32,
    last_duration: Mutex<Option<Duration>>,
}

impl RecordingTone {
    pub(crate) fn new() -> Self {
        Self {
            fail: false,
            plays: AtomicU32::new(0),
            last_duration: Mutex::new(None),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub(crate) fn plays(&self) -> u32 {
        self.plays.load(Ordering::SeqCst)
    }

    pub(crate) fn last_duration(&self) -> Option<Duration> {
        *self.last_duration.lock().unwrap()
    }
}

#[async_trait]
impl ToneChannel for RecordingTone {
    async fn play(&self, duration: Duration) -> Result<()> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        *self.last_duration.lock().unwrap() = Some(duration);
        if self.fail {
            anyhow::bail!("no audio device");
        }
        Ok(())
    }
}
