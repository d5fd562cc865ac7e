//! Desktop Notification Channel
//!
//! `notify-send`（Linux）/ `osascript`（macOS）によるシステム通知

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::debug;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::process::Command;

use crate::domain::repositories::alert_channel::{NotificationChannel, PermissionState};

/// 通知を出すコマンドの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierBackend {
    NotifySend,
    AppleScript,
}

impl NotifierBackend {
    /// 実行環境に合わせたバックエンド
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::AppleScript
        } else {
            Self::NotifySend
        }
    }

    pub fn default_program(self) -> &'static str {
        match self {
            Self::NotifySend => "notify-send",
            Self::AppleScript => "osascript",
        }
    }

    /// 通知を表示するためのコマンド引数
    pub fn show_args(self, title: &str, body: &str) -> Vec<String> {
        match self {
            Self::NotifySend => vec![title.to_string(), body.to_string()],
            Self::AppleScript => vec![
                "-e".to_string(),
                format!(
                    "display notification \"{}\" with title \"{}\"",
                    escape_applescript(body),
                    escape_applescript(title)
                ),
            ],
        }
    }
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

const UNKNOWN: u8 = 0;
const GRANTED: u8 = 1;
const DENIED: u8 = 2;

/// デスクトップ通知チャネル
///
/// 通知コマンドが起動できれば許可済みとみなす
pub struct DesktopNotificationChannel {
    backend: NotifierBackend,
    program: String,
    permission: AtomicU8,
}

impl DesktopNotificationChannel {
    pub fn new() -> Self {
        Self::with_backend(NotifierBackend::detect())
    }

    pub fn with_backend(backend: NotifierBackend) -> Self {
        Self::with_program(backend, backend.default_program())
    }

    pub fn with_program(backend: NotifierBackend, program: impl Into<String>) -> Self {
        Self {
            backend,
            program: program.into(),
            permission: AtomicU8::new(UNKNOWN),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for DesktopNotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationChannel for DesktopNotificationChannel {
    async fn request_permission(&self) -> Result<PermissionState> {
        let available = Command::new(&self.program)
            .arg("--version")
            .output()
            .await
            .is_ok();
        if !available {
            debug!("Notification command {} is not available", self.program);
        }

        let state = if available { GRANTED } else { DENIED };
        self.permission.store(state, Ordering::SeqCst);
        Ok(self.permission())
    }

    fn permission(&self) -> PermissionState {
        match self.permission.load(Ordering::SeqCst) {
            GRANTED => PermissionState::Granted,
            DENIED => PermissionState::Denied,
            _ => PermissionState::Default,
        }
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    async fn show(&self, title: &str, body: &str) -> Result<()> {
        let output = Command::new(&self.program)
            .args(self.backend.show_args(title, body))
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{} exited with {}: {}", self.program, output.status, stderr.trim());
        }
        Ok(())
    }
}
