//! # Alert Channel Traits
//!
//! 完了通知に使う外部ケイパビリティ（システム通知・音）を抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 通知の許可状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PermissionState {
    /// まだ確認していない
    #[default]
    Default,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// システム通知チャネル
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// 通知の許可を要求する（プロセス開始時に一度だけ呼ばれる）
    async fn request_permission(&self) -> Result<PermissionState>;

    /// 現在の許可状態
    fn permission(&self) -> PermissionState;

    /// 通知を表示する
    async fn show(&self, title: &str, body: &str) -> Result<()>;
}

/// 短い音を鳴らすチャネル
#[async_trait]
pub trait ToneChannel: Send + Sync {
    /// 音を鳴らし、`duration` 経過後に止める
    async fn play(&self, duration: Duration) -> Result<()>;
}
