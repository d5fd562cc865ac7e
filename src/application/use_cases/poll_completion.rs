//! # Poll Completion Use Case
//!
//! バッチジョブの完了ポーリング

use log::{debug, info, warn};
use std::sync::Arc;
use tokio::time::sleep;

use crate::application::dto::poll_config::{PollConfig, StatusErrorPolicy};
use crate::application::error::ProcessError;
use crate::application::use_cases::dispatch_submission::DispatchObserver;
use crate::domain::entities::processing_status::Completion;
use crate::domain::entities::submission::SubmissionHandle;
use crate::domain::repositories::processing_repository::ProcessingRepository;
use crate::domain::services::cycle_guard::CycleToken;

/// 完了ポーリングユースケース
///
/// 固定間隔で待ってからステータスを確認し、完了条件を満たすまで繰り返す。
/// バックオフはしない。上限は `PollConfig::max_attempts` のみ。
pub struct CompletionPoller<R: ProcessingRepository> {
    repository: Arc<R>,
    config: PollConfig,
}

impl<R: ProcessingRepository> CompletionPoller<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `repository` - 処理リポジトリ
    /// * `config` - ポーリング設定
    pub fn new(repository: Arc<R>, config: PollConfig) -> Self {
        Self { repository, config }
    }

    /// ジョブが完了するまで待ち、結果URLを返す
    ///
    /// # Arguments
    ///
    /// * `handle` - ジョブハンドル
    /// * `token` - このサイクルのトークン（置き換えられたら停止する）
    /// * `observer` - 確認回数の通知先
    ///
    /// # Errors
    ///
    /// - `Superseded`: 新しいサイクルが開始された
    /// - `Polling`: ステータス確認に失敗した（`StatusErrorPolicy::Fatal` の場合）
    /// - `PollLimitExceeded`: 最大確認回数に達した
    pub async fn execute(
        &self,
        handle: &SubmissionHandle,
        token: &CycleToken,
        observer: &dyn DispatchObserver,
    ) -> Result<String, ProcessError> {
        let mut attempts: u32 = 0;

        loop {
            if self.config.attempts_exhausted(attempts) {
                warn!("Job {} not done after {} status checks", handle, attempts);
                return Err(ProcessError::PollLimitExceeded { attempts });
            }
            if !token.is_current() {
                debug!("Polling for job {} stopped: cycle superseded", handle);
                return Err(ProcessError::Superseded);
            }

            sleep(self.config.interval).await;

            if !token.is_current() {
                debug!("Polling for job {} stopped: cycle superseded", handle);
                return Err(ProcessError::Superseded);
            }

            attempts += 1;
            observer.on_poll_attempt(attempts);

            match self.repository.check_status(handle).await {
                Ok(report) => match report.completion() {
                    Completion::Ready(location) => {
                        info!(
                            "Job {} done after {} status checks: {}",
                            handle, attempts, location
                        );
                        return Ok(location.to_string());
                    }
                    Completion::Pending(Some(status)) if status.is_terminal_marker() => {
                        warn!(
                            "Job {} reported {} without a result location (attempt {}, HTTP {})",
                            handle, status, attempts, report.http_status
                        );
                    }
                    Completion::Pending(status) => {
                        debug!(
                            "Job {} pending (attempt {}, HTTP {}, status {})",
                            handle,
                            attempts,
                            report.http_status,
                            status.map(|s| s.as_str()).unwrap_or("-")
                        );
                    }
                },
                Err(e) => match self.config.status_error_policy {
                    StatusErrorPolicy::Fatal => return Err(ProcessError::polling(e)),
                    StatusErrorPolicy::TreatAsPending => {
                        warn!(
                            "Status check for job {} failed (attempt {}), still waiting: {:#}",
                            handle, attempts, e
                        );
                    }
                },
            }
        }
    }
}
