//! # Dispatch Submission Use Case
//!
//! 送信モードの選択と受付への送信

use log::info;
use std::sync::Arc;

use crate::application::dto::poll_config::PollConfig;
use crate::application::error::ProcessError;
use crate::application::use_cases::poll_completion::CompletionPoller;
use crate::domain::entities::process_result::ProcessResult;
use crate::domain::entities::submission::{SubmissionHandle, SubmissionRequest};
use crate::domain::repositories::processing_repository::ProcessingRepository;
use crate::domain::services::cycle_guard::CycleToken;

/// 送信の進捗を受け取るオブザーバー
pub trait DispatchObserver: Send + Sync {
    /// バッチジョブが受理された
    fn on_job_accepted(&self, _handle: &SubmissionHandle) {}

    /// ステータス確認を行った（1始まり）
    fn on_poll_attempt(&self, _attempt: u32) {}
}

/// 何もしないオブザーバー
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}

/// 送信ディスパッチャー
///
/// バッチCSVは受付 → ポーリング、単一リンクは受付のみで結果を得る
pub struct SubmissionDispatcher<R: ProcessingRepository> {
    repository: Arc<R>,
    poller: CompletionPoller<R>,
}

impl<R: ProcessingRepository> SubmissionDispatcher<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `repository` - 処理リポジトリ
    /// * `poll_config` - バッチ完了ポーリングの設定
    pub fn new(repository: Arc<R>, poll_config: PollConfig) -> Self {
        let poller = CompletionPoller::new(Arc::clone(&repository), poll_config);
        Self { repository, poller }
    }

    /// 送信して結果を得る
    ///
    /// # Arguments
    ///
    /// * `request` - 送信要求
    /// * `token` - このサイクルのトークン
    /// * `observer` - 進捗の通知先
    ///
    /// # Returns
    ///
    /// バッチなら `csv_link` のみ、単一なら `pdf_link` のみを持つ結果
    ///
    /// # Errors
    ///
    /// 受付の失敗は `Submission`、ポーリングの失敗は `CompletionPoller` のエラーを返す
    pub async fn execute(
        &self,
        request: &SubmissionRequest,
        token: &CycleToken,
        observer: &dyn DispatchObserver,
    ) -> Result<ProcessResult, ProcessError> {
        match request {
            SubmissionRequest::BatchFile(file) => {
                info!(
                    "Submitting batch file {} ({} bytes)",
                    file.file_name(),
                    file.len()
                );
                let handle = self
                    .repository
                    .submit_batch(file)
                    .await
                    .map_err(ProcessError::submission)?;
                info!("Batch accepted as job {}", handle);
                observer.on_job_accepted(&handle);

                let location = self.poller.execute(&handle, token, observer).await?;
                Ok(ProcessResult::batch(location))
            }
            SubmissionRequest::SingleReference(link) => {
                info!("Submitting single reference {}", link);
                let location = self
                    .repository
                    .submit_single(link)
                    .await
                    .map_err(ProcessError::submission)?;
                Ok(ProcessResult::single(location))
            }
        }
    }
}
