//! # Process Cycle Use Case
//!
//! 送信サイクル全体のオーケストレーション
//!
//! 状態（`CycleSnapshot`）の唯一の書き手。新しいサイクルを開始すると前のサイクルは
//! 置き換えられ、その後に届いた結果は状態に書き込まれない。

use chrono::Utc;
use log::{error, info};
use std::sync::Arc;
use tokio::sync::watch;

use crate::application::dto::poll_config::PollConfig;
use crate::application::error::ProcessError;
use crate::application::use_cases::dispatch_submission::{DispatchObserver, SubmissionDispatcher};
use crate::application::use_cases::notify_completion::CompletionNotifier;
use crate::domain::entities::cycle::CycleSnapshot;
use crate::domain::entities::process_result::ProcessResult;
use crate::domain::entities::submission::{SubmissionHandle, SubmissionRequest};
use crate::domain::repositories::processing_repository::ProcessingRepository;
use crate::domain::services::cycle_guard::{CycleGuard, CycleToken};

/// サイクルの終わり方
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// 結果を得た
    Completed(ProcessResult),
    /// 失敗した（ユーザー向けメッセージ）
    Failed(String),
    /// 新しいサイクルに置き換えられた
    Superseded,
}

/// 送信サイクルユースケース
pub struct ProcessCycleUseCase<R: ProcessingRepository> {
    dispatcher: SubmissionDispatcher<R>,
    notifier: Arc<CompletionNotifier>,
    guard: CycleGuard,
    state: watch::Sender<CycleSnapshot>,
}

impl<R: ProcessingRepository> ProcessCycleUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `repository` - 処理リポジトリ
    /// * `poll_config` - ポーリング設定
    /// * `notifier` - 完了通知
    pub fn new(
        repository: Arc<R>,
        poll_config: PollConfig,
        notifier: Arc<CompletionNotifier>,
    ) -> Self {
        let (state, _) = watch::channel(CycleSnapshot::default());
        Self {
            dispatcher: SubmissionDispatcher::new(repository, poll_config),
            notifier,
            guard: CycleGuard::new(),
            state,
        }
    }

    /// 状態の変化を購読する
    pub fn subscribe(&self) -> watch::Receiver<CycleSnapshot> {
        self.state.subscribe()
    }

    /// 現在の状態
    pub fn snapshot(&self) -> CycleSnapshot {
        self.state.borrow().clone()
    }

    pub fn notifier(&self) -> &CompletionNotifier {
        &self.notifier
    }

    /// 1サイクルを実行する
    ///
    /// 失敗はここで一度だけ捕捉し、汎用メッセージに変換して状態に書き込む。
    /// どの終わり方でも、このサイクルが最新なら `loading` は `false` に戻る。
    ///
    /// # Arguments
    ///
    /// * `request` - 送信要求
    pub async fn execute(&self, request: SubmissionRequest) -> CycleOutcome {
        let token = self.guard.begin();
        let generation = token.generation();
        let batch = request.is_batch();

        self.state
            .send_modify(|state| state.begin(generation, batch, Utc::now()));
        self.notifier.observe(&ProcessResult::empty()).await;
        info!(
            "Cycle {} started ({})",
            generation,
            if batch { "batch" } else { "single" }
        );

        let observer = CycleObserver {
            token: &token,
            state: &self.state,
        };

        match self.dispatcher.execute(&request, &token, &observer).await {
            Ok(result) => {
                let applied = update_if_current(&self.state, &token, |state| {
                    state.complete(result.clone())
                });
                if !applied {
                    info!("Cycle {} superseded, discarding its result", generation);
                    return CycleOutcome::Superseded;
                }

                info!("Cycle {} completed", generation);
                self.notifier.observe(&result).await;
                CycleOutcome::Completed(result)
            }
            Err(ProcessError::Superseded) => {
                info!("Cycle {} superseded", generation);
                CycleOutcome::Superseded
            }
            Err(e) => {
                error!("Cycle {} failed: {}", generation, e);
                let message = e.user_message();
                if !update_if_current(&self.state, &token, |state| state.fail(message)) {
                    return CycleOutcome::Superseded;
                }
                CycleOutcome::Failed(message.to_string())
            }
        }
    }

    /// 進行中のサイクルを取り消して `Idle` に戻す
    ///
    /// 進行中のポーリングは次の確認の前に停止する。
    pub fn cancel(&self) {
        let token = self.guard.begin();
        self.state.send_modify(|state| {
            *state = CycleSnapshot {
                generation: token.generation(),
                ..CycleSnapshot::default()
            }
        });
        info!("Cycle {} cancelled the previous submission", token.generation());
    }
}

/// トークンが最新の場合のみ状態を更新する
fn update_if_current(
    state: &watch::Sender<CycleSnapshot>,
    token: &CycleToken,
    update: impl FnOnce(&mut CycleSnapshot),
) -> bool {
    state.send_if_modified(|snapshot| {
        if !token.is_current() {
            return false;
        }
        update(snapshot);
        true
    })
}

/// サイクルの進捗を状態に反映するオブザーバー
struct CycleObserver<'a> {
    token: &'a CycleToken,
    state: &'a watch::Sender<CycleSnapshot>,
}

impl DispatchObserver for CycleObserver<'_> {
    fn on_job_accepted(&self, handle: &SubmissionHandle) {
        update_if_current(self.state, self.token, |state| state.accept_job(handle));
    }

    fn on_poll_attempt(&self, attempt: u32) {
        update_if_current(self.state, self.token, |state| {
            state.record_poll_attempt(attempt)
        });
    }
}
