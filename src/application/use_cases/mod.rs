//! # Use Cases
//!
//! 送信サイクルのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **SubmissionDispatcher**: 送信モードの選択と受付への送信
//! - **CompletionPoller**: バッチジョブの完了ポーリング
//! - **CompletionNotifier**: 完了時の通知（結果ごとに一度だけ）
//! - **ProcessCycleUseCase**: サイクル全体の状態管理

pub mod dispatch_submission;
pub mod notify_completion;
pub mod poll_completion;
pub mod run_cycle;

#[cfg(test)]
pub(crate) mod test_support;
