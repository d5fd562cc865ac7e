//! # Cycle Snapshot
//!
//! 送信サイクルの状態機械と、UIに公開する状態の投影

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::process_result::ProcessResult;
use super::submission::SubmissionHandle;

/// サイクルのフェーズ
///
/// バッチ: `Idle → Submitting → Polling → Completed | Failed`
/// 単一:   `Idle → Submitting → Completed | Failed`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    #[default]
    Idle,
    Submitting,
    Polling,
    Completed,
    Failed,
}

impl CyclePhase {
    /// 終端フェーズかどうか
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// サイクル状態のスナップショット
///
/// オーケストレーターが唯一の書き手。遷移はメソッド経由でのみ行う。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CycleSnapshot {
    /// サイクルの世代番号（0 はまだ一度も送信していない）
    pub generation: u64,
    pub phase: CyclePhase,
    /// 送信サイクルが進行中
    pub loading: bool,
    /// バッチジョブが未解決のまま待機中
    pub queued: bool,
    /// ユーザー向けのエラーメッセージ
    pub error: Option<String>,
    pub result: ProcessResult,
    /// バッチジョブID
    pub job_id: Option<String>,
    /// 実行済みのステータス確認回数
    pub poll_attempts: u32,
    pub started_at: Option<DateTime<Utc>>,
}

impl CycleSnapshot {
    /// 新しいサイクルを開始する
    ///
    /// 前のサイクルの結果とエラーは破棄される。
    pub fn begin(&mut self, generation: u64, batch: bool, now: DateTime<Utc>) {
        *self = Self {
            generation,
            phase: CyclePhase::Submitting,
            loading: true,
            queued: batch,
            started_at: Some(now),
            ..Self::default()
        };
    }

    /// バッチジョブが受理された
    pub fn accept_job(&mut self, handle: &SubmissionHandle) {
        self.phase = CyclePhase::Polling;
        self.job_id = Some(handle.to_string());
    }

    /// ステータス確認を1回行った
    pub fn record_poll_attempt(&mut self, attempt: u32) {
        self.poll_attempts = attempt;
    }

    /// 結果を得てサイクルを完了する
    pub fn complete(&mut self, result: ProcessResult) {
        self.phase = CyclePhase::Completed;
        self.result = result;
        self.loading = false;
        self.queued = false;
    }

    /// サイクルを失敗で終了する（結果は空のまま）
    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = CyclePhase::Failed;
        self.error = Some(message.into());
        self.result = ProcessResult::empty();
        self.loading = false;
        self.queued = false;
    }
}
