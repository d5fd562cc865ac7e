//! # Process Errors
//!
//! 送信サイクルのエラー分類

use thiserror::Error;

use crate::domain::entities::submission::InputError;

/// ユーザーに表示する唯一のエラーメッセージ
pub const GENERIC_FAILURE_MESSAGE: &str = "Processing failed. Please try again.";

/// サイクル内で発生するエラー
///
/// 内部の区別はログにのみ残し、ユーザーには `GENERIC_FAILURE_MESSAGE` を表示する。
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Input(#[from] InputError),

    /// 受付（バッチ / 単一）の通信エラーまたは不正な応答
    #[error("submission failed: {0}")]
    Submission(String),

    /// ステータス確認の通信エラーまたは不正な応答
    #[error("status check failed: {0}")]
    Polling(String),

    /// 最大確認回数に達した
    #[error("no result after {attempts} status checks")]
    PollLimitExceeded { attempts: u32 },

    /// 新しいサイクルに置き換えられた（状態には書き込まない）
    #[error("cycle superseded by a newer submission")]
    Superseded,
}

impl ProcessError {
    pub fn submission(error: anyhow::Error) -> Self {
        Self::Submission(format!("{:#}", error))
    }

    pub fn polling(error: anyhow::Error) -> Self {
        Self::Polling(format!("{:#}", error))
    }

    /// ユーザー向けメッセージ
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }
}
