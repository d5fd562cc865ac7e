//! # Processing Repository Trait
//!
//! リモート処理サービスへの送信とステータス確認を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::processing_status::StatusReport;
use crate::domain::entities::submission::{BatchFile, SubmissionHandle};

/// 処理リポジトリ
///
/// リモート処理サービスを不透明なAPIとして扱う
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProcessingRepository: Send + Sync {
    /// CSVをバッチ受付に送信する
    ///
    /// # Arguments
    ///
    /// * `file` - 送信するCSVファイル
    ///
    /// # Returns
    ///
    /// ジョブハンドル
    ///
    /// # Errors
    ///
    /// 通信エラー、または応答にジョブIDが含まれない場合にエラーを返す
    async fn submit_batch(&self, file: &BatchFile) -> Result<SubmissionHandle>;

    /// ジョブのステータスを確認する
    ///
    /// HTTPステータスがエラーでも、応答本文が読めれば `Ok` を返す。
    ///
    /// # Errors
    ///
    /// 通信エラー、または応答本文がパースできない場合にエラーを返す
    async fn check_status(&self, handle: &SubmissionHandle) -> Result<StatusReport>;

    /// 単一リンクを単一受付に送信する
    ///
    /// # Returns
    ///
    /// 処理結果のURL
    ///
    /// # Errors
    ///
    /// 通信エラー、または応答に結果URLが含まれない場合にエラーを返す
    async fn submit_single(&self, drive_link: &str) -> Result<String>;
}
