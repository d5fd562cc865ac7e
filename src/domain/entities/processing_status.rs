//! # Processing Status
//!
//! ステータス確認の応答と完了判定

use std::fmt;

/// 完了を表すステータス文字列
pub const TERMINAL_STATUS: &str = "Done";

/// サービスが返すステータス文字列
///
/// 値の集合は開いている（"Processing", "pending" など）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingStatus(String);

impl ProcessingStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 完了マーカーかどうか
    ///
    /// 完了判定そのものは `StatusReport::completion` が行う。
    /// マーカーだけで結果URLがない応答は未完了のまま警告に使う。
    pub fn is_terminal_marker(&self) -> bool {
        self.0 == TERMINAL_STATUS
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ステータス確認の判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<'a> {
    /// 結果が取得可能
    Ready(&'a str),
    /// まだ処理中（ステータス文字列があれば保持）
    Pending(Option<&'a ProcessingStatus>),
}

/// ステータス確認の応答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// HTTPステータスコード
    pub http_status: u16,
    /// サービスのステータス文字列
    pub status: Option<ProcessingStatus>,
    /// 結果CSVのURL（`csv_drive_url`）
    pub result_location: Option<String>,
}

impl StatusReport {
    pub fn new(
        http_status: u16,
        status: Option<String>,
        result_location: Option<String>,
    ) -> Self {
        Self {
            http_status,
            status: status.map(ProcessingStatus::new),
            result_location,
        }
    }

    /// 完了判定
    ///
    /// HTTP 200 かつ結果URLが空でない場合のみ完了。
    /// それ以外（ステータスが "Done" でもURLがない場合を含む）はすべて処理中。
    ///
    /// # 例
    ///
    /// ```
    /// use cvsubmit::domain::entities::processing_status::{Completion, StatusReport};
    ///
    /// let done = StatusReport::new(200, Some("Done".into()), Some("https://x/out.csv".into()));
    /// assert_eq!(done.completion(), Completion::Ready("https://x/out.csv"));
    ///
    /// let accepted = StatusReport::new(202, None, Some("https://x/out.csv".into()));
    /// assert!(matches!(accepted.completion(), Completion::Pending(_)));
    /// ```
    pub fn completion(&self) -> Completion<'_> {
        match self.result_location.as_deref() {
            Some(location) if self.http_status == 200 && !location.is_empty() => {
                Completion::Ready(location)
            }
            _ => Completion::Pending(self.status.as_ref()),
        }
    }
}
