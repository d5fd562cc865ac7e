//! # Submission Entities
//!
//! 送信要求（バッチCSV / 単一リンク）とジョブハンドル

use std::fmt;
use thiserror::Error;

/// 入力エラー
///
/// 送信ボタンが押せない状態に相当する。ネットワーク呼び出しの前に検出される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// CSVファイルもリンクも指定されていない
    #[error("either a CSV file or a drive link must be supplied")]
    Missing,

    /// CSV以外のファイルが指定された
    #[error("batch file must be a .csv file: {file_name}")]
    NotCsv { file_name: String },
}

/// バッチ送信するCSVファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFile {
    file_name: String,
    bytes: Vec<u8>,
}

impl BatchFile {
    /// 新しいバッチファイルを作成
    ///
    /// # Arguments
    ///
    /// * `file_name` - multipartで送るファイル名
    /// * `bytes` - ファイルの中身
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 拡張子が `.csv` かどうか（大文字小文字を区別しない）
    pub fn has_csv_extension(&self) -> bool {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false)
    }
}

/// 送信要求
///
/// バッチCSVか単一リンクのどちらか一方だけを持つ。
/// 両方が空の要求は型として作れない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionRequest {
    /// 多数の参照をまとめたCSV（非同期処理、ポーリングあり）
    BatchFile(BatchFile),
    /// 単一のドライブリンク（呼び出し側から見て同期処理）
    SingleReference(String),
}

impl SubmissionRequest {
    /// 画面入力から送信要求を組み立てる
    ///
    /// 空のファイルと空白だけのリンクは「未指定」として扱う。
    /// 両方が指定された場合はバッチを優先する。
    ///
    /// # Errors
    ///
    /// どちらも指定されていない場合は `InputError::Missing`、
    /// CSV以外のファイルの場合は `InputError::NotCsv` を返す
    ///
    /// # 例
    ///
    /// ```
    /// use cvsubmit::domain::entities::submission::{InputError, SubmissionRequest};
    ///
    /// let single = SubmissionRequest::from_inputs(None, Some("https://drive.example/doc1")).unwrap();
    /// assert!(!single.is_batch());
    ///
    /// let missing = SubmissionRequest::from_inputs(None, Some("   "));
    /// assert_eq!(missing, Err(InputError::Missing));
    /// ```
    pub fn from_inputs(
        file: Option<BatchFile>,
        link: Option<&str>,
    ) -> Result<Self, InputError> {
        if let Some(file) = file.filter(|f| !f.is_empty()) {
            if !file.has_csv_extension() {
                return Err(InputError::NotCsv {
                    file_name: file.file_name,
                });
            }
            return Ok(Self::BatchFile(file));
        }

        match link.map(str::trim).filter(|l| !l.is_empty()) {
            Some(link) => Ok(Self::SingleReference(link.to_string())),
            None => Err(InputError::Missing),
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Self::BatchFile(_))
    }
}

/// バッチ送信のジョブID（`csv_id`）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionHandle(String);

impl SubmissionHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
