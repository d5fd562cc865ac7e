//! # ProcessResult Value Object
//!
//! 処理結果のリンク

use serde::{Deserialize, Serialize};

/// 処理結果
///
/// バッチ送信は `csv_link` のみ、単一送信は `pdf_link` のみを持つ。
/// どちらも空文字列なら「結果なし」。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    /// バッチ結果（処理済みCSV）のURL
    pub csv_link: String,
    /// 単一結果（処理済みCV）のURL
    pub pdf_link: String,
}

impl ProcessResult {
    /// 空の結果
    pub fn empty() -> Self {
        Self::default()
    }

    /// バッチ送信の結果を作成
    pub fn batch(csv_link: impl Into<String>) -> Self {
        Self {
            csv_link: csv_link.into(),
            pdf_link: String::new(),
        }
    }

    /// 単一送信の結果を作成
    pub fn single(pdf_link: impl Into<String>) -> Self {
        Self {
            csv_link: String::new(),
            pdf_link: pdf_link.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.csv_link.is_empty() && self.pdf_link.is_empty()
    }

    /// バッチ結果のリンク（空なら `None`）
    pub fn batch_location(&self) -> Option<&str> {
        Some(self.csv_link.as_str()).filter(|l| !l.is_empty())
    }

    /// 単一結果のリンク（空なら `None`）
    pub fn single_location(&self) -> Option<&str> {
        Some(self.pdf_link.as_str()).filter(|l| !l.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let result = ProcessResult::empty();
        assert!(result.is_empty());
        assert!(result.batch_location().is_none());
        assert!(result.single_location().is_none());
    }

    #[test]
    fn test_batch_only_sets_csv_link() {
        let result = ProcessResult::batch("https://drive.example/out.csv");

        assert!(!result.is_empty());
        assert_eq!(result.batch_location(), Some("https://drive.example/out.csv"));
        assert!(result.single_location().is_none());
    }

    #[test]
    fn test_single_only_sets_pdf_link() {
        let result = ProcessResult::single("https://drive.example/result1.pdf");

        assert_eq!(result.csv_link, "");
        assert_eq!(result.pdf_link, "https://drive.example/result1.pdf");
        assert!(result.batch_location().is_none());
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(ProcessResult::single("https://x/1.pdf")).unwrap();

        assert_eq!(json["csvLink"], "");
        assert_eq!(json["pdfLink"], "https://x/1.pdf");
    }
}
