//! API Response Models
//!
//! 処理サービスのJSONレスポンス

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::submission::SubmissionHandle;

/// マルチパートのフィールド名
pub const BATCH_FILE_FIELD: &str = "csv_file";
pub const SINGLE_LINK_FIELD: &str = "drive_link";

/// `POST /batch_upload` のレスポンス
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchUploadResponse {
    #[serde(default)]
    pub csv_id: Value,
}

impl BatchUploadResponse {
    /// `csv_id` をジョブハンドルに変換する
    ///
    /// 文字列でも数値でも受け付ける
    pub fn handle(&self) -> Result<SubmissionHandle> {
        let id = match &self.csv_id {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            other => bail!("Batch upload response has no usable csv_id: {}", other),
        };
        if id.is_empty() {
            bail!("Batch upload response has an empty csv_id");
        }
        Ok(SubmissionHandle::new(id))
    }
}

/// `GET /status/{csv_id}` のレスポンス
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub csv_drive_url: Option<String>,
}

/// `POST /upload` のレスポンス
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SingleUploadResponse {
    #[serde(default)]
    pub drive_url: Option<String>,
}

impl SingleUploadResponse {
    pub fn location(self) -> Result<String> {
        match self.drive_url {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => bail!("Upload response did not contain a drive_url"),
        }
    }
}
