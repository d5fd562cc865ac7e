//! HTTP Processing Repository Implementation
//!
//! ProcessingRepositoryのHTTP実装（reqwest）

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{multipart, Url};
use std::time::Duration;

use crate::adapter::http::models::{
    BatchUploadResponse, SingleUploadResponse, StatusResponse, BATCH_FILE_FIELD,
    SINGLE_LINK_FIELD,
};
use crate::domain::entities::processing_status::StatusReport;
use crate::domain::entities::submission::{BatchFile, SubmissionHandle};
use crate::domain::repositories::processing_repository::ProcessingRepository;

const CSV_MIME: &str = "text/csv";

/// 処理サービスのHTTPリポジトリ
#[derive(Debug)]
pub struct HttpProcessingRepository {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpProcessingRepository {
    /// 新しいリポジトリを作成
    ///
    /// # Arguments
    ///
    /// * `base_url` - APIのベースURL（末尾の `/` は無視）
    /// * `timeout` - リクエストのタイムアウト（`None` なら無制限）
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL {}", base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Invalid API base URL {}", base_url);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// ベースURLの後ろにパスセグメントを足す
    ///
    /// 各セグメントはパーセントエンコードされるので、ジョブIDに `/` や `?` が
    /// 含まれていても別のパスにはならない。
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid API base URL {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// 2xx以外のレスポンスをエラーにする
async fn ensure_success(response: reqwest::Response, operation: &str) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    bail!("{} failed: {} - {}", operation, status, body);
}

#[async_trait]
impl ProcessingRepository for HttpProcessingRepository {
    async fn submit_batch(&self, file: &BatchFile) -> Result<SubmissionHandle> {
        let url = self.endpoint(&["batch_upload"])?;
        let part = multipart::Part::bytes(file.bytes().to_vec())
            .file_name(file.file_name().to_string())
            .mime_str(CSV_MIME)
            .context("Failed to build batch upload part")?;
        let form = multipart::Form::new().part(BATCH_FILE_FIELD, part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .context("Failed to send batch upload request")?;
        let response = ensure_success(response, "Batch upload").await?;

        let body: BatchUploadResponse = response
            .json()
            .await
            .context("Parsing batch upload response json")?;
        body.handle()
    }

    async fn check_status(&self, handle: &SubmissionHandle) -> Result<StatusReport> {
        let url = self.endpoint(&["status", handle.as_str()])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send status request")?;

        let http_status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read status response body")?;

        // 2xx以外は本文を問わず未完了として扱う
        let body = if http_status.is_success() {
            serde_json::from_str::<StatusResponse>(&text)
                .context("Parsing status response json")?
        } else {
            debug!("Status check for {} returned {}", handle, http_status);
            serde_json::from_str::<StatusResponse>(&text).unwrap_or_default()
        };

        Ok(StatusReport::new(
            http_status.as_u16(),
            body.status,
            body.csv_drive_url,
        ))
    }

    async fn submit_single(&self, drive_link: &str) -> Result<String> {
        let url = self.endpoint(&["upload"])?;
        let form = multipart::Form::new().text(SINGLE_LINK_FIELD, drive_link.to_string());

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .context("Failed to send upload request")?;
        let response = ensure_success(response, "Upload").await?;

        let body: SingleUploadResponse = response
            .json()
            .await
            .context("Parsing upload response json")?;
        body.location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let repo = HttpProcessingRepository::new("http://localhost:8000/", None).unwrap();
        assert_eq!(
            repo.endpoint(&["status", "job1"]).unwrap().as_str(),
            "http://localhost:8000/status/job1"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let repo = HttpProcessingRepository::new("https://cv.example/api/", None).unwrap();
        assert_eq!(
            repo.endpoint(&["batch_upload"]).unwrap().as_str(),
            "https://cv.example/api/batch_upload"
        );

        let repo = HttpProcessingRepository::new("https://cv.example/api", None).unwrap();
        assert_eq!(
            repo.endpoint(&["upload"]).unwrap().as_str(),
            "https://cv.example/api/upload"
        );
    }

    #[test]
    fn test_endpoint_escapes_job_id() {
        let repo = HttpProcessingRepository::new("http://localhost:8000", None).unwrap();

        let url = repo.endpoint(&["status", "a/b?c#d"]).unwrap();

        assert_eq!(url.as_str(), "http://localhost:8000/status/a%2Fb%3Fc%23d");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let err = HttpProcessingRepository::new("localhost:8000", None);
        assert!(err.is_err());

        let err = HttpProcessingRepository::new("not a url", None).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid API base URL"));
    }

    #[test]
    fn test_new_with_timeout() {
        let repo =
            HttpProcessingRepository::new("http://localhost:8000", Some(Duration::from_secs(5)));
        assert!(repo.is_ok());
    }

    #[tokio::test]
    async fn test_submit_batch_connection_refused() {
        // ポート1には何も待ち受けていない
        let repo = HttpProcessingRepository::new("http://127.0.0.1:1", None).unwrap();
        let file = BatchFile::new("cvs.csv", b"drive_link\n".to_vec());

        let err = repo.submit_batch(&file).await.unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to send batch upload request"));
    }
}
