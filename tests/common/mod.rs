//! Fake processing service
//!
//! `/batch_upload`, `/status/:id`, `/upload` を実装したテスト用サーバー

#![allow(dead_code)]

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const JOB_ID: &str = "job1";
pub const CSV_RESULT: &str = "https://drive.example/out.csv";
pub const PDF_RESULT: &str = "https://drive.example/result1.pdf";

/// サーバーの振る舞いと記録
#[derive(Debug, Default)]
pub struct FakeState {
    /// 完了を返すまでに "Processing" を返す回数
    pub pending_polls: u32,
    /// バッチ受付を500で失敗させる
    pub fail_batch: bool,
    /// 完了時に数値の csv_id を返す
    pub numeric_id: bool,

    pub batch_uploads: Vec<(String, Option<String>, Vec<u8>)>,
    pub status_calls: Vec<String>,
    pub single_links: Vec<String>,
}

pub struct FakeService {
    pub addr: SocketAddr,
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeService {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn status_calls(&self) -> usize {
        self.state.lock().unwrap().status_calls.len()
    }
}

type Shared = Arc<Mutex<FakeState>>;

async fn batch_upload(
    State(state): State<Shared>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.unwrap().to_vec();
        state.lock().unwrap().batch_uploads.push((name, file_name, bytes));
    }

    let state = state.lock().unwrap();
    if state.fail_batch {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "queue unavailable"})),
        );
    }
    let id = if state.numeric_id { json!(1) } else { json!(JOB_ID) };
    (StatusCode::OK, Json(json!({ "csv_id": id })))
}

async fn status(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    let mut state = state.lock().unwrap();
    state.status_calls.push(id);
    if state.status_calls.len() as u32 <= state.pending_polls {
        Json(json!({"status": "Processing"}))
    } else {
        Json(json!({"status": "Done", "csv_drive_url": CSV_RESULT}))
    }
}

async fn upload(State(state): State<Shared>, mut multipart: Multipart) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("drive_link") {
            let link = field.text().await.unwrap();
            state.lock().unwrap().single_links.push(link);
        }
    }
    Json(json!({ "drive_url": PDF_RESULT }))
}

/// ランダムなポートでサーバーを起動する
pub async fn spawn(state: FakeState) -> FakeService {
    let state = Arc::new(Mutex::new(state));
    let router = Router::new()
        .route("/batch_upload", post(batch_upload))
        .route("/status/:id", get(status))
        .route("/upload", post(upload))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    FakeService { addr, state }
}
