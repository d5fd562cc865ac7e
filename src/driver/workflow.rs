//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::adapter::config::Config;
use crate::adapter::notification::desktop::DesktopNotificationChannel;
use crate::adapter::notification::tone::SineToneChannel;
use crate::adapter::repositories::http_processing_repository::HttpProcessingRepository;
use crate::application::error::ProcessError;
use crate::application::use_cases::notify_completion::CompletionNotifier;
use crate::application::use_cases::run_cycle::{CycleOutcome, ProcessCycleUseCase};
use crate::domain::entities::cycle::CycleSnapshot;
use crate::domain::entities::submission::{BatchFile, SubmissionRequest};

use super::cli::Args;
use super::render::{describe_transition, render_result};

/// CLI入力から送信要求を組み立てる
///
/// CSVファイルはここで読み込む。入力が不正なら通信は一切行わない。
pub async fn build_request(args: &Args) -> Result<SubmissionRequest> {
    let file = match &args.csv {
        Some(path) => {
            let expanded_path = shellexpand::tilde(path);
            let bytes = tokio::fs::read(&*expanded_path)
                .await
                .with_context(|| format!("Failed to read CSV file {}", expanded_path))?;
            let file_name = Path::new(&*expanded_path)
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.clone());
            Some(BatchFile::new(file_name, bytes))
        }
        None => None,
    };

    let request =
        SubmissionRequest::from_inputs(file, args.link.as_deref()).map_err(ProcessError::from)?;
    Ok(request)
}

/// Submission Workflow
pub struct SubmissionWorkflow {
    config: Config,
    cycle_use_case: Arc<ProcessCycleUseCase<HttpProcessingRepository>>,
}

impl SubmissionWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Result<Self> {
        let repository = Arc::new(HttpProcessingRepository::new(
            &config.api_base_url,
            config.request_timeout(),
        )?);

        let mut notifier = CompletionNotifier::new(config.alert_config());
        if config.enable_notifications {
            notifier = notifier.with_notification(Arc::new(DesktopNotificationChannel::new()));
        }
        if config.enable_sound {
            notifier = notifier.with_tone(Arc::new(SineToneChannel::new()));
        }

        let cycle_use_case = Arc::new(ProcessCycleUseCase::new(
            repository,
            config.poll_config(),
            Arc::new(notifier),
        ));

        Ok(Self {
            config,
            cycle_use_case,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<CycleSnapshot> {
        self.cycle_use_case.subscribe()
    }

    /// Execute one submission cycle and return its final state
    pub async fn execute(&self, args: &Args) -> Result<CycleSnapshot> {
        info!("Starting cvsubmit...");

        println!("✓ Using configuration:");
        println!("  API: {}", self.config.api_base_url);
        println!("  Poll interval: {} ms", self.config.poll_interval_ms);
        if let Some(max) = self.config.max_poll_attempts {
            println!("  Max status checks: {}", max);
        }

        let request = build_request(args).await?;

        self.cycle_use_case.notifier().prepare().await;

        let (stop_renderer, stop) = oneshot::channel();
        let renderer = spawn_renderer(self.cycle_use_case.subscribe(), stop, |line| {
            println!("{}", line)
        });
        let outcome = tokio::select! {
            outcome = self.cycle_use_case.execute(request) => outcome,
            _ = tokio::signal::ctrl_c() => {
                self.cycle_use_case.cancel();
                CycleOutcome::Superseded
            }
        };
        // 未表示の遷移を出し切ってから終了する
        let _ = stop_renderer.send(());
        renderer.await.context("Renderer task failed")?;

        match &outcome {
            CycleOutcome::Completed(result) => {
                for line in render_result(result) {
                    println!("{}", line);
                }
            }
            CycleOutcome::Failed(message) => info!("Cycle failed: {}", message),
            CycleOutcome::Superseded => println!("⚠ Submission cancelled"),
        }

        let snapshot = self.cycle_use_case.snapshot();
        if args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&snapshot).context("Failed to serialize state")?
            );
        }

        Ok(snapshot)
    }
}

/// 状態の変化を表示するタスクを起動する
///
/// `stop` を受け取った時点で未処理の変化があれば、それを表示してから終了する。
fn spawn_renderer<F>(
    mut rx: watch::Receiver<CycleSnapshot>,
    mut stop: oneshot::Receiver<()>,
    mut emit: F,
) -> JoinHandle<()>
where
    F: FnMut(String) + Send + 'static,
{
    // 起動前の状態を基準にする（タスクが走る前の遷移も表示する）
    let mut prev = rx.borrow_and_update().clone();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let next = rx.borrow_and_update().clone();
                    if let Some(line) = describe_transition(&prev, &next) {
                        emit(line);
                    }
                    prev = next;
                }
                _ = &mut stop => break,
            }
        }
    })
}
