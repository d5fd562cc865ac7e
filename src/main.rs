//! cvsubmit - CV Submission Client
//!
//! CVリンクを処理サービスに送信し、結果を表示

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::{bail, Result};
use clap::Parser;

use cvsubmit::adapter::config::Config;
use cvsubmit::domain::entities::cycle::CyclePhase;
use cvsubmit::driver::{Args, SubmissionWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration, CLI flags take precedence
    let config = args.apply_overrides(Config::load_or_default(&args.config)?);

    // Create workflow with injected dependencies
    let workflow = SubmissionWorkflow::new(config)?;

    let snapshot = workflow.execute(&args).await?;
    match snapshot.phase {
        CyclePhase::Completed => Ok(()),
        _ => match snapshot.error {
            Some(error) => bail!("{}", error),
            None => bail!("Submission cancelled"),
        },
    }
}
