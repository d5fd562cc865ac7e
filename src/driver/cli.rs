//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{ArgGroup, Parser};

use crate::adapter::config::Config;

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/cvsubmit/config.json";

/// CVリンク（単一またはCSVでまとめたもの）を処理サービスに送信するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "cvsubmit")]
#[command(about = "Submit CV links to the processing service and wait for the result", long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["csv", "link"])))]
pub struct Args {
    /// CSV file of drive links to submit as one batch
    #[arg(long, value_name = "PATH")]
    pub csv: Option<String>,

    /// Single drive link to submit
    #[arg(long, value_name = "URL")]
    pub link: Option<String>,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Override the API base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Give up after this many status checks
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Interval between status checks (at least 1)
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval_ms: Option<u64>,

    /// Disable the desktop notification
    #[arg(long)]
    pub no_notify: bool,

    /// Disable the completion sound
    #[arg(long)]
    pub no_sound: bool,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// CLIの指定で設定ファイルの値を上書きする
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(api_url) = &self.api_url {
            config.api_base_url = api_url.clone();
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_poll_attempts = Some(max_attempts);
        }
        if let Some(interval) = self.poll_interval_ms {
            config.poll_interval_ms = interval;
        }
        if self.no_notify {
            config.enable_notifications = false;
        }
        if self.no_sound {
            config.enable_sound = false;
        }
        config
    }
}
