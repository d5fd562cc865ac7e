//! # Driver Layer (Presentation)
//!
//! CLIやその他の外部インターフェースを提供
//!
//! ## 特徴
//!
//! - Use Caseを呼び出して送信サイクルを起動
//! - 依存性注入（DI）を行い、全てを組み立てる
//! - 状態の変化を端末に表示
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **render**: 状態遷移の表示
//! - **workflow**: ワークフロー全体のオーケストレーション

pub mod cli;
pub mod render;
pub mod workflow;

pub use cli::Args;
pub use workflow::SubmissionWorkflow;
