//! Terminal Rendering
//!
//! サイクル状態の変化を端末向けの行に変換

use crate::domain::entities::cycle::{CyclePhase, CycleSnapshot};
use crate::domain::entities::process_result::ProcessResult;

pub const PROCESSING_LINE: &str = "Processing...";
pub const QUEUED_LINE: &str =
    "The CSV is being processed in the background. You will be notified when it's ready.";

/// 前後の状態から表示すべき進捗行を返す
///
/// 完了と失敗は `render_result` / ワークフロー側で扱う
pub fn describe_transition(prev: &CycleSnapshot, next: &CycleSnapshot) -> Option<String> {
    let new_cycle = prev.generation != next.generation;
    match next.phase {
        CyclePhase::Submitting if new_cycle || prev.phase != CyclePhase::Submitting => {
            Some(PROCESSING_LINE.to_string())
        }
        CyclePhase::Polling if new_cycle || prev.phase != CyclePhase::Polling => {
            let job = next.job_id.as_deref().unwrap_or("-");
            Some(format!("✓ Queued as job {}\n  {}", job, QUEUED_LINE))
        }
        _ => None,
    }
}

/// 完了した結果の表示行
pub fn render_result(result: &ProcessResult) -> Vec<String> {
    let mut lines = vec!["✓ Processing Complete!".to_string()];
    match (result.batch_location(), result.single_location()) {
        (Some(csv), None) => {
            lines.push("  Processed CSV".to_string());
            lines.push(format!("  View CSV File: {}", csv));
        }
        (None, Some(pdf)) => {
            lines.push("  Processed CV".to_string());
            lines.push(format!("  View Processed CV: {}", pdf));
        }
        _ => {}
    }
    lines
}
