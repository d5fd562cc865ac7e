//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **SubmissionRequest**: バッチCSVか単一リンクのどちらか一方の送信要求
//! - **ProcessResult**: 処理結果のリンク（CSV / PDF）
//! - **StatusReport**: ステータス確認の応答と完了判定
//! - **CycleSnapshot**: 送信サイクルの状態（UIへの投影）

pub mod cycle;
pub mod process_result;
pub mod processing_status;
pub mod submission;
