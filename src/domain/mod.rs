//! # Domain Layer
//!
//! このモジュールは送信サイクルの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（Rust標準ライブラリと最小限の依存のみ）
//! - HTTPや通知APIについて何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（SubmissionRequest, ProcessResult, CycleSnapshotなど）
//! - **repositories**: Repository / Capability trait（インターフェース定義のみ）
//! - **services**: Domain Service（サイクル世代の管理）

pub mod entities;
pub mod repositories;
pub mod services;
