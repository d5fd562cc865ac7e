//! # Application Layer
//!
//! 送信サイクルのビジネスフロー（ユースケース）
//!
//! ## 特徴
//!
//! - Domain層のエンティティとサービスを組み合わせてビジネスフローを実現
//! - Repository / Channel traitに依存（実装には依存しない）
//! - HTTPや通知APIの詳細は知らない
//!
//! ## 構成要素
//!
//! - **dto**: Data Transfer Object（ポーリング設定、通知設定）
//! - **error**: サイクル境界で扱うエラー分類
//! - **use_cases**: ユースケース

pub mod dto;
pub mod error;
pub mod use_cases;
