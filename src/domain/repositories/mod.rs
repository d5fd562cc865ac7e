//! # Domain Repositories
//!
//! Repository / Capability trait（インターフェース）定義
//!
//! ## 特徴
//!
//! - Domain層では実装を持たない（traitの定義のみ）
//! - Adapter層で具体的な実装を提供（HTTP、デスクトップ通知、端末ベル）
//! - 依存性逆転の原則（DIP）を実現

pub mod alert_channel;
pub mod processing_repository;
