//! Adapter Layer
//!
//! 外部システム（処理サービスAPI, デスクトップ通知, 設定ファイル）との統合

pub mod config;
pub mod http;
pub mod notification;
pub mod repositories;
