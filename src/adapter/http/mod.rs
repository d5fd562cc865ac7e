//! HTTP Wire Models
//!
//! 処理サービスAPIのリクエスト/レスポンス

pub mod models;
