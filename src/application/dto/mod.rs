//! # DTOs
//!
//! ユースケースに渡す設定値

pub mod alert_config;
pub mod poll_config;
