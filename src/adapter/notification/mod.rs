//! Alert Channel Implementations
//!
//! デスクトップ通知と完了音

pub mod desktop;
pub mod tone;
