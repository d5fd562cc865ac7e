//! # Domain Services
//!
//! エンティティに属さないビジネスルール

pub mod cycle_guard;
