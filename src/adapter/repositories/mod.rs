//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod http_processing_repository;
