//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod cached_location_repository;
pub mod http_location_repository;
pub mod http_session_repository;
pub mod json_state_directory;
