//! In-memory repository implementations.
//!
//! Used when `STORAGE_BACKEND=memory` and by the HTTP integration tests.
//! State lives behind a `tokio::sync::RwLock` and is lost on restart.

pub mod in_memory_link_repository;
pub mod in_memory_user_repository;
pub mod searchable;

pub use in_memory_link_repository::InMemoryLinkRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
