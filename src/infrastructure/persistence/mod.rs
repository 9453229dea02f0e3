//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries with bound parameters. The schema lives in `migrations/` and is
//! applied at startup.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, lookups and search
//! - [`PgUserRepository`] - Link owners

pub mod pg_link_repository;
pub mod pg_user_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
