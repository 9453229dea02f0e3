//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence` (PostgreSQL)
//!   and `crate::infrastructure::memory` (process-local)
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link storage, lookups and search
//! - [`UserRepository`] - Link owners
//!
//! The generic search contract ([`SearchParams`], [`SearchResult`]) lives in
//! [`search`].

pub mod link_repository;
pub mod search;
pub mod user_repository;

pub use link_repository::{LINK_SORTABLE_FIELDS, LinkRepository};
pub use search::{SearchFilter, SearchInput, SearchParams, SearchResult, SortDirection};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
