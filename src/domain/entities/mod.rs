//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL with click counter, optional owner and
//!   soft-delete marker
//! - [`User`] - A known user that may own links
//!
//! [`Link`] guards its own state: it is built from a [`LinkProps`] candidate
//! that is validated first, and it exposes read accessors plus the three
//! mutations the application layer is allowed to perform.

pub mod link;
pub mod user;

pub use link::{Link, LinkId, LinkProps, LinkSnapshot};
pub use user::User;
