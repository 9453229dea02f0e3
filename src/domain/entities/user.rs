//! User entity referenced as the owner of links.

use chrono::{DateTime, Utc};

/// A registered user.
///
/// Links only store the user id; the entity exists so shortening can verify
/// that a claimed owner is known.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(id: String, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }
}
