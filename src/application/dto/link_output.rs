//! Presentation-neutral view of a [`Link`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{Link, LinkId};

/// Stable output shape returned by every link use case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkOutput {
    pub id: LinkId,
    pub original_url: String,
    pub short_code: String,
    pub owner_id: Option<String>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Link> for LinkOutput {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id(),
            original_url: link.original_url().to_string(),
            short_code: link.short_code().to_string(),
            owner_id: link.owner_id().map(str::to_string),
            clicks: link.clicks(),
            created_at: link.created_at(),
            updated_at: link.updated_at(),
            deleted_at: link.deleted_at(),
        }
    }
}
