//! Link entity representing a shortened URL owned by an optional user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validators::{EntityValidationError, LinkValidator};

/// Identifier of a [`Link`].
pub type LinkId = Uuid;

/// Candidate state for constructing a [`Link`].
///
/// Optional fields fall back to defaults at construction: `clicks = 0`,
/// `created_at = updated_at = now`, `deleted_at = None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkProps {
    pub original_url: String,
    pub short_code: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub clicks: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl LinkProps {
    /// Creates an unowned prop set with every optional field left to defaults.
    pub fn new(original_url: impl Into<String>, short_code: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            short_code: short_code.into(),
            owner_id: None,
            clicks: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    /// Sets the owner.
    pub fn owned_by(mut self, owner_id: Option<String>) -> Self {
        self.owner_id = owner_id;
        self
    }
}

/// A shortened link.
///
/// Fields are private: state only changes through [`Link::update_original_url`],
/// [`Link::increment_clicks`] and [`Link::soft_delete`], each of which keeps
/// the invariants checked by [`LinkValidator`]. Serialization goes through
/// [`LinkSnapshot`], and deserialization re-validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LinkSnapshot", into = "LinkSnapshot")]
pub struct Link {
    id: LinkId,
    original_url: String,
    short_code: String,
    owner_id: Option<String>,
    clicks: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a link with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`EntityValidationError`] if `props` break any field rule.
    pub fn new(props: LinkProps) -> Result<Self, EntityValidationError> {
        Self::with_id(Uuid::new_v4(), props)
    }

    /// Creates a link with a known id, e.g. when loading from storage.
    ///
    /// # Errors
    ///
    /// Returns [`EntityValidationError`] if `props` break any field rule.
    pub fn with_id(id: LinkId, props: LinkProps) -> Result<Self, EntityValidationError> {
        LinkValidator::validate(&props)?;

        let now = Utc::now();
        let created_at = props.created_at.unwrap_or(now);
        let updated_at = props.updated_at.unwrap_or(now).max(created_at);

        Ok(Self {
            id,
            original_url: props.original_url,
            short_code: props.short_code,
            owner_id: props.owner_id,
            clicks: props.clicks.unwrap_or(0),
            created_at,
            updated_at,
            deleted_at: props.deleted_at,
        })
    }

    /// Points the link at a new destination.
    ///
    /// The full prop set is re-validated with the new URL; on failure the
    /// link is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EntityValidationError`] if `new_url` is not a valid URL.
    pub fn update_original_url(
        &mut self,
        new_url: impl Into<String>,
    ) -> Result<(), EntityValidationError> {
        let candidate = LinkProps {
            original_url: new_url.into(),
            ..self.to_props()
        };

        LinkValidator::validate(&candidate)?;

        self.original_url = candidate.original_url;
        self.touch();
        Ok(())
    }

    /// Counts one visit.
    ///
    /// Does not look at `deleted_at`; callers gate deleted links. The counter
    /// saturates at `i64::MAX`.
    pub fn increment_clicks(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
        self.touch();
    }

    /// Marks the link as deleted. A link that is already deleted keeps its
    /// original deletion timestamp.
    pub fn soft_delete(&mut self) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(Utc::now());
        }
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    pub fn short_code(&self) -> &str {
        &self.short_code
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    pub fn clicks(&self) -> i64 {
        self.clicks
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns true if the link has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns true if `user_id` is the owner. Unowned links have no owner.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id.as_deref() == Some(user_id)
    }

    /// Returns the current state as a fully populated prop set.
    pub fn to_props(&self) -> LinkProps {
        LinkProps {
            original_url: self.original_url.clone(),
            short_code: self.short_code.clone(),
            owner_id: self.owner_id.clone(),
            clicks: Some(self.clicks),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
            deleted_at: self.deleted_at,
        }
    }

    // `updated_at` never moves backwards, even if the wall clock does.
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

/// Serialized form of a [`Link`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSnapshot {
    pub id: LinkId,
    pub original_url: String,
    pub short_code: String,
    pub owner_id: Option<String>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Link> for LinkSnapshot {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
            owner_id: link.owner_id,
            clicks: link.clicks,
            created_at: link.created_at,
            updated_at: link.updated_at,
            deleted_at: link.deleted_at,
        }
    }
}

impl TryFrom<LinkSnapshot> for Link {
    type Error = EntityValidationError;

    fn try_from(snapshot: LinkSnapshot) -> Result<Self, Self::Error> {
        Link::with_id(
            snapshot.id,
            LinkProps {
                original_url: snapshot.original_url,
                short_code: snapshot.short_code,
                owner_id: snapshot.owner_id,
                clicks: Some(snapshot.clicks),
                created_at: Some(snapshot.created_at),
                updated_at: Some(snapshot.updated_at),
                deleted_at: snapshot.deleted_at,
            },
        )
    }
}
