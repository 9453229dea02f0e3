//! Field rules for [`LinkProps`].

use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::domain::entities::LinkProps;
use crate::domain::validators::{EntityValidationError, FieldErrors};
use crate::utils::validation::field_messages;

/// Maximum length of a short code.
pub const SHORT_CODE_MAX_LENGTH: usize = 6;

/// Rule table evaluated against a candidate prop set.
///
/// Optional props that are type-checked by [`LinkProps`] itself (owner id,
/// timestamps) carry no rule here; the cross-field timestamp ordering is
/// checked in [`LinkValidator::validate`].
#[derive(Debug, Validate)]
struct LinkRules {
    #[validate(
        custom(function = "not_empty", message = "original_url must not be empty"),
        url(message = "original_url must be a URL address")
    )]
    original_url: String,

    #[validate(
        custom(function = "not_empty", message = "short_code must not be empty"),
        length(
            min = 1,
            max = 6,
            message = "short_code must be between 1 and 6 characters"
        )
    )]
    short_code: String,

    #[validate(range(min = 0, message = "clicks must not be less than 0"))]
    clicks: Option<i64>,
}

impl From<&LinkProps> for LinkRules {
    fn from(props: &LinkProps) -> Self {
        Self {
            original_url: props.original_url.clone(),
            short_code: props.short_code.clone(),
            clicks: props.clicks,
        }
    }
}

fn not_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("not_empty").with_message(Cow::Borrowed("must not be empty")));
    }
    Ok(())
}

/// Validates link prop sets.
///
/// All rules are applied independently; a failing prop set reports every
/// violation, grouped by field.
pub struct LinkValidator;

impl LinkValidator {
    /// Checks `props` against the link rules.
    ///
    /// # Errors
    ///
    /// Returns [`EntityValidationError`] holding the `field -> [messages]` map
    /// when at least one rule fails.
    pub fn validate(props: &LinkProps) -> Result<(), EntityValidationError> {
        let mut errors: FieldErrors = match LinkRules::from(props).validate() {
            Ok(()) => FieldErrors::new(),
            Err(report) => field_messages(&report),
        };

        if let (Some(created_at), Some(updated_at)) = (props.created_at, props.updated_at)
            && updated_at < created_at
        {
            errors
                .entry("updated_at".to_string())
                .or_default()
                .push("updated_at must not be earlier than created_at".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(EntityValidationError::new(errors))
        }
    }
}
