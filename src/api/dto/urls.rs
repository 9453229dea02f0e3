//! DTOs for the `/urls` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::dto::LinkOutput;
use crate::domain::entities::LinkId;

/// Builds the public short URL for a code: `{base_url}/urls/{code}`.
pub fn short_url(base_url: &str, short_code: &str) -> String {
    format!("{}/urls/{}", base_url.trim_end_matches('/'), short_code)
}

/// Request body for `POST /urls`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(url(message = "url must be a URL address"))]
    pub url: String,
}

/// Response body for `POST /urls`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_url: String,
}

impl ShortenResponse {
    pub fn present(output: &LinkOutput, base_url: &str) -> Self {
        Self {
            short_url: short_url(base_url, &output.short_code),
        }
    }
}

/// Request body for `PATCH /urls/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUrlRequest {
    #[validate(url(message = "new_original_url must be a URL address"))]
    pub new_original_url: String,
}

/// One link as shown to its owner.
///
/// `short_code` carries the full short URL, not the bare code.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortUrlResponse {
    pub id: LinkId,
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl ShortUrlResponse {
    pub fn present(output: &LinkOutput, base_url: &str) -> Self {
        Self {
            id: output.id,
            short_code: short_url(base_url, &output.short_code),
            original_url: output.original_url.clone(),
            clicks: output.clicks,
            created_at: output.created_at,
        }
    }
}

/// Response body for `GET /urls`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortUrlListResponse {
    pub data: Vec<ShortUrlResponse>,
}

impl ShortUrlListResponse {
    pub fn present(outputs: &[LinkOutput], base_url: &str) -> Self {
        Self {
            data: outputs
                .iter()
                .map(|output| ShortUrlResponse::present(output, base_url))
                .collect(),
        }
    }
}
