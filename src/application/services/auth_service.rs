//! Bearer identity tokens.
//!
//! A token is `<user_id>.<mac>` where `mac` is the lowercase hex
//! HMAC-SHA256 of the user id, keyed by the server signing secret. Whoever
//! holds the secret can mint tokens (see the `admin` binary); the HTTP layer
//! only verifies them.

use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies signed identity tokens.
#[derive(Clone)]
pub struct AuthService {
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` must match the value used when tokens were issued.
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length")
    }

    /// Issues a token for `user_id`.
    pub fn issue_token(&self, user_id: &str) -> String {
        let mut mac = self.mac();
        mac.update(user_id.as_bytes());
        format!("{}.{}", user_id, hex::encode(mac.finalize().into_bytes()))
    }

    /// Verifies a token and returns the user id it was issued for.
    ///
    /// The MAC comparison is constant time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed or its
    /// signature does not match.
    pub fn verify_token(&self, token: &str) -> Result<String, AppError> {
        let invalid = || {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid identity token" }),
            )
        };

        let (user_id, signature) = token.rsplit_once('.').ok_or_else(invalid)?;
        if user_id.is_empty() {
            return Err(invalid());
        }

        let signature = hex::decode(signature).map_err(|_| invalid())?;

        let mut mac = self.mac();
        mac.update(user_id.as_bytes());
        mac.verify_slice(&signature).map_err(|_| invalid())?;

        Ok(user_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("test-signing-secret")
    }

    #[test]
    fn test_issue_then_verify() {
        let service = service();
        let token = service.issue_token("user-1");

        assert_eq!(service.verify_token(&token).unwrap(), "user-1");
    }

    #[test]
    fn test_token_shape() {
        let token = service().issue_token("user-1");
        let (user_id, mac) = token.rsplit_once('.').unwrap();

        assert_eq!(user_id, "user-1");
        assert_eq!(mac.len(), 64);
        assert!(mac.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_user_id_containing_dots() {
        let service = service();
        let token = service.issue_token("first.last");

        assert_eq!(service.verify_token(&token).unwrap(), "first.last");
    }

    #[test]
    fn test_secret_matters() {
        let token = AuthService::new("secret-a").issue_token("user-1");

        let result = AuthService::new("secret-b").verify_token(&token);

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        let service = service();
        let valid = service.issue_token("user-1");
        let forged = valid.replacen("user-1", "user-2", 1);

        let cases = [
            "",
            "no-separator",
            ".deadbeef",
            "user-1.not-hex",
            "user-1.abcd",
            forged.as_str(),
        ];

        for token in cases {
            let result = service.verify_token(token);
            assert!(
                matches!(result, Err(AppError::Unauthorized { .. })),
                "token {token:?} should be rejected"
            );
        }
    }
}
