//! Short code generation.
//!
//! Codes are drawn from the URL-safe base64 alphabet (`A-Z a-z 0-9 - _`)
//! using the operating system's cryptographically secure random source.
//! Uniqueness against stored codes is not a concern here; the shorten use
//! case checks and retries.

use base64::Engine as _;

/// Default length of a generated short code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Produces random short codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a code of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// [`CodeGenerator`] backed by `getrandom`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    /// # Panics
    ///
    /// Panics if the system random number generator fails (extremely rare).
    fn generate(&self, length: usize) -> String {
        generate_code(length)
    }
}

/// Generates a random URL-safe code of `length` characters.
///
/// Every base64 character carries 6 bits, so `length` random bytes always
/// encode to at least `length` characters; the tail is cut off.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code(length: usize) -> String {
    let mut buffer = vec![0u8; length];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buffer);
    code.truncate(length);
    code
}
