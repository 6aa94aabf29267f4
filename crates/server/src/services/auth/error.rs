//! Authentication error types.

use officebar_core::EmailError;
use thiserror::Error;

use super::MIN_PASSWORD_LENGTH;

/// Errors produced by the authentication gate.
///
/// The `Display` strings double as the client-facing error messages, so
/// they are fixed wording rather than debug detail.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email failed structural validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A signup field was left empty.
    #[error("All fields are required")]
    MissingFields,

    /// Login was attempted without an email or password.
    #[error("Email and password required")]
    MissingCredentials,

    /// The password does not meet the minimum length.
    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    WeakPassword,

    /// The email is already registered.
    #[error("Email already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password; the two are not distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The request carried no bearer token.
    #[error("No token provided")]
    MissingToken,

    /// The bearer token is malformed, has a bad signature, or expired.
    #[error("Invalid token")]
    InvalidToken,

    /// Password hashing failed.
    #[error("password hashing error")]
    PasswordHash,

    /// Token claims could not be encoded.
    #[error("token encoding error: {0}")]
    TokenEncoding(String),
}
