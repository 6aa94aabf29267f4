//! Signed bearer tokens.
//!
//! Tokens are `base64url(claims JSON) + "." + base64url(HMAC-SHA256)` over
//! the encoded claims, valid for seven days. Verification checks the
//! signature before touching the payload and compares in constant time.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use officebar_core::UserId;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::models::User;
use crate::services::auth::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Token lifetime in days.
const TOKEN_TTL_DAYS: i64 = 7;

/// Claims embedded in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// ID of the authenticated user.
    pub id: UserId,
    /// Login email at issue time.
    pub email: String,
    /// Display name at issue time.
    pub name: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Issues and verifies signed bearer tokens.
///
/// Implements `Debug` manually to redact the signing secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: SecretString,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl TokenSigner {
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Issue a seven-day token for a user.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.issue_at(user, Utc::now())
    }

    fn issue_at(&self, user: &User, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            id: user.id,
            email: user.email.as_str().to_owned(),
            name: user.full_name(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        let payload = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&claims).map_err(|e| AuthError::TokenEncoding(e.to_string()))?,
        );
        let signature = self.sign(&payload)?;

        Ok(format!("{payload}.{signature}"))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for any defect: bad structure, bad
    /// signature, undecodable claims, or an expired token.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let (payload, signature) = token.split_once('.').ok_or(AuthError::InvalidToken)?;

        let expected = self.sign(payload)?;
        if !constant_time_compare(&expected, signature) {
            return Err(AuthError::InvalidToken);
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AuthError::InvalidToken)?;
        let claims: Claims =
            serde_json::from_slice(&bytes).map_err(|_| AuthError::InvalidToken)?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }

    fn sign(&self, payload: &str) -> Result<String, AuthError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))?;
        mac.update(payload.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use officebar_core::Email;

    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(SecretString::from("k9mX2pQ7vL4nR8tY3wZ6bC1dF5gH0jS9".to_string()))
    }

    fn sample_user() -> User {
        User::new(
            Email::parse("kim@office.test").unwrap(),
            "$argon2id$fake-hash".to_string(),
            "Kim".to_string(),
            "Lee".to_string(),
        )
    }

    // ===== Issue / Verify =====

    #[test]
    fn test_issue_and_verify_round_trip() {
        let signer = signer();
        let user = sample_user();

        let token = signer.issue(&user).unwrap();
        let claims = signer.verify(&token).unwrap();

        assert_eq!(claims.id, user.id);
        assert_eq!(claims.email, "kim@office.test");
        assert_eq!(claims.name, "Kim Lee");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let signer = signer();
        let token = signer.issue(&sample_user()).unwrap();

        let (payload, signature) = token.split_once('.').unwrap();
        let mut forged_claims =
            String::from_utf8(URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        forged_claims = forged_claims.replace("Kim Lee", "Someone Else");
        let forged = format!(
            "{}.{signature}",
            URL_SAFE_NO_PAD.encode(forged_claims.as_bytes())
        );

        assert!(matches!(
            signer.verify(&forged),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = signer().issue(&sample_user()).unwrap();

        let other = TokenSigner::new(SecretString::from(
            "z8yW3vU6tS1rQ4pO7nM0lK9jI2hG5fD8".to_string(),
        ));
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let signer = signer();
        let issued_at = Utc::now() - Duration::days(TOKEN_TTL_DAYS + 1);
        let token = signer.issue_at(&sample_user(), issued_at).unwrap();

        assert!(matches!(signer.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let signer = signer();
        assert!(signer.verify("not-a-token").is_err());
        assert!(signer.verify("").is_err());
        assert!(signer.verify("a.b.c").is_err());
    }

    // ===== Constant-Time Compare =====

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("abc123", "abc123"));
    }

    #[test]
    fn test_constant_time_compare_different() {
        assert!(!constant_time_compare("abc123", "abc124"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("abc", "abc123"));
    }
}
