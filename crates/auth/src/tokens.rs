//! HS256 token issuance and validation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{Claims, TokenKind, TokenPair};

/// Access tokens are short-lived; refresh tokens carry the session.
const ACCESS_TTL_MINUTES: i64 = 15;
const REFRESH_TTL_DAYS: i64 = 7;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token")]
    InvalidToken,

    #[error("wrong token kind")]
    WrongTokenKind,

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Shared signing/verification key material for HS256 tokens.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue the access/refresh pair handed out at login.
    pub fn issue_pair(
        &self,
        username: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.issue_access(username, role, now)?,
            refresh_token: self.issue(
                username,
                role,
                TokenKind::Refresh,
                now,
                Duration::days(REFRESH_TTL_DAYS),
            )?,
        })
    }

    /// Issue a fresh access token (login and refresh paths).
    pub fn issue_access(
        &self,
        username: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        self.issue(
            username,
            role,
            TokenKind::Access,
            now,
            Duration::minutes(ACCESS_TTL_MINUTES),
        )
    }

    fn issue(
        &self,
        username: &str,
        role: &str,
        kind: TokenKind,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: username.to_string(),
            role: role.to_string(),
            kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Decode and validate a token, enforcing the expected kind.
    pub fn decode(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken,
            })?;

        if data.claims.kind != expected {
            return Err(AuthError::WrongTokenKind);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::new(b"test-secret")
    }

    #[test]
    fn access_token_round_trips() {
        let keys = keys();
        let pair = keys.issue_pair("admin", "admin", Utc::now()).unwrap();

        let claims = keys.decode(&pair.access_token, TokenKind::Access).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let keys = keys();
        let pair = keys.issue_pair("admin", "admin", Utc::now()).unwrap();

        let err = keys.decode(&pair.refresh_token, TokenKind::Access).unwrap_err();
        assert!(matches!(err, AuthError::WrongTokenKind));

        assert!(keys.decode(&pair.refresh_token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let keys = keys();
        let issued = Utc::now() - Duration::hours(2);
        let token = keys.issue_access("admin", "admin", issued).unwrap();

        let err = keys.decode(&token, TokenKind::Access).unwrap_err();
        assert!(matches!(err, AuthError::Expired));
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let keys = keys();
        let other = JwtKeys::new(b"other-secret");
        let token = keys.issue_access("admin", "admin", Utc::now()).unwrap();

        let err = other.decode(&token, TokenKind::Access).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
