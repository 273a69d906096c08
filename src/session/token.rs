use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::types::{SessionClaims, TokenError};
use crate::shared::AppError;

/// Configuration for JWT token operations
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    pub ttl: Duration,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Creates a new JWT token for the subject, expiring after the configured ttl
    #[instrument(skip(self, subject, role))]
    pub fn create_token(&self, subject: &str, role: &str) -> Result<String, AppError> {
        let exp = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::JwtError("Token lifetime out of range".to_string()))?
            .timestamp();

        debug!(
            ttl_secs = self.ttl.num_seconds(),
            exp_timestamp = exp,
            "Creating JWT token with expiration"
        );

        self.create_token_expiring_at(subject, role, exp)
    }

    /// Creates a token with an explicit expiry (unix seconds)
    pub fn create_token_expiring_at(
        &self,
        subject: &str,
        role: &str,
        exp: i64,
    ) -> Result<String, AppError> {
        let claims = SessionClaims {
            sub: subject.to_string(),
            role: role.to_string(),
            exp,
            iat: Utc::now().timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode JWT token");
            AppError::JwtError(e.to_string())
        })
    }

    /// Decodes a token into its claims.
    ///
    /// The signature and claim shape are checked, expiry is not: callers
    /// compare `exp` themselves so an expired token can be evicted from
    /// its store. Malformed input is reported as `InvalidToken`.
    #[instrument(skip(self, token))]
    pub fn decode(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::default();
        validation.validate_exp = false;

        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map(|data| {
            debug!(
                sub = %data.claims.sub,
                role = %data.claims.role,
                exp = data.claims.exp,
                "JWT token decoded successfully"
            );
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode JWT token");
            TokenError::InvalidToken
        })
    }
}
