use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use super::{
    store::TokenStore,
    token::TokenConfig,
    types::{SessionClaims, TokenError},
};
use crate::shared::AppError;

/// The single owned view of the current user's session.
///
/// Built per request from the persisted store (the cookie). Nothing is kept in
/// memory between requests, so token expiry is noticed on the next navigation.
pub struct Session<S: TokenStore> {
    store: S,
    token_config: TokenConfig,
    cookie_name: String,
}

impl<S: TokenStore> Session<S> {
    pub fn new(store: S, token_config: TokenConfig, cookie_name: impl Into<String>) -> Self {
        Self {
            store,
            token_config,
            cookie_name: cookie_name.into(),
        }
    }

    /// Whether a live token is present.
    ///
    /// Not a pure read: an expired token is evicted from the store.
    pub fn is_authenticated(&mut self) -> bool {
        self.active_claims().is_some()
    }

    /// Raw role claim of the live token.
    ///
    /// Follows the same eviction policy as `is_authenticated`.
    pub fn get_role(&mut self) -> Option<String> {
        self.active_claims().map(|claims| claims.role)
    }

    /// Claims of the stored token, `None` when absent, invalid or expired.
    /// An expired token is removed from the store.
    #[instrument(skip(self))]
    pub fn active_claims(&mut self) -> Option<SessionClaims> {
        match self.load_claims(Utc::now().timestamp()) {
            Ok(claims) => Some(claims),
            Err(TokenError::ExpiredToken) => {
                info!(cookie = %self.cookie_name, "Evicting expired session token");
                self.store.remove(&self.cookie_name);
                None
            }
            Err(TokenError::InvalidToken) => None,
        }
    }

    fn load_claims(&self, now: i64) -> Result<SessionClaims, TokenError> {
        let token = self.store.get(&self.cookie_name).ok_or_else(|| {
            debug!("No session token in store");
            TokenError::InvalidToken
        })?;

        let claims = self.token_config.decode(&token)?;
        if claims.is_expired_at(now) {
            debug!(exp = claims.exp, now, "Session token has expired");
            return Err(TokenError::ExpiredToken);
        }

        Ok(claims)
    }

    /// Persists a freshly issued token using its own expiry
    #[instrument(skip(self, token))]
    pub fn start(&mut self, token: &str) -> Result<SessionClaims, AppError> {
        let claims = self.token_config.decode(token).map_err(|e| {
            warn!(error = %e, "Refusing to store undecodable token");
            AppError::JwtError(e.to_string())
        })?;

        let expires = DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or_else(|| {
            warn!(exp = claims.exp, "Token expiry out of range");
            AppError::JwtError("Token expiry out of range".to_string())
        })?;

        self.store.set(&self.cookie_name, token.to_string(), expires);
        info!(sub = %claims.sub, role = %claims.role, "Session started");

        Ok(claims)
    }

    /// Drops the stored token
    #[instrument(skip(self))]
    pub fn end(&mut self) {
        self.store.remove(&self.cookie_name);
        info!("Session ended");
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
