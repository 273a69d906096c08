use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use time::OffsetDateTime;
use tracing::{debug, warn};

/// Cookie-like key-value storage for the session token
pub trait TokenStore {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: String, expires: DateTime<Utc>);
    fn remove(&mut self, name: &str);
}

/// Map-backed store for tests and callers outside an HTTP request
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    entries: HashMap<String, (String, DateTime<Utc>)>,
    writes: usize,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a single token
    pub fn with_token(name: &str, value: impl Into<String>, expires: DateTime<Utc>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(name.to_string(), (value.into(), expires));
        Self { entries, writes: 0 }
    }

    /// Number of `set`/`remove` calls seen so far
    #[cfg(test)]
    pub(crate) fn write_count(&self) -> usize {
        self.writes
    }

    #[cfg(test)]
    pub(crate) fn expires_at(&self, name: &str) -> Option<DateTime<Utc>> {
        self.entries.get(name).map(|(_, expires)| *expires)
    }
}

impl TokenStore for InMemoryTokenStore {
    fn get(&self, name: &str) -> Option<String> {
        self.entries.get(name).map(|(value, _)| value.clone())
    }

    fn set(&mut self, name: &str, value: String, expires: DateTime<Utc>) {
        self.writes += 1;
        self.entries.insert(name.to_string(), (value, expires));
    }

    fn remove(&mut self, name: &str) {
        self.writes += 1;
        self.entries.remove(name);
    }
}

/// Settings for the session cookie
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            name: "token".to_string(),
            secure: false,
        }
    }
}

/// Token store over the browser cookie jar of one request.
///
/// Mutations accumulate in the jar, hand it back with `into_jar` and attach it
/// to the response for them to reach the browser.
pub struct CookieTokenStore {
    jar: CookieJar,
    secure: bool,
}

impl CookieTokenStore {
    pub fn new(jar: CookieJar, settings: &CookieSettings) -> Self {
        Self {
            jar,
            secure: settings.secure,
        }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl TokenStore for CookieTokenStore {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|cookie| cookie.value().to_string())
    }

    fn set(&mut self, name: &str, value: String, expires: DateTime<Utc>) {
        let mut cookie = Cookie::build((name.to_string(), value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax);

        match OffsetDateTime::from_unix_timestamp(expires.timestamp()) {
            Ok(at) => cookie = cookie.expires(at),
            Err(e) => {
                // Falls back to a browser-session cookie
                warn!(error = %e, "Token expiry out of range for cookie");
            }
        }

        debug!(cookie = %name, "Storing session cookie");
        self.jar = std::mem::take(&mut self.jar).add(cookie);
    }

    fn remove(&mut self, name: &str) {
        debug!(cookie = %name, "Removing session cookie");
        let removal = Cookie::build((name.to_string(), "")).path("/");
        self.jar = std::mem::take(&mut self.jar).remove(removal);
    }
}
