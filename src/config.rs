use chrono::Duration;
use std::env;
use tracing::warn;

use crate::session::CookieSettings;
use crate::shared::AppError;

const DEV_JWT_SECRET: &str = "your-secret-key-change-in-production";
/// One year
const MAX_SESSION_TTL_HOURS: i64 = 24 * 366;

/// Credentials for the bootstrap super admin
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
}

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub session_ttl: Duration,
    pub cookie: CookieSettings,
    pub password_hash_cost: u32,
    pub seed_admin: Option<SeedAdmin>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            session_ttl: Duration::hours(24),
            cookie: CookieSettings::default(),
            password_hash_cost: bcrypt::DEFAULT_COST,
            seed_admin: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            warn!("JWT_SECRET not set, using development secret");
            defaults.jwt_secret.clone()
        });

        let session_ttl = match lookup("SESSION_TTL_HOURS") {
            Some(raw) => {
                let hours: i64 = parse(&raw, "SESSION_TTL_HOURS")?;
                if !(1..=MAX_SESSION_TTL_HOURS).contains(&hours) {
                    return Err(AppError::Configuration(format!(
                        "SESSION_TTL_HOURS must be between 1 and {}",
                        MAX_SESSION_TTL_HOURS
                    )));
                }
                Duration::try_hours(hours).ok_or_else(|| {
                    AppError::Configuration("SESSION_TTL_HOURS is out of range".to_string())
                })?
            }
            None => defaults.session_ttl,
        };

        let cookie = CookieSettings {
            name: lookup("SESSION_COOKIE_NAME").unwrap_or(defaults.cookie.name),
            secure: match lookup("SESSION_COOKIE_SECURE") {
                Some(raw) => parse(&raw, "SESSION_COOKIE_SECURE")?,
                None => defaults.cookie.secure,
            },
        };

        let password_hash_cost = match lookup("PASSWORD_HASH_COST") {
            Some(raw) => parse(&raw, "PASSWORD_HASH_COST")?,
            None => defaults.password_hash_cost,
        };

        let seed_admin = match (lookup("SEED_ADMIN_EMAIL"), lookup("SEED_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(SeedAdmin { email, password }),
            (None, None) => None,
            _ => {
                return Err(AppError::Configuration(
                    "SEED_ADMIN_EMAIL and SEED_ADMIN_PASSWORD must be set together".to_string(),
                ))
            }
        };

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            jwt_secret,
            session_ttl,
            cookie,
            password_hash_cost,
            seed_admin,
        })
    }
}

fn parse<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Configuration(format!("{} has an invalid value: {}", key, raw)))
}
