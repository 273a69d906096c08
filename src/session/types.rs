use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// Permission class of a portal user
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    Faculty,
    Coordinator,
    Student,
}

impl Role {
    /// Parses a raw role claim, `None` for anything outside the enumeration.
    /// Only the exact SCREAMING_SNAKE_CASE names match.
    pub fn from_claim(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

/// JWT claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub sub: String,
    pub role: String, // Kept raw so unrecognized roles reach the gate
    pub exp: i64,     // Expiration timestamp in unix seconds (standard JWT claim)
    pub iat: i64,     // Issued at timestamp (standard JWT claim)
}

impl SessionClaims {
    pub fn parsed_role(&self) -> Option<Role> {
        Role::from_claim(&self.role)
    }

    /// A token whose expiry is at or before `now` is logically absent
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// Failures of the token path. Never surfaced to users, both degrade to
/// "unauthenticated".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token")]
    InvalidToken,

    #[error("expired token")]
    ExpiredToken,
}

/// Body of `POST /api/auth/login/:portal`
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful login
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    pub redirect_to: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LogoutResponse {
    pub redirect_to: String,
}

/// Response for `GET /api/session`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub role: Option<String>,
}
