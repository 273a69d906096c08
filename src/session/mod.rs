// Public API - what other modules can use
pub use handlers::{login, logout, session_status};
pub use service::Session;
pub use store::{CookieSettings, CookieTokenStore, InMemoryTokenStore, TokenStore};
pub use token::TokenConfig;
pub use types::{Role, SessionClaims, TokenError};

pub(crate) use handlers::cookie_session;

// Internal modules
mod handlers;
mod service;
mod store;
mod token;
pub mod types;
