// Library crate for the campus placement portal gateway
// This file exposes the public API for integration tests

pub mod accounts;
pub mod app;
pub mod config;
pub mod pages;
pub mod routing;
pub mod session;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use app::build_router;
pub use config::AppConfig;
pub use routing::{GateDecision, GateState, Portal, RoutePolicy};
pub use session::{Role, Session, SessionClaims, TokenConfig};
pub use shared::{AppError, AppState};
