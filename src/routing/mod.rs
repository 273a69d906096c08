// Public API - what other modules can use
pub use gate::{GateDecision, GateState, PublicDecision, RoutePolicy};
pub use middleware::{protected_route, public_route, ProtectedRoute};
pub use paths::Portal;

// Internal modules
pub mod gate;
mod middleware;
pub mod paths;
