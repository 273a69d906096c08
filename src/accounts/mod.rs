// Public API - what other modules can use
pub use models::AccountModel;
pub use repository::{AccountRepository, InMemoryAccountRepository};
pub use service::AccountService;

// Internal modules
pub mod models;
pub mod repository;
mod service;
