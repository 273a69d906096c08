pub mod assertions;
pub mod setup;

// Re-export main utilities for use by test files
pub use assertions::{assert_redirect, cookie_value, is_removal};
#[allow(unused_imports)]
pub use setup::{TestApp, TestAppBuilder};
