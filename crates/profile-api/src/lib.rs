//! # Profile API
//!
//! HTTP handlers, response envelope, auth middleware, and app state.

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod state;

pub use response::ApiError;
pub use state::AppState;
