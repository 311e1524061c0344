//! HTTP front of the demo weather service.
//!
//! Exposes the router so it can be served by the binary or driven directly in tests.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use routes::create_router;
