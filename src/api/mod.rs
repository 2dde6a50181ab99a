//! HTTP surface: routes, handlers, and the JSON error shape.

pub mod error;
mod handlers;
pub mod router;
pub mod types;

pub use error::ApiError;
pub use router::router;
