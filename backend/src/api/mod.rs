//! REST API modules.

pub mod error;
pub mod users;

pub use error::{ApiError, ApiResult};
