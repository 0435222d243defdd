//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such
//! as timing diagnostics.

pub mod timing;

pub use timing::RequestTiming;
