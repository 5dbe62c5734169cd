//! # Domain Layer
//!
//! Request/response records, wire shapes, and the error type.
//! This layer is independent of transport and runtime.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
