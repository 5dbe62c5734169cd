//! # Application Layer
//!
//! The completion-client port and the use case that drives one question
//! through it.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
