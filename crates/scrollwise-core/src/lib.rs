//! # scrollwise-core
//!
//! Core types, traits, and abstractions for the scrollwise bookmark manager.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other scrollwise crates depend on.

pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
