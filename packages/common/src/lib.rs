//! Common infrastructure shared by the certscope crates
//!
//! This crate provides:
//! - Error handling with context propagation
//! - Process-wide logging setup and structured log helpers

pub mod error;

pub use error::*;
