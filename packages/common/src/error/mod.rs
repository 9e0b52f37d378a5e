//! Shared error type for the certscope crates
//!
//! [`Error`] is cheap to clone and carries an [`ErrorKind`], an optional
//! context message and an optional source. Calling [`Error::context`] on an
//! error that already has context nests the old error as the source, so the
//! rendered message reads outermost first.

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
pub mod macros;
pub mod types;

pub use extensions::ResultExt;
pub use logging::LoggingTransformer;
pub use types::{Error, ErrorKind, Result};
