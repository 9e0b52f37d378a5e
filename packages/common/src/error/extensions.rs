//! Extension trait for attaching context to foreign results

use super::types::{Error, ErrorKind, Result};
use std::fmt;

/// Attach a kind and context to a foreign error while converting it
pub trait ResultExt<T> {
    /// Convert the error into [`Error`] of `kind`, keeping it as the source
    fn with_kind(self, kind: ErrorKind) -> Result<T>;

    /// Like [`ResultExt::with_kind`], also attaching `context`
    fn with_context<C: fmt::Display>(self, kind: ErrorKind, context: C) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_kind(self, kind: ErrorKind) -> Result<T> {
        self.map_err(|e| Error::with_source(kind, e))
    }

    fn with_context<C: fmt::Display>(self, kind: ErrorKind, context: C) -> Result<T> {
        self.map_err(|e| Error::with_source(kind, e).context(context))
    }
}
