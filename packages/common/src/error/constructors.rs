//! Construction and accessors for [`Error`]

use super::types::{Error, ErrorInner, ErrorKind};
use std::fmt;

impl Error {
    /// Bare error of `kind` with no context or source
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            inner: ErrorInner::build(kind, None, None),
        }
    }

    /// Wrap a lower-level error, keeping it reachable through `source()`
    #[must_use]
    pub fn with_source<E>(kind: ErrorKind, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            inner: ErrorInner::build(kind, None, Some(Box::new(source))),
        }
    }

    /// Attach a message describing what was being done
    ///
    /// If this error already carries context or a source it becomes the
    /// source of the result, so repeated calls build a chain.
    #[must_use]
    pub fn context<C: fmt::Display>(self, context: C) -> Self {
        let kind = self.inner.kind.clone();
        let message = Some(context.to_string());
        let nested = if self.inner.source.is_some() || self.inner.context.is_some() {
            Some(Box::new(self) as Box<dyn std::error::Error + Send + Sync>)
        } else {
            None
        };
        Self {
            inner: ErrorInner::build(kind, message, nested),
        }
    }

    /// Category of this error
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }

    /// Context message of this layer, without the nested ones
    #[must_use]
    pub fn get_context(&self) -> Option<&str> {
        self.inner.context.as_deref()
    }

    /// Stack captured when this layer was created
    #[cfg(feature = "full-backtrace")]
    #[must_use]
    pub fn backtrace(&self) -> &backtrace::Backtrace {
        &self.inner.backtrace
    }

    /// Shorthand for `Error::new(ErrorKind::Decode)`
    #[must_use]
    pub fn decode() -> Self {
        Self::new(ErrorKind::Decode)
    }

    /// Shorthand for `Error::new(ErrorKind::Extract)`
    #[must_use]
    pub fn extract() -> Self {
        Self::new(ErrorKind::Extract)
    }

    /// Shorthand for `Error::new(ErrorKind::Configuration)`
    #[must_use]
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Shorthand for `Error::new(ErrorKind::ResourceExhausted)`
    #[must_use]
    pub fn resource_exhausted() -> Self {
        Self::new(ErrorKind::ResourceExhausted)
    }
}
