//! Rendering of [`Error`] and its `std::error::Error` impl

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    /// `{}` renders the kind, the context and the source chain.
    /// `{:#}` additionally appends the captured backtrace.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.kind)?;

        if let Some(context) = &self.inner.context {
            write!(f, ": {context}")?;
        }

        let mut cause = self
            .inner
            .source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static));
        while let Some(err) = cause {
            write!(f, "\nCaused by: {err}")?;
            // Nested `Error`s print their own chain.
            if err.is::<Error>() {
                break;
            }
            cause = err.source();
        }

        #[cfg(feature = "full-backtrace")]
        if f.alternate() {
            write!(f, "\n{:?}", self.inner.backtrace)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
