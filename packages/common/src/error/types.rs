//! Error and kind definitions

use std::sync::Arc;
use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Error shared across the decoding, extraction and assembly layers
///
/// Cloning shares the same allocation.
#[derive(Debug, Clone)]
pub struct Error {
    pub(super) inner: Arc<ErrorInner>,
}

#[derive(Debug)]
pub(super) struct ErrorInner {
    pub kind: ErrorKind,
    pub context: Option<String>,
    pub source: Option<BoxedSource>,
    #[cfg(feature = "full-backtrace")]
    pub backtrace: backtrace::Backtrace,
}

impl ErrorInner {
    pub(super) fn build(
        kind: ErrorKind,
        context: Option<String>,
        source: Option<BoxedSource>,
    ) -> Arc<Self> {
        Arc::new(Self {
            kind,
            context,
            source,
            #[cfg(feature = "full-backtrace")]
            backtrace: backtrace::Backtrace::new(),
        })
    }
}

/// Broad category of a failure, used by callers to pick a response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The input is not well-formed DER
    #[error("Decode error")]
    Decode,

    /// A certificate or request field is missing or malformed
    #[error("Extraction error")]
    Extract,

    /// Rejected settings
    #[error("Configuration error")]
    Configuration,

    /// Input exceeded a configured size or depth limit
    #[error("Resource exhausted")]
    ResourceExhausted,
}

/// `Result` with [`Error`] as the failure type
pub type Result<T> = std::result::Result<T, Error>;
