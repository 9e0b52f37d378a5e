//! Error types for decoding and extraction

use certscope_common::{Error, ErrorKind};
use serde::Serialize;

/// Binary tag/length/value framing failures
///
/// Offsets are absolute positions in the buffer handed to the decoder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Zero-length input
    #[error("empty input")]
    EmptyInput,
    /// Input longer than [`DecoderLimits::max_input_len`](crate::der::DecoderLimits)
    #[error("input of {len} bytes exceeds the {limit} byte limit")]
    InputTooLarge {
        /// Length of the rejected input
        len: usize,
        /// Configured maximum
        limit: usize,
    },
    /// Fewer bytes remain than a header or declared length needs
    #[error("truncated at offset {offset}: {needed} bytes declared, {available} available")]
    Truncated {
        /// Start of the node being read
        offset: usize,
        /// Bytes the node needs past its header
        needed: usize,
        /// Bytes actually left
        available: usize,
    },
    /// Children or trailing bytes disagree with a declared length
    #[error("length mismatch at offset {offset}: {declared} bytes declared, {actual} bytes framed")]
    LengthMismatch {
        /// Start of the node whose length is wrong
        offset: usize,
        /// Declared content length
        declared: usize,
        /// Content bytes actually framed
        actual: usize,
    },
    /// Valid BER that is not DER, e.g. an indefinite length
    #[error("unsupported encoding at offset {offset}: {reason}")]
    UnsupportedEncoding {
        /// Start of the offending node
        offset: usize,
        /// What was wrong with it
        reason: &'static str,
    },
    /// Constructed nodes nested past [`DecoderLimits::max_depth`](crate::der::DecoderLimits)
    #[error("nesting deeper than {limit} levels at offset {offset}")]
    NestingTooDeep {
        /// Start of the first node past the limit
        offset: usize,
        /// Configured maximum depth
        limit: usize,
    },
}

/// Semantic failures while reading certificate or request fields
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The named field is missing or has the wrong shape
    #[error("malformed structure in field `{0}`")]
    MalformedStructure(&'static str),
    /// Key algorithm or parameters this crate cannot describe
    #[error("unsupported algorithm {0}")]
    UnsupportedAlgorithm(String),
    /// A DER document wrapped inside a field failed to decode
    #[error("nested decode failed in field `{field}`: {source}")]
    Decode {
        /// Field holding the wrapped document
        field: &'static str,
        /// Framing failure of the wrapped document
        #[source]
        source: DecodeError,
    },
}

impl ExtractError {
    /// Name of the field the failure is attributed to, if any
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MalformedStructure(field) | Self::Decode { field, .. } => Some(field),
            Self::UnsupportedAlgorithm(_) => None,
        }
    }
}

/// Non-fatal findings while linking CA records into a forest
///
/// Each one leaves the named record as a root; assembly always completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssemblyWarning {
    /// Several records carry the subject key identifier this one points at
    #[error("CA `{id}`: authority key identifier matches {} CAs ({}), left as a root", .candidates.len(), .candidates.join(", "))]
    AmbiguousParentMatch {
        /// Record left as a root
        id: String,
        /// Ids of every matching record, in input order
        candidates: Vec<String>,
    },
    /// The link would have made the record its own ancestor
    #[error("CA `{id}`: linking under `{parent}` would create a cycle, left as a root")]
    CycleBroken {
        /// Record left as a root
        id: String,
        /// Parent that was refused
        parent: String,
    },
    /// The explicit parent id names no record and no key identifier matched
    #[error("CA `{id}`: parent `{parent}` is not among the records, left as a root")]
    UnresolvedParent {
        /// Record left as a root
        id: String,
        /// Parent id as reported
        parent: String,
    },
}

impl AssemblyWarning {
    /// Id of the record the warning is about
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::AmbiguousParentMatch { id, .. }
            | Self::CycleBroken { id, .. }
            | Self::UnresolvedParent { id, .. } => id,
        }
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        let kind = match err {
            DecodeError::InputTooLarge { .. } | DecodeError::NestingTooDeep { .. } => {
                ErrorKind::ResourceExhausted
            }
            _ => ErrorKind::Decode,
        };
        Error::with_source(kind, err)
    }
}

impl From<ExtractError> for Error {
    fn from(err: ExtractError) -> Self {
        let context = err.field().map(|field| format!("field `{field}`"));
        let error = Error::with_source(ErrorKind::Extract, err);
        match context {
            Some(context) => error.context(context),
            None => error,
        }
    }
}
