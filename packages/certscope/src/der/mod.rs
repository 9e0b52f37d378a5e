//! Binary tag/length/value decoder
//!
//! Domain-agnostic: turns a DER buffer into a tree of [`ParseNode`]s with
//! byte-accurate offsets and lengths. X.509 knowledge lives in [`crate::x509`].
//!
//! - `decoder`: bounded, non-recursive decoding
//! - `node`: the parse tree and its re-serialization
//! - `tag`: identifier octets
//! - `oid`: OBJECT IDENTIFIER content codec

pub mod decoder;
pub mod node;
pub mod oid;
pub mod tag;

pub use decoder::{decode, decode_with_limits, DecoderLimits, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_LEN};
pub use node::{Content, ParseNode};
pub use tag::{universal, Tag, TagClass};
