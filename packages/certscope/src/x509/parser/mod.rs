//! Positional X.509 / PKCS#10 extraction over a decoded parse tree
//!
//! - `core`: certificate extraction, coordinating the others
//! - `csr`: certification request extraction
//! - `cursor`: step-by-step field navigation with named failures
//! - `name_extraction`: distinguished names
//! - `key_extraction`: algorithm identifiers and public key sizes
//! - `extension_extraction`: best-effort extension values
//! - `time_extraction`: UTCTime and GeneralizedTime

pub mod core;
pub mod csr;
mod cursor;
mod extension_extraction;
mod key_extraction;
mod name_extraction;
mod time_extraction;

pub use self::core::{extract_certificate, extract_certificate_with};
pub use csr::{extract_csr, extract_csr_with};
