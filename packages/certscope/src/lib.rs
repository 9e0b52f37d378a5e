#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

//! Certificate inspection core
//!
//! Turns untrusted DER bytes into typed certificate and certification request
//! records, and links CA records into a trust forest:
//!
//! - [`der`]: bounded tag/length/value decoder producing a [`ParseNode`] tree
//! - [`registry`]: object identifier names
//! - [`x509`]: positional X.509 and PKCS#10 field extraction
//! - [`hierarchy`]: two-pass CA forest assembly
//! - [`status`]: lifecycle classification
//!
//! ```no_run
//! use certscope::{inspect_certificate, InspectConfig};
//!
//! # fn run(der: &[u8]) -> certscope_common::Result<()> {
//! let cert = inspect_certificate(der, &InspectConfig::default())?;
//! println!("{} ({})", cert.subject, cert.public_key);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod der;
pub mod errors;
pub mod hierarchy;
pub mod inspect;
pub mod registry;
pub mod status;
pub mod x509;

mod serde_hex;

pub use config::InspectConfig;
pub use der::{decode, decode_with_limits, DecoderLimits, ParseNode};
pub use errors::{AssemblyWarning, DecodeError, ExtractError};
pub use hierarchy::{assemble, assemble_at, Assembly, CaNode, CaSummary, ParentRef};
pub use inspect::{assemble_hierarchy, inspect_certificate, inspect_csr};
pub use status::{classify, classify_with_horizon, Status};
pub use x509::{extract_certificate, extract_csr, DecodedCertificate, DecodedCsr};
