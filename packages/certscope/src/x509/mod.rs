//! X.509 certificate and PKCS#10 request records and their extractor

pub mod parser;
pub mod types;

pub use parser::{extract_certificate, extract_certificate_with, extract_csr, extract_csr_with};
pub use types::{
    BasicConstraints, DecodedCertificate, DecodedCsr, DistinguishedName, Extension,
    ExtensionSet, ExtensionValue, GeneralName, KeyParameters, NameAttribute, PublicKeyInfo,
    Validity,
};
