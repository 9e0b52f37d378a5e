//! Core certificate extraction
//!
//! Certificate ::= SEQUENCE {
//!     tbsCertificate      TBSCertificate,
//!     signatureAlgorithm  AlgorithmIdentifier,
//!     signatureValue      BIT STRING }
//!
//! TBSCertificate ::= SEQUENCE {
//!     version          [0] EXPLICIT Version DEFAULT v1,
//!     serialNumber         CertificateSerialNumber,
//!     signature            AlgorithmIdentifier,
//!     issuer               Name,
//!     validity             Validity,
//!     subject              Name,
//!     subjectPublicKeyInfo SubjectPublicKeyInfo,
//!     issuerUniqueID   [1] IMPLICIT UniqueIdentifier OPTIONAL,
//!     subjectUniqueID  [2] IMPLICIT UniqueIdentifier OPTIONAL,
//!     extensions       [3] EXPLICIT Extensions OPTIONAL }

use sha2::{Digest, Sha256};

use super::cursor::{primitive, FieldCursor};
use super::extension_extraction::extract_extensions;
use super::key_extraction::{extract_algorithm, extract_public_key};
use super::name_extraction::extract_name;
use super::time_extraction::parse_time;
use crate::der::{universal, DecoderLimits, ParseNode};
use crate::errors::ExtractError;
use crate::registry::{self, OidKind};
use crate::x509::types::{DecodedCertificate, ExtensionSet, Validity};

const FIELD_CERTIFICATE: &str = "certificate";
const FIELD_TBS: &str = "tbs_certificate";
const FIELD_VERSION: &str = "tbs_certificate.version";
const FIELD_SERIAL: &str = "tbs_certificate.serial_number";
const FIELD_TBS_SIGNATURE: &str = "tbs_certificate.signature";
const FIELD_ISSUER: &str = "tbs_certificate.issuer";
const FIELD_VALIDITY: &str = "validity";
const FIELD_NOT_BEFORE: &str = "validity.not_before";
const FIELD_NOT_AFTER: &str = "validity.not_after";
const FIELD_SUBJECT: &str = "tbs_certificate.subject";
const FIELD_SPKI: &str = "subject_public_key_info";
const FIELD_EXTENSIONS: &str = "extensions";
const FIELD_SIGNATURE_ALGORITHM: &str = "signature_algorithm";
const FIELD_SIGNATURE_VALUE: &str = "signature_value";

/// Extract a certificate from its parse tree using the default decoder limits
/// for nested extension and key decoding.
pub fn extract_certificate(tree: &ParseNode<'_>) -> Result<DecodedCertificate, ExtractError> {
    extract_certificate_with(tree, DecoderLimits::default())
}

/// Extract a certificate from its parse tree
///
/// `limits` bounds the nested decodes of extension values and key material,
/// which are separate DER documents wrapped in OCTET/BIT STRINGs.
pub fn extract_certificate_with(
    tree: &ParseNode<'_>,
    limits: DecoderLimits,
) -> Result<DecodedCertificate, ExtractError> {
    let mut certificate = FieldCursor::sequence(tree, FIELD_CERTIFICATE)?;
    let mut tbs = certificate.next_sequence(FIELD_TBS)?;
    let signature_algorithm = extract_algorithm(
        certificate.next(FIELD_SIGNATURE_ALGORITHM)?,
        FIELD_SIGNATURE_ALGORITHM,
    )?;
    certificate.next_primitive(universal::BIT_STRING, FIELD_SIGNATURE_VALUE)?;
    if !certificate.is_done() {
        return Err(ExtractError::MalformedStructure(FIELD_CERTIFICATE));
    }

    let version = match tbs.optional_context(0) {
        Some(explicit) => parse_version(explicit)?,
        None => 1,
    };

    let serial = tbs.next_primitive(universal::INTEGER, FIELD_SERIAL)?;
    if serial.is_empty() {
        return Err(ExtractError::MalformedStructure(FIELD_SERIAL));
    }

    extract_algorithm(tbs.next(FIELD_TBS_SIGNATURE)?, FIELD_TBS_SIGNATURE)?;
    let issuer = extract_name(tbs.next(FIELD_ISSUER)?, FIELD_ISSUER)?;

    let mut validity = tbs.next_sequence(FIELD_VALIDITY)?;
    let not_before = parse_time(validity.next(FIELD_NOT_BEFORE)?, FIELD_NOT_BEFORE)?;
    let not_after = parse_time(validity.next(FIELD_NOT_AFTER)?, FIELD_NOT_AFTER)?;
    if !validity.is_done() {
        return Err(ExtractError::MalformedStructure(FIELD_VALIDITY));
    }

    let subject = extract_name(tbs.next(FIELD_SUBJECT)?, FIELD_SUBJECT)?;
    let public_key = extract_public_key(tbs.next(FIELD_SPKI)?, limits)?;

    // Unique identifiers are obsolete and carry nothing we report
    tbs.optional_context(1);
    tbs.optional_context(2);

    let extensions = match tbs.optional_context(3) {
        Some(explicit) => {
            let mut wrapper = FieldCursor::inside(explicit, FIELD_EXTENSIONS)?;
            let inner = wrapper.next(FIELD_EXTENSIONS)?;
            if !wrapper.is_done() {
                return Err(ExtractError::MalformedStructure(FIELD_EXTENSIONS));
            }
            extract_extensions(inner, limits, FIELD_EXTENSIONS)?
        }
        None => ExtensionSet::default(),
    };
    if !tbs.is_done() {
        return Err(ExtractError::MalformedStructure(FIELD_TBS));
    }

    Ok(DecodedCertificate {
        version,
        serial: serial.to_vec(),
        signature_algorithm: algorithm_name(&signature_algorithm.oid),
        issuer,
        validity: Validity {
            not_before,
            not_after,
        },
        subject,
        public_key,
        extensions,
        fingerprint_sha256: hex::encode(Sha256::digest(tree.raw())),
    })
}

/// Version ::= INTEGER { v1(0), v2(1), v3(2) }, reported 1-based
fn parse_version(explicit: &ParseNode<'_>) -> Result<u8, ExtractError> {
    let mut wrapper = FieldCursor::inside(explicit, FIELD_VERSION)?;
    let value = primitive(wrapper.next(FIELD_VERSION)?, universal::INTEGER, FIELD_VERSION)?;
    if !wrapper.is_done() {
        return Err(ExtractError::MalformedStructure(FIELD_VERSION));
    }
    match value {
        [v @ 0..=2] => Ok(v + 1),
        _ => Err(ExtractError::MalformedStructure(FIELD_VERSION)),
    }
}

/// Registry name of a signature algorithm, or its dotted form
pub(crate) fn algorithm_name(oid: &str) -> String {
    registry::name_of_kind(oid, OidKind::SignatureAlgorithm)
        .or_else(|| registry::name_of_kind(oid, OidKind::KeyAlgorithm))
        .unwrap_or(oid)
        .to_string()
}
