//! PKCS#10 certification request extraction
//!
//! CertificationRequest ::= SEQUENCE {
//!     certificationRequestInfo  CertificationRequestInfo,
//!     signatureAlgorithm        AlgorithmIdentifier,
//!     signature                 BIT STRING }
//!
//! CertificationRequestInfo ::= SEQUENCE {
//!     version       INTEGER { v1(0) },
//!     subject       Name,
//!     subjectPKInfo SubjectPublicKeyInfo,
//!     attributes    [0] IMPLICIT SET OF Attribute }

use super::core::algorithm_name;
use super::cursor::FieldCursor;
use super::extension_extraction::extract_extensions;
use super::key_extraction::{extract_algorithm, extract_public_key};
use super::name_extraction::extract_name;
use crate::der::{universal, DecoderLimits, ParseNode};
use crate::errors::ExtractError;
use crate::registry::oids;
use crate::x509::types::{DecodedCsr, ExtensionSet};

const FIELD_REQUEST: &str = "certification_request";
const FIELD_INFO: &str = "certification_request_info";
const FIELD_VERSION: &str = "certification_request_info.version";
const FIELD_SUBJECT: &str = "certification_request_info.subject";
const FIELD_SPKI: &str = "subject_public_key_info";
const FIELD_ATTRIBUTES: &str = "certification_request_info.attributes";
const FIELD_EXTENSION_REQUEST: &str = "attributes.extension_request";
const FIELD_SIGNATURE_ALGORITHM: &str = "signature_algorithm";
const FIELD_SIGNATURE_VALUE: &str = "signature_value";

/// Extract a certification request using the default decoder limits
pub fn extract_csr(tree: &ParseNode<'_>) -> Result<DecodedCsr, ExtractError> {
    extract_csr_with(tree, DecoderLimits::default())
}

/// Extract a certification request from its parse tree
pub fn extract_csr_with(
    tree: &ParseNode<'_>,
    limits: DecoderLimits,
) -> Result<DecodedCsr, ExtractError> {
    let mut request = FieldCursor::sequence(tree, FIELD_REQUEST)?;
    let mut info = request.next_sequence(FIELD_INFO)?;
    let signature_algorithm = extract_algorithm(
        request.next(FIELD_SIGNATURE_ALGORITHM)?,
        FIELD_SIGNATURE_ALGORITHM,
    )?;
    request.next_primitive(universal::BIT_STRING, FIELD_SIGNATURE_VALUE)?;
    if !request.is_done() {
        return Err(ExtractError::MalformedStructure(FIELD_REQUEST));
    }

    if info.next_primitive(universal::INTEGER, FIELD_VERSION)? != [0x00] {
        return Err(ExtractError::MalformedStructure(FIELD_VERSION));
    }
    let subject = extract_name(info.next(FIELD_SUBJECT)?, FIELD_SUBJECT)?;
    let public_key = extract_public_key(info.next(FIELD_SPKI)?, limits)?;

    let mut requested_extensions = None;
    let mut other_attributes = Vec::new();
    if let Some(attributes) = info.optional_context(0) {
        let mut attributes = FieldCursor::inside(attributes, FIELD_ATTRIBUTES)?;
        while !attributes.is_done() {
            let mut attribute = attributes.next_sequence(FIELD_ATTRIBUTES)?;
            let oid = attribute.next_oid(FIELD_ATTRIBUTES)?;
            let values = attribute.next(FIELD_ATTRIBUTES)?;
            if !attribute.is_done() {
                return Err(ExtractError::MalformedStructure(FIELD_ATTRIBUTES));
            }

            if oid == oids::EXTENSION_REQUEST && requested_extensions.is_none() {
                requested_extensions = Some(extension_request(values, limits)?);
            } else {
                other_attributes.push(oid);
            }
        }
    }
    if !info.is_done() {
        return Err(ExtractError::MalformedStructure(FIELD_INFO));
    }

    Ok(DecodedCsr {
        subject,
        public_key,
        requested_extensions,
        signature_algorithm: algorithm_name(&signature_algorithm.oid),
        other_attributes,
    })
}

/// `values` is a SET holding exactly one Extensions SEQUENCE
fn extension_request(
    values: &ParseNode<'_>,
    limits: DecoderLimits,
) -> Result<ExtensionSet, ExtractError> {
    let mut values = FieldCursor::set(values, FIELD_EXTENSION_REQUEST)?;
    let extensions = values.next(FIELD_EXTENSION_REQUEST)?;
    if !values.is_done() {
        return Err(ExtractError::MalformedStructure(FIELD_EXTENSION_REQUEST));
    }
    extract_extensions(extensions, limits, FIELD_EXTENSION_REQUEST)
}
