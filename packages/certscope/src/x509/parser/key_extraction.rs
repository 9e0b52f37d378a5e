//! Public key algorithm and size extraction
//!
//! SubjectPublicKeyInfo ::= SEQUENCE {
//!     algorithm         AlgorithmIdentifier,
//!     subjectPublicKey  BIT STRING }

use super::cursor::{octet_aligned_bits, primitive, FieldCursor};
use crate::der::{decode_with_limits, universal, DecoderLimits, ParseNode};
use crate::errors::ExtractError;
use crate::registry::{self, oids, OidKind};
use crate::x509::types::{KeyParameters, PublicKeyInfo};

const FIELD_SPKI: &str = "subject_public_key_info";
const FIELD_ALGORITHM: &str = "subject_public_key_info.algorithm";
const FIELD_PARAMETERS: &str = "subject_public_key_info.algorithm.parameters";
const FIELD_KEY: &str = "subject_public_key_info.subject_public_key";
const FIELD_RSA_MODULUS: &str = "subject_public_key_info.rsa_public_key.modulus";

/// An AlgorithmIdentifier: dotted OID plus the optional parameters node
pub(crate) struct AlgorithmIdentifier<'n, 'a> {
    pub oid: String,
    pub parameters: Option<&'n ParseNode<'a>>,
}

/// AlgorithmIdentifier ::= SEQUENCE { algorithm OBJECT IDENTIFIER, parameters ANY OPTIONAL }
pub(crate) fn extract_algorithm<'n, 'a>(
    node: &'n ParseNode<'a>,
    field: &'static str,
) -> Result<AlgorithmIdentifier<'n, 'a>, ExtractError> {
    let mut fields = FieldCursor::sequence(node, field)?;
    let oid = fields.next_oid(field)?;
    let parameters = fields.peek();
    if parameters.is_some() {
        fields.next(field)?;
    }
    if !fields.is_done() {
        return Err(ExtractError::MalformedStructure(field));
    }
    Ok(AlgorithmIdentifier { oid, parameters })
}

/// Extract algorithm name and size descriptor from a SubjectPublicKeyInfo
pub(crate) fn extract_public_key(
    node: &ParseNode<'_>,
    limits: DecoderLimits,
) -> Result<PublicKeyInfo, ExtractError> {
    let mut fields = FieldCursor::sequence(node, FIELD_SPKI)?;
    let algorithm = extract_algorithm(fields.next(FIELD_ALGORITHM)?, FIELD_ALGORITHM)?;
    let key_bits = fields.next_primitive(universal::BIT_STRING, FIELD_KEY)?;
    let key = octet_aligned_bits(key_bits, FIELD_KEY)?;

    let parameters = match algorithm.oid.as_str() {
        oids::RSA_ENCRYPTION => KeyParameters::ModulusBits(rsa_modulus_bits(key, limits)?),
        oids::EC_PUBLIC_KEY => KeyParameters::NamedCurve(named_curve(algorithm.parameters)?),
        oids::DSA => KeyParameters::ModulusBits(dsa_prime_bits(algorithm.parameters)?),
        oids::X25519 | oids::ED25519 => KeyParameters::FixedBits(256),
        oids::X448 | oids::ED448 => KeyParameters::FixedBits(448),
        other => return Err(ExtractError::UnsupportedAlgorithm(other.to_string())),
    };

    let name = registry::name_of_kind(&algorithm.oid, OidKind::KeyAlgorithm)
        .ok_or_else(|| ExtractError::UnsupportedAlgorithm(algorithm.oid.clone()))?;

    Ok(PublicKeyInfo {
        algorithm: name.to_string(),
        algorithm_oid: algorithm.oid,
        parameters,
    })
}

/// Bit length of an INTEGER's content octets, correcting for one leading
/// sign-padding zero: `(len - pad) * 8`.
pub(crate) fn integer_bits(content: &[u8]) -> Option<u32> {
    let significant = match content {
        [] => return None,
        [0x00, rest @ ..] => rest.len(),
        all => all.len(),
    };
    u32::try_from(significant).ok()?.checked_mul(8)
}

/// RSAPublicKey ::= SEQUENCE { modulus INTEGER, publicExponent INTEGER }
fn rsa_modulus_bits(key: &[u8], limits: DecoderLimits) -> Result<u32, ExtractError> {
    let tree = decode_with_limits(key, limits).map_err(|source| ExtractError::Decode {
        field: FIELD_KEY,
        source,
    })?;
    let mut fields = FieldCursor::sequence(&tree, FIELD_KEY)?;
    let modulus = fields.next_primitive(universal::INTEGER, FIELD_RSA_MODULUS)?;
    fields.next_primitive(universal::INTEGER, FIELD_KEY)?;
    integer_bits(modulus).ok_or(ExtractError::MalformedStructure(FIELD_RSA_MODULUS))
}

/// ECParameters must be a namedCurve OID; explicit curves are not supported
fn named_curve(parameters: Option<&ParseNode<'_>>) -> Result<String, ExtractError> {
    let node = parameters.ok_or(ExtractError::MalformedStructure(FIELD_PARAMETERS))?;
    if node.is_universal(universal::SEQUENCE) {
        return Err(ExtractError::UnsupportedAlgorithm(
            "EC key with explicit curve parameters".to_string(),
        ));
    }
    let oid = node
        .as_oid()
        .ok_or(ExtractError::MalformedStructure(FIELD_PARAMETERS))?;
    Ok(match registry::name_of_kind(&oid, OidKind::Curve) {
        Some(name) => name.to_string(),
        None => oid,
    })
}

/// Dss-Parms ::= SEQUENCE { p INTEGER, q INTEGER, g INTEGER }
fn dsa_prime_bits(parameters: Option<&ParseNode<'_>>) -> Result<u32, ExtractError> {
    let node = parameters.ok_or(ExtractError::MalformedStructure(FIELD_PARAMETERS))?;
    let mut fields = FieldCursor::sequence(node, FIELD_PARAMETERS)?;
    let p = fields.next(FIELD_PARAMETERS)?;
    let p = primitive(p, universal::INTEGER, FIELD_PARAMETERS)?;
    integer_bits(p).ok_or(ExtractError::MalformedStructure(FIELD_PARAMETERS))
}
