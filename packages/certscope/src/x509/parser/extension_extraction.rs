//! Extension extraction
//!
//! Extension ::= SEQUENCE {
//!     extnID     OBJECT IDENTIFIER,
//!     critical   BOOLEAN DEFAULT FALSE,
//!     extnValue  OCTET STRING }
//!
//! The envelope is certificate structure and a malformed one fails
//! extraction. The value is parsed best-effort: a recognized extension whose
//! value is malformed is kept as [`ExtensionValue::Unparsed`].

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use certscope_common::LoggingTransformer;

use super::cursor::{primitive, FieldCursor};
use crate::der::{decode_with_limits, universal, DecoderLimits, ParseNode, TagClass};
use crate::errors::ExtractError;
use crate::registry::oids;
use crate::x509::types::{BasicConstraints, Extension, ExtensionSet, ExtensionValue, GeneralName};

const FIELD_SAN: &str = "extensions.subject_alt_name";
const FIELD_BASIC_CONSTRAINTS: &str = "extensions.basic_constraints";
const FIELD_AKI: &str = "extensions.authority_key_identifier";
const FIELD_SKI: &str = "extensions.subject_key_identifier";
const FIELD_KEY_USAGE: &str = "extensions.key_usage";

/// KeyUsage bit names, bit 0 first
const KEY_USAGE_BITS: [&str; 9] = [
    "digitalSignature",
    "nonRepudiation",
    "keyEncipherment",
    "dataEncipherment",
    "keyAgreement",
    "keyCertSign",
    "cRLSign",
    "encipherOnly",
    "decipherOnly",
];

/// Parse `Extensions ::= SEQUENCE OF Extension`
pub(crate) fn extract_extensions(
    node: &ParseNode<'_>,
    limits: DecoderLimits,
    field: &'static str,
) -> Result<ExtensionSet, ExtractError> {
    let mut entries = FieldCursor::sequence(node, field)?;
    let mut extensions = Vec::new();

    while !entries.is_done() {
        let mut ext = entries.next_sequence(field)?;
        let oid = ext.next_oid(field)?;
        let critical = match ext.optional_primitive(universal::BOOLEAN) {
            Some(flag) => parse_boolean(flag, field)?,
            None => false,
        };
        let raw = ext.next_primitive(universal::OCTET_STRING, field)?;
        if !ext.is_done() {
            return Err(ExtractError::MalformedStructure(field));
        }

        let value = match parse_value(&oid, raw, limits) {
            Ok(value) => value,
            Err(err) => {
                let reason = err.to_string();
                LoggingTransformer::log_extension_fallback(&oid, &reason);
                ExtensionValue::Unparsed {
                    raw: raw.to_vec(),
                    reason,
                }
            }
        };
        extensions.push(Extension {
            oid,
            critical,
            value,
        });
    }

    Ok(ExtensionSet::new(extensions))
}

fn parse_value(
    oid: &str,
    raw: &[u8],
    limits: DecoderLimits,
) -> Result<ExtensionValue, ExtractError> {
    let field = match oid {
        oids::SUBJECT_ALT_NAME => FIELD_SAN,
        oids::BASIC_CONSTRAINTS => FIELD_BASIC_CONSTRAINTS,
        oids::AUTHORITY_KEY_IDENTIFIER => FIELD_AKI,
        oids::SUBJECT_KEY_IDENTIFIER => FIELD_SKI,
        oids::KEY_USAGE => FIELD_KEY_USAGE,
        _ => return Ok(ExtensionValue::Opaque { raw: raw.to_vec() }),
    };

    let tree = decode_with_limits(raw, limits)
        .map_err(|source| ExtractError::Decode { field, source })?;

    match oid {
        oids::SUBJECT_ALT_NAME => Ok(ExtensionValue::SubjectAltNames {
            names: parse_general_names(&tree, field)?,
        }),
        oids::BASIC_CONSTRAINTS => Ok(ExtensionValue::BasicConstraints(
            parse_basic_constraints(&tree)?,
        )),
        oids::AUTHORITY_KEY_IDENTIFIER => Ok(ExtensionValue::AuthorityKeyIdentifier {
            key_id: parse_authority_key_id(&tree)?,
        }),
        oids::SUBJECT_KEY_IDENTIFIER => Ok(ExtensionValue::SubjectKeyIdentifier {
            key_id: primitive(&tree, universal::OCTET_STRING, FIELD_SKI)?.to_vec(),
        }),
        _ => Ok(ExtensionValue::KeyUsage {
            usages: parse_key_usage(&tree)?,
        }),
    }
}

/// GeneralNames ::= SEQUENCE OF GeneralName
fn parse_general_names(
    node: &ParseNode<'_>,
    field: &'static str,
) -> Result<Vec<GeneralName>, ExtractError> {
    let mut entries = FieldCursor::sequence(node, field)?;
    let mut names = Vec::new();

    while !entries.is_done() {
        let entry = entries.next(field)?;
        if entry.tag_class() != TagClass::ContextSpecific {
            return Err(ExtractError::MalformedStructure(field));
        }
        let name = match (entry.tag_number(), entry.value()) {
            (1, Some(value)) => GeneralName::Email(ia5(value, field)?),
            (2, Some(value)) => GeneralName::Dns(ia5(value, field)?),
            (6, Some(value)) => GeneralName::Uri(ia5(value, field)?),
            (7, Some(value)) => match ip_address(value) {
                Some(addr) => GeneralName::Ip(addr),
                None => GeneralName::Other {
                    tag: 7,
                    raw: value.to_vec(),
                },
            },
            (1 | 2 | 6 | 7, None) => return Err(ExtractError::MalformedStructure(field)),
            (tag, _) => GeneralName::Other {
                tag,
                raw: entry.content_bytes().to_vec(),
            },
        };
        names.push(name);
    }

    Ok(names)
}

fn ia5(value: &[u8], field: &'static str) -> Result<String, ExtractError> {
    if !value.is_ascii() {
        return Err(ExtractError::MalformedStructure(field));
    }
    Ok(value.iter().map(|&b| char::from(b)).collect())
}

fn ip_address(value: &[u8]) -> Option<IpAddr> {
    if let Ok(octets) = <[u8; 4]>::try_from(value) {
        return Some(IpAddr::V4(Ipv4Addr::from(octets)));
    }
    if let Ok(octets) = <[u8; 16]>::try_from(value) {
        return Some(IpAddr::V6(Ipv6Addr::from(octets)));
    }
    None
}

/// BasicConstraints ::= SEQUENCE { cA BOOLEAN DEFAULT FALSE, pathLenConstraint INTEGER OPTIONAL }
fn parse_basic_constraints(node: &ParseNode<'_>) -> Result<BasicConstraints, ExtractError> {
    let mut fields = FieldCursor::sequence(node, FIELD_BASIC_CONSTRAINTS)?;
    let is_ca = match fields.optional_primitive(universal::BOOLEAN) {
        Some(flag) => parse_boolean(flag, FIELD_BASIC_CONSTRAINTS)?,
        None => false,
    };
    let path_length = match fields.optional_primitive(universal::INTEGER) {
        Some(len) => Some(parse_small_unsigned(len, FIELD_BASIC_CONSTRAINTS)?),
        None => None,
    };
    if !fields.is_done() {
        return Err(ExtractError::MalformedStructure(FIELD_BASIC_CONSTRAINTS));
    }
    Ok(BasicConstraints { is_ca, path_length })
}

/// AuthorityKeyIdentifier ::= SEQUENCE {
///     keyIdentifier             [0] IMPLICIT OCTET STRING OPTIONAL,
///     authorityCertIssuer       [1] GeneralNames OPTIONAL,
///     authorityCertSerialNumber [2] INTEGER OPTIONAL }
fn parse_authority_key_id(node: &ParseNode<'_>) -> Result<Option<Vec<u8>>, ExtractError> {
    let mut fields = FieldCursor::sequence(node, FIELD_AKI)?;
    let key_id = match fields.optional_context(0) {
        Some(id) => Some(id.value().ok_or(ExtractError::MalformedStructure(FIELD_AKI))?),
        None => None,
    };
    fields.optional_context(1);
    fields.optional_context(2);
    if !fields.is_done() {
        return Err(ExtractError::MalformedStructure(FIELD_AKI));
    }
    Ok(key_id.map(<[u8]>::to_vec))
}

/// KeyUsage ::= BIT STRING
fn parse_key_usage(node: &ParseNode<'_>) -> Result<Vec<String>, ExtractError> {
    let content = primitive(node, universal::BIT_STRING, FIELD_KEY_USAGE)?;
    let Some((&unused, bits)) = content.split_first() else {
        return Err(ExtractError::MalformedStructure(FIELD_KEY_USAGE));
    };
    if unused > 7 || (bits.is_empty() && unused != 0) {
        return Err(ExtractError::MalformedStructure(FIELD_KEY_USAGE));
    }

    let total = bits.len() * 8 - usize::from(unused);
    let usages = (0..total)
        .filter(|&bit| bits[bit / 8] & (0x80 >> (bit % 8)) != 0)
        .map(|bit| match KEY_USAGE_BITS.get(bit) {
            Some(name) => (*name).to_string(),
            None => format!("bit{bit}"),
        })
        .collect();
    Ok(usages)
}

fn parse_boolean(node: &ParseNode<'_>, field: &'static str) -> Result<bool, ExtractError> {
    match primitive(node, universal::BOOLEAN, field)? {
        [0x00] => Ok(false),
        [_] => Ok(true),
        _ => Err(ExtractError::MalformedStructure(field)),
    }
}

/// A non-negative INTEGER that fits in `u32`
fn parse_small_unsigned(node: &ParseNode<'_>, field: &'static str) -> Result<u32, ExtractError> {
    let content = primitive(node, universal::INTEGER, field)?;
    match content {
        [] => Err(ExtractError::MalformedStructure(field)),
        [first, ..] if first & 0x80 != 0 => Err(ExtractError::MalformedStructure(field)),
        _ => {
            let trimmed = match content {
                [0x00, rest @ ..] if !rest.is_empty() => rest,
                all => all,
            };
            if trimmed.len() > 4 {
                return Err(ExtractError::MalformedStructure(field));
            }
            Ok(trimmed
                .iter()
                .fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
        }
    }
}
