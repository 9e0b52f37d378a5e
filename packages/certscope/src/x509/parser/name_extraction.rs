//! Distinguished name extraction
//!
//! Name ::= SEQUENCE OF RelativeDistinguishedName
//! RelativeDistinguishedName ::= SET OF AttributeTypeAndValue
//! AttributeTypeAndValue ::= SEQUENCE { type OBJECT IDENTIFIER, value ANY }

use super::cursor::FieldCursor;
use crate::der::{universal, ParseNode, TagClass};
use crate::errors::ExtractError;
use crate::registry::{self, OidKind};
use crate::x509::types::{DistinguishedName, NameAttribute};

/// Flatten a Name into attributes, preserving encoding order
pub(crate) fn extract_name(
    node: &ParseNode<'_>,
    field: &'static str,
) -> Result<DistinguishedName, ExtractError> {
    let mut rdns = FieldCursor::sequence(node, field)?;
    let mut attributes = Vec::new();

    while !rdns.is_done() {
        let rdn = rdns.next(field)?;
        let mut atvs = FieldCursor::set(rdn, field)?;
        while !atvs.is_done() {
            let mut atv = atvs.next_sequence(field)?;
            let oid = atv.next_oid(field)?;
            let value = atv.next(field)?;
            if !atv.is_done() {
                return Err(ExtractError::MalformedStructure(field));
            }
            let bytes = value.value().ok_or(ExtractError::MalformedStructure(field))?;
            let universal_class = value.tag_class() == TagClass::Universal;
            let value = render_string(value.tag_number(), universal_class, bytes);

            // Only attribute entries may name a DN component
            let name = registry::display_name(&oid, OidKind::Attribute).to_string();
            attributes.push(NameAttribute {
                name,
                oid,
                value,
            });
        }
    }

    Ok(DistinguishedName::new(attributes))
}

/// Decode a directory string by its universal type
///
/// Types that are not strings, or whose bytes are invalid for their type,
/// are rendered as `#` followed by the hex of the content octets.
fn render_string(number: u32, universal_class: bool, bytes: &[u8]) -> String {
    let decoded = if universal_class {
        match number {
            universal::UTF8_STRING => std::str::from_utf8(bytes).ok().map(str::to_owned),
            universal::PRINTABLE_STRING
            | universal::IA5_STRING
            | universal::NUMERIC_STRING
            | universal::VISIBLE_STRING => ascii(bytes),
            universal::TELETEX_STRING => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            universal::BMP_STRING => utf16_be(bytes),
            universal::UNIVERSAL_STRING => utf32_be(bytes),
            _ => None,
        }
    } else {
        None
    };
    decoded.unwrap_or_else(|| format!("#{}", hex::encode(bytes)))
}

fn ascii(bytes: &[u8]) -> Option<String> {
    bytes
        .is_ascii()
        .then(|| bytes.iter().map(|&b| char::from(b)).collect())
}

fn utf16_be(bytes: &[u8]) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

fn utf32_be(bytes: &[u8]) -> Option<String> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    bytes
        .chunks_exact(4)
        .map(|quad| char::from_u32(u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]])))
        .collect()
}
