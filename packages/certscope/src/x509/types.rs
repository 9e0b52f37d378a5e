//! Typed records produced by the extractor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

use crate::registry::oids;

/// One attribute of a distinguished name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameAttribute {
    /// Dotted attribute type
    pub oid: String,
    /// Registry short name, or the dotted OID when unregistered
    pub name: String,
    /// Decoded value, or `#` and hex for non-string values
    pub value: String,
}

/// Distinguished name in encoding order
///
/// Attribute order is significant and is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistinguishedName {
    attributes: Vec<NameAttribute>,
}

impl DistinguishedName {
    /// Name from attributes already in encoding order
    #[must_use]
    pub fn new(attributes: Vec<NameAttribute>) -> Self {
        Self { attributes }
    }

    /// Attributes in encoding order
    #[must_use]
    pub fn attributes(&self) -> &[NameAttribute] {
        &self.attributes
    }

    /// `(name, value)` pairs in encoding order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|attr| (attr.name.as_str(), attr.value.as_str()))
    }

    /// First value of the attribute with dotted type `oid`
    #[must_use]
    pub fn get(&self, oid: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.oid == oid)
            .map(|attr| attr.value.as_str())
    }

    /// First CN value
    #[must_use]
    pub fn common_name(&self) -> Option<&str> {
        self.get(oids::COMMON_NAME)
    }

    /// True for the empty name
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Number of attributes
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }
}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attr) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", attr.name, attr.value)?;
        }
        Ok(())
    }
}

/// Algorithm-specific size descriptor of a public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum KeyParameters {
    /// RSA modulus or DSA prime length in bits
    ModulusBits(u32),
    /// Named curve, registry name or dotted OID
    NamedCurve(String),
    /// Algorithms whose key size is fixed by definition
    FixedBits(u32),
}

impl fmt::Display for KeyParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModulusBits(bits) | Self::FixedBits(bits) => write!(f, "{bits} bit"),
            Self::NamedCurve(curve) => f.write_str(curve),
        }
    }
}

/// Subject public key algorithm and size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyInfo {
    /// Registry name, e.g. `RSA` or `EC`
    pub algorithm: String,
    /// Dotted algorithm identifier
    pub algorithm_oid: String,
    /// Size descriptor
    pub parameters: KeyParameters,
}

impl fmt::Display for PublicKeyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.algorithm, self.parameters)
    }
}

/// A Subject Alternative Name entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum GeneralName {
    /// rfc822Name
    Email(String),
    /// dNSName
    Dns(String),
    /// uniformResourceIdentifier
    Uri(String),
    /// iPAddress of 4 or 16 octets
    Ip(IpAddr),
    /// Any other choice, kept as its context tag number and content octets
    Other {
        /// Context tag number of the choice
        tag: u32,
        /// Content octets
        raw: Vec<u8>,
    },
}

impl fmt::Display for GeneralName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(value) => write!(f, "email:{value}"),
            Self::Dns(value) => write!(f, "DNS:{value}"),
            Self::Uri(value) => write!(f, "URI:{value}"),
            Self::Ip(addr) => write!(f, "IP:{addr}"),
            Self::Other { tag, raw } => write!(f, "[{tag}]:{}", hex::encode(raw)),
        }
    }
}

/// Value of the basicConstraints extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicConstraints {
    /// cA flag, false when absent
    pub is_ca: bool,
    /// pathLenConstraint
    pub path_length: Option<u32>,
}

/// Parsed value of one extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtensionValue {
    /// subjectAltName
    SubjectAltNames {
        /// Entries in encoding order
        names: Vec<GeneralName>,
    },
    /// basicConstraints
    BasicConstraints(BasicConstraints),
    /// authorityKeyIdentifier
    AuthorityKeyIdentifier {
        /// The `[0]` keyIdentifier, absent when only issuer and serial are given
        #[serde(with = "crate::serde_hex::option")]
        key_id: Option<Vec<u8>>,
    },
    /// subjectKeyIdentifier
    SubjectKeyIdentifier {
        /// Key identifier octets
        #[serde(with = "crate::serde_hex")]
        key_id: Vec<u8>,
    },
    /// keyUsage
    KeyUsage {
        /// Asserted usages in bit order, e.g. `keyCertSign`
        usages: Vec<String>,
    },
    /// Unrecognized extension, value octets kept verbatim
    Opaque {
        /// extnValue content
        #[serde(with = "crate::serde_hex")]
        raw: Vec<u8>,
    },
    /// Recognized extension whose value failed to parse
    Unparsed {
        /// extnValue content
        #[serde(with = "crate::serde_hex")]
        raw: Vec<u8>,
        /// Why parsing failed
        reason: String,
    },
}

/// One extension in encoding order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    /// Dotted extnID
    pub oid: String,
    /// Critical flag, false when absent
    pub critical: bool,
    /// Parsed value
    pub value: ExtensionValue,
}

/// Extensions in encoding order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionSet {
    extensions: Vec<Extension>,
}

impl ExtensionSet {
    /// Set from extensions already in encoding order
    #[must_use]
    pub fn new(extensions: Vec<Extension>) -> Self {
        Self { extensions }
    }

    /// Extensions in encoding order
    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        self.extensions.iter()
    }

    /// Number of extensions
    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// True when the certificate or request carries none
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// First extension with dotted id `oid`
    #[must_use]
    pub fn get(&self, oid: &str) -> Option<&Extension> {
        self.extensions.iter().find(|ext| ext.oid == oid)
    }

    /// Entries of the first parsed subjectAltName
    #[must_use]
    pub fn subject_alt_names(&self) -> Option<&[GeneralName]> {
        self.extensions.iter().find_map(|ext| match &ext.value {
            ExtensionValue::SubjectAltNames { names } => Some(names.as_slice()),
            _ => None,
        })
    }

    /// First parsed basicConstraints
    #[must_use]
    pub fn basic_constraints(&self) -> Option<BasicConstraints> {
        self.extensions.iter().find_map(|ext| match ext.value {
            ExtensionValue::BasicConstraints(bc) => Some(bc),
            _ => None,
        })
    }

    /// keyIdentifier of the first parsed authorityKeyIdentifier
    #[must_use]
    pub fn authority_key_identifier(&self) -> Option<&[u8]> {
        self.extensions.iter().find_map(|ext| match &ext.value {
            ExtensionValue::AuthorityKeyIdentifier { key_id } => key_id.as_deref(),
            _ => None,
        })
    }

    /// First parsed subjectKeyIdentifier
    #[must_use]
    pub fn subject_key_identifier(&self) -> Option<&[u8]> {
        self.extensions.iter().find_map(|ext| match &ext.value {
            ExtensionValue::SubjectKeyIdentifier { key_id } => Some(key_id.as_slice()),
            _ => None,
        })
    }

    /// Usages of the first parsed keyUsage
    #[must_use]
    pub fn key_usage(&self) -> Option<&[String]> {
        self.extensions.iter().find_map(|ext| match &ext.value {
            ExtensionValue::KeyUsage { usages } => Some(usages.as_slice()),
            _ => None,
        })
    }
}

/// Validity window, both bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
    /// notBefore
    pub not_before: DateTime<Utc>,
    /// notAfter
    pub not_after: DateTime<Utc>,
}

/// Fields of an X.509 certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCertificate {
    /// 1-based; a missing version field means v1
    pub version: u8,
    /// INTEGER content octets as encoded, including any sign-padding byte
    #[serde(with = "crate::serde_hex")]
    pub serial: Vec<u8>,
    /// Outer signature algorithm, registry name or dotted
    pub signature_algorithm: String,
    /// Issuer name in encoding order
    pub issuer: DistinguishedName,
    /// Validity window
    pub validity: Validity,
    /// Subject name in encoding order
    pub subject: DistinguishedName,
    /// Subject public key
    pub public_key: PublicKeyInfo,
    /// Extensions, empty for v1 and v2
    pub extensions: ExtensionSet,
    /// Lowercase hex SHA-256 of the full DER encoding
    pub fingerprint_sha256: String,
}

impl DecodedCertificate {
    /// Serial as colon-separated uppercase hex, without sign padding
    #[must_use]
    pub fn serial_hex(&self) -> String {
        let serial = match self.serial.as_slice() {
            [0x00, next, ..] if *next >= 0x80 => &self.serial[1..],
            other => other,
        };
        serial
            .iter()
            .map(|b| hex::encode_upper([*b]))
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Issuer and subject names are identical
    #[must_use]
    pub fn is_self_issued(&self) -> bool {
        self.issuer == self.subject
    }
}

/// Fields of a PKCS#10 certification request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCsr {
    /// Requested subject
    pub subject: DistinguishedName,
    /// Requested public key
    pub public_key: PublicKeyInfo,
    /// Extensions asked for through the extension-request attribute
    pub requested_extensions: Option<ExtensionSet>,
    /// Self-signature algorithm, registry name or dotted
    pub signature_algorithm: String,
    /// Dotted ids of attributes other than the extension request
    pub other_attributes: Vec<String>,
}
