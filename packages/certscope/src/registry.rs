//! Object identifier registry
//!
//! Static table from dotted OIDs to the short names shown to operators.
//! Unknown identifiers are never given a placeholder: callers fall back to
//! the dotted form via [`display_name`].

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Well-known identifiers referenced directly by the extractor
pub mod oids {
    /// commonName (CN)
    pub const COMMON_NAME: &str = "2.5.4.3";
    /// countryName (C)
    pub const COUNTRY: &str = "2.5.4.6";
    /// localityName (L)
    pub const LOCALITY: &str = "2.5.4.7";
    /// stateOrProvinceName (ST)
    pub const STATE: &str = "2.5.4.8";
    /// organizationName (O)
    pub const ORGANIZATION: &str = "2.5.4.10";
    /// organizationalUnitName (OU)
    pub const ORGANIZATIONAL_UNIT: &str = "2.5.4.11";

    /// rsaEncryption
    pub const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
    /// id-ecPublicKey
    pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
    /// id-dsa
    pub const DSA: &str = "1.2.840.10040.4.1";
    /// id-X25519
    pub const X25519: &str = "1.3.101.110";
    /// id-X448
    pub const X448: &str = "1.3.101.111";
    /// id-Ed25519
    pub const ED25519: &str = "1.3.101.112";
    /// id-Ed448
    pub const ED448: &str = "1.3.101.113";

    /// id-ce-subjectKeyIdentifier
    pub const SUBJECT_KEY_IDENTIFIER: &str = "2.5.29.14";
    /// id-ce-keyUsage
    pub const KEY_USAGE: &str = "2.5.29.15";
    /// id-ce-subjectAltName
    pub const SUBJECT_ALT_NAME: &str = "2.5.29.17";
    /// id-ce-basicConstraints
    pub const BASIC_CONSTRAINTS: &str = "2.5.29.19";
    /// id-ce-authorityKeyIdentifier
    pub const AUTHORITY_KEY_IDENTIFIER: &str = "2.5.29.35";
    /// id-ce-extKeyUsage
    pub const EXTENDED_KEY_USAGE: &str = "2.5.29.37";

    /// PKCS#9 extensionRequest
    pub const EXTENSION_REQUEST: &str = "1.2.840.113549.1.9.14";
}

/// What an identifier names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidKind {
    /// Distinguished-name attribute type
    Attribute,
    /// Subject public key algorithm
    KeyAlgorithm,
    /// Signature algorithm
    SignatureAlgorithm,
    /// Named elliptic curve
    Curve,
    /// Certificate extension
    Extension,
    /// PKCS#9 request attribute
    RequestAttribute,
}

/// A registry row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OidEntry {
    /// Dotted identifier
    pub oid: &'static str,
    /// Short name shown to operators
    pub name: &'static str,
    /// What the identifier names
    pub kind: OidKind,
}

const ENTRIES: &[(&str, &str, OidKind)] = &[
    // Attribute types
    (oids::COMMON_NAME, "CN", OidKind::Attribute),
    ("2.5.4.4", "SN", OidKind::Attribute),
    ("2.5.4.5", "serialNumber", OidKind::Attribute),
    (oids::COUNTRY, "C", OidKind::Attribute),
    (oids::LOCALITY, "L", OidKind::Attribute),
    (oids::STATE, "ST", OidKind::Attribute),
    ("2.5.4.9", "street", OidKind::Attribute),
    (oids::ORGANIZATION, "O", OidKind::Attribute),
    (oids::ORGANIZATIONAL_UNIT, "OU", OidKind::Attribute),
    ("2.5.4.12", "title", OidKind::Attribute),
    ("2.5.4.42", "GN", OidKind::Attribute),
    ("1.2.840.113549.1.9.1", "emailAddress", OidKind::Attribute),
    ("0.9.2342.19200300.100.1.1", "UID", OidKind::Attribute),
    ("0.9.2342.19200300.100.1.25", "DC", OidKind::Attribute),
    // Key algorithms
    (oids::RSA_ENCRYPTION, "RSA", OidKind::KeyAlgorithm),
    (oids::EC_PUBLIC_KEY, "EC", OidKind::KeyAlgorithm),
    (oids::DSA, "DSA", OidKind::KeyAlgorithm),
    (oids::X25519, "X25519", OidKind::KeyAlgorithm),
    (oids::X448, "X448", OidKind::KeyAlgorithm),
    (oids::ED25519, "Ed25519", OidKind::KeyAlgorithm),
    (oids::ED448, "Ed448", OidKind::KeyAlgorithm),
    // Signature algorithms
    ("1.2.840.113549.1.1.5", "sha1WithRSAEncryption", OidKind::SignatureAlgorithm),
    ("1.2.840.113549.1.1.10", "RSASSA-PSS", OidKind::SignatureAlgorithm),
    ("1.2.840.113549.1.1.11", "sha256WithRSAEncryption", OidKind::SignatureAlgorithm),
    ("1.2.840.113549.1.1.12", "sha384WithRSAEncryption", OidKind::SignatureAlgorithm),
    ("1.2.840.113549.1.1.13", "sha512WithRSAEncryption", OidKind::SignatureAlgorithm),
    ("1.2.840.10045.4.3.2", "ecdsa-with-SHA256", OidKind::SignatureAlgorithm),
    ("1.2.840.10045.4.3.3", "ecdsa-with-SHA384", OidKind::SignatureAlgorithm),
    ("1.2.840.10045.4.3.4", "ecdsa-with-SHA512", OidKind::SignatureAlgorithm),
    // Named curves
    ("1.2.840.10045.3.1.7", "P-256", OidKind::Curve),
    ("1.3.132.0.34", "P-384", OidKind::Curve),
    ("1.3.132.0.35", "P-521", OidKind::Curve),
    ("1.3.132.0.10", "secp256k1", OidKind::Curve),
    // Extensions
    (oids::SUBJECT_KEY_IDENTIFIER, "SubjectKeyIdentifier", OidKind::Extension),
    (oids::KEY_USAGE, "KeyUsage", OidKind::Extension),
    (oids::SUBJECT_ALT_NAME, "SubjectAltName", OidKind::Extension),
    (oids::BASIC_CONSTRAINTS, "BasicConstraints", OidKind::Extension),
    (oids::AUTHORITY_KEY_IDENTIFIER, "AuthorityKeyIdentifier", OidKind::Extension),
    (oids::EXTENDED_KEY_USAGE, "ExtendedKeyUsage", OidKind::Extension),
    // PKCS#9 request attributes
    ("1.2.840.113549.1.9.7", "challengePassword", OidKind::RequestAttribute),
    (oids::EXTENSION_REQUEST, "extensionRequest", OidKind::RequestAttribute),
];

static BY_OID: Lazy<HashMap<&'static str, OidEntry>> = Lazy::new(|| {
    ENTRIES
        .iter()
        .map(|&(oid, name, kind)| (oid, OidEntry { oid, name, kind }))
        .collect()
});

static ATTRIBUTE_BY_NAME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    ENTRIES
        .iter()
        .filter(|(_, _, kind)| *kind == OidKind::Attribute)
        .map(|&(oid, name, _)| (name, oid))
        .collect()
});

/// Look up a dotted OID
#[must_use]
pub fn lookup(oid: &str) -> Option<&'static OidEntry> {
    BY_OID.get(oid)
}

/// Short name for a dotted OID, if registered
#[must_use]
pub fn name_of(oid: &str) -> Option<&'static str> {
    lookup(oid).map(|entry| entry.name)
}

/// Short name when registered as `kind`, otherwise the dotted OID verbatim
#[must_use]
pub fn display_name(oid: &str, kind: OidKind) -> &str {
    name_of_kind(oid, kind).unwrap_or(oid)
}

/// Short name only if the OID is registered as `kind`
#[must_use]
pub fn name_of_kind(oid: &str, kind: OidKind) -> Option<&'static str> {
    lookup(oid).filter(|entry| entry.kind == kind).map(|entry| entry.name)
}

/// Dotted OID for a distinguished-name attribute short name, e.g. `"CN"`
#[must_use]
pub fn attribute_oid(name: &str) -> Option<&'static str> {
    ATTRIBUTE_BY_NAME.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_kind() {
        assert_eq!(name_of(oids::COMMON_NAME), Some("CN"));
        assert_eq!(name_of_kind("1.3.132.0.34", OidKind::Curve), Some("P-384"));
        assert_eq!(name_of_kind("1.3.132.0.34", OidKind::Attribute), None);
        assert_eq!(
            lookup(oids::EXTENSION_REQUEST).map(|entry| entry.kind),
            Some(OidKind::RequestAttribute)
        );
    }

    #[test]
    fn test_unregistered_oid_displays_dotted() {
        assert_eq!(display_name("1.2.3.4.5", OidKind::Attribute), "1.2.3.4.5");
        assert_eq!(display_name(oids::ORGANIZATION, OidKind::Attribute), "O");
        assert_eq!(
            display_name("1.2.840.113549.1.1.1", OidKind::Attribute),
            "1.2.840.113549.1.1.1"
        );
    }

    #[test]
    fn test_reverse_attribute_lookup() {
        assert_eq!(attribute_oid("OU"), Some(oids::ORGANIZATIONAL_UNIT));
        assert_eq!(attribute_oid("DC"), Some("0.9.2342.19200300.100.1.25"));
        assert_eq!(attribute_oid("RSA"), None);
    }

    #[test]
    fn test_oids_are_unique() {
        assert_eq!(BY_OID.len(), ENTRIES.len());
    }
}
