//! CA records in and CA forest out

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AssemblyWarning;
use crate::status::Status;
use crate::x509::{DecodedCertificate, DistinguishedName, PublicKeyInfo};

/// Wire value of the parent reference meaning "this CA is a root"
pub const SELF_SIGNED: &str = "self-signed";

/// Explicit parent reference reported by the backend
///
/// Serialized as `null`, `"self-signed"` or the parent's id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ParentRef {
    /// A root
    SelfSigned,
    /// Id of the parent record
    Id(String),
    /// Not reported; the key identifiers decide
    #[default]
    Unknown,
}

impl From<Option<String>> for ParentRef {
    fn from(value: Option<String>) -> Self {
        match value {
            None => Self::Unknown,
            Some(id) if id.is_empty() => Self::Unknown,
            Some(id) if id == SELF_SIGNED => Self::SelfSigned,
            Some(id) => Self::Id(id),
        }
    }
}

impl From<ParentRef> for Option<String> {
    fn from(value: ParentRef) -> Self {
        match value {
            ParentRef::SelfSigned => Some(SELF_SIGNED.to_string()),
            ParentRef::Id(id) => Some(id),
            ParentRef::Unknown => None,
        }
    }
}

/// One CA as reported by the backend, or derived from a decoded certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaSummary {
    /// Backend id
    pub id: String,
    /// Display name
    pub name: String,
    /// Explicit parent as reported
    #[serde(default, rename = "parent_id")]
    pub parent: ParentRef,
    /// Subject key identifier, if known
    #[serde(
        default,
        rename = "subject_key_identifier",
        with = "crate::serde_hex::option"
    )]
    pub subject_key_id: Option<Vec<u8>>,
    /// Authority key identifier, if known
    #[serde(
        default,
        rename = "authority_key_identifier",
        with = "crate::serde_hex::option"
    )]
    pub authority_key_id: Option<Vec<u8>>,
    /// Start of the validity window
    pub not_before: DateTime<Utc>,
    /// End of the validity window
    pub not_after: DateTime<Utc>,
    /// Revocation flag from the backend
    #[serde(default)]
    pub revoked: bool,
    /// Subject name when taken from a certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<DistinguishedName>,
    /// Key description when taken from a certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<PublicKeyInfo>,
}

impl CaSummary {
    /// Summary whose identifiers, validity, subject and key come from `cert`
    #[must_use]
    pub fn from_certificate(
        id: impl Into<String>,
        name: impl Into<String>,
        parent: ParentRef,
        cert: &DecodedCertificate,
        revoked: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent,
            subject_key_id: cert.extensions.subject_key_identifier().map(<[u8]>::to_vec),
            authority_key_id: cert
                .extensions
                .authority_key_identifier()
                .map(<[u8]>::to_vec),
            not_before: cert.validity.not_before,
            not_after: cert.validity.not_after,
            revoked,
            subject: Some(cert.subject.clone()),
            public_key: Some(cert.public_key.clone()),
        }
    }
}

/// One CA in the assembled forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaNode {
    /// Id of the source record
    pub id: String,
    /// Display name
    pub name: String,
    /// Lifecycle status at assembly time
    pub status: Status,
    /// Subject name, if known
    pub subject: Option<DistinguishedName>,
    /// Key description, if known
    pub public_key: Option<PublicKeyInfo>,
    /// Subject key identifier, if known
    #[serde(with = "crate::serde_hex::option")]
    pub subject_key_id: Option<Vec<u8>>,
    /// Authority key identifier, if known
    #[serde(with = "crate::serde_hex::option")]
    pub authority_key_id: Option<Vec<u8>>,
    /// Parent reference as reported, not necessarily the node it ended up under
    pub parent: ParentRef,
    /// Children in input order
    pub children: Vec<CaNode>,
}

impl CaNode {
    /// This node and all of its descendants, depth first
    pub fn iter(&self) -> Nodes<'_> {
        Nodes { stack: vec![self] }
    }
}

/// Result of [`assemble`](super::assemble): the forest plus every warning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Assembly {
    /// Roots in input order
    pub roots: Vec<CaNode>,
    /// Non-fatal findings, in the order they were raised
    pub warnings: Vec<AssemblyWarning>,
}

impl Assembly {
    /// Every node, depth first, roots in order
    pub fn iter(&self) -> Nodes<'_> {
        Nodes {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Number of nodes across all trees
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// First node with the given id, depth first
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&CaNode> {
        self.iter().find(|node| node.id == id)
    }
}

/// Depth-first, pre-order walk over a forest
pub struct Nodes<'a> {
    stack: Vec<&'a CaNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a CaNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
