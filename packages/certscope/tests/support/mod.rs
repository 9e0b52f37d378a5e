//! DER builders shared by the integration tests
#![allow(dead_code)]

use certscope::der::oid;

pub fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    let len = content.len();
    if len < 0x80 {
        out.push(len as u8);
    } else {
        let bytes = len.to_be_bytes();
        let skip = bytes.iter().take_while(|&&b| b == 0).count();
        out.push(0x80 | (bytes.len() - skip) as u8);
        out.extend_from_slice(&bytes[skip..]);
    }
    out.extend_from_slice(content);
    out
}

fn concat(parts: &[Vec<u8>]) -> Vec<u8> {
    parts.iter().flatten().copied().collect()
}

pub fn seq(parts: &[Vec<u8>]) -> Vec<u8> {
    tlv(0x30, &concat(parts))
}

pub fn set(parts: &[Vec<u8>]) -> Vec<u8> {
    tlv(0x31, &concat(parts))
}

/// Constructed context-specific `[n]`
pub fn explicit(n: u8, parts: &[Vec<u8>]) -> Vec<u8> {
    tlv(0xA0 | n, &concat(parts))
}

/// Primitive context-specific `[n]`
pub fn implicit(n: u8, content: &[u8]) -> Vec<u8> {
    tlv(0x80 | n, content)
}

pub fn oid(dotted: &str) -> Vec<u8> {
    let content = oid::encode(dotted).expect("valid test oid");
    tlv(0x06, &content)
}

pub fn int(content: &[u8]) -> Vec<u8> {
    tlv(0x02, content)
}

pub fn boolean(value: bool) -> Vec<u8> {
    tlv(0x01, &[if value { 0xFF } else { 0x00 }])
}

pub fn octets(content: &[u8]) -> Vec<u8> {
    tlv(0x04, content)
}

pub fn bits(content: &[u8]) -> Vec<u8> {
    let mut value = vec![0x00];
    value.extend_from_slice(content);
    tlv(0x03, &value)
}

pub fn utf8(value: &str) -> Vec<u8> {
    tlv(0x0C, value.as_bytes())
}

pub fn printable(value: &str) -> Vec<u8> {
    tlv(0x13, value.as_bytes())
}

pub fn utc_time(value: &str) -> Vec<u8> {
    tlv(0x17, value.as_bytes())
}

pub fn generalized_time(value: &str) -> Vec<u8> {
    tlv(0x18, value.as_bytes())
}

/// Name with one single-valued RDN per attribute, in the given order
pub fn name(attributes: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let rdns: Vec<Vec<u8>> = attributes
        .iter()
        .map(|(attr_oid, value)| set(&[seq(&[oid(attr_oid), value.clone()])]))
        .collect();
    seq(&rdns)
}

pub fn extension(ext_oid: &str, critical: bool, value: Vec<u8>) -> Vec<u8> {
    if critical {
        seq(&[oid(ext_oid), boolean(true), octets(&value)])
    } else {
        seq(&[oid(ext_oid), octets(&value)])
    }
}

pub fn ed25519_spki() -> Vec<u8> {
    seq(&[seq(&[oid("1.3.101.112")]), bits(&[0x11; 32])])
}

pub fn ecdsa_sha256() -> Vec<u8> {
    seq(&[oid("1.2.840.10045.4.3.2")])
}

/// Minimal certificate with overridable parts
pub struct CertBuilder {
    pub version: Option<u8>,
    pub serial: Vec<u8>,
    pub issuer: Vec<u8>,
    pub not_before: Vec<u8>,
    pub not_after: Vec<u8>,
    pub subject: Vec<u8>,
    pub spki: Vec<u8>,
    pub extensions: Option<Vec<Vec<u8>>>,
}

impl Default for CertBuilder {
    fn default() -> Self {
        let dn = name(&[
            ("2.5.4.6", printable("US")),
            ("2.5.4.10", utf8("Example")),
            ("2.5.4.3", utf8("Example CA")),
        ]);
        Self {
            version: Some(2),
            serial: int(&[0x01]),
            issuer: dn.clone(),
            not_before: utc_time("250101000000Z"),
            not_after: utc_time("350101000000Z"),
            subject: dn,
            spki: ed25519_spki(),
            extensions: None,
        }
    }
}

impl CertBuilder {
    pub fn tbs(&self) -> Vec<u8> {
        let mut parts = Vec::new();
        if let Some(version) = self.version {
            parts.push(explicit(0, &[int(&[version])]));
        }
        parts.push(self.serial.clone());
        parts.push(ecdsa_sha256());
        parts.push(self.issuer.clone());
        parts.push(seq(&[self.not_before.clone(), self.not_after.clone()]));
        parts.push(self.subject.clone());
        parts.push(self.spki.clone());
        if let Some(extensions) = &self.extensions {
            parts.push(explicit(3, &[seq(extensions)]));
        }
        seq(&parts)
    }

    pub fn build(&self) -> Vec<u8> {
        seq(&[self.tbs(), ecdsa_sha256(), bits(&[0x01, 0x02, 0x03])])
    }
}
