//! PKCS#10 request extraction

mod support;

use certscope::registry::oids;
use certscope::x509::{extract_csr, BasicConstraints, GeneralName, KeyParameters};
use certscope::{decode, inspect_csr, ExtractError, InspectConfig};
use support::*;

const CSR_DER: &[u8] = include_bytes!("fixtures/ec_p256.csr.der");

fn request(info: Vec<u8>) -> Vec<u8> {
    seq(&[info, ecdsa_sha256(), bits(&[0x01])])
}

fn subject() -> Vec<u8> {
    name(&[("2.5.4.3", utf8("device-17"))])
}

#[test]
fn test_openssl_request() {
    let csr = inspect_csr(CSR_DER, &InspectConfig::default()).unwrap();

    let pairs: Vec<(&str, &str)> = csr.subject.pairs().collect();
    assert_eq!(
        pairs,
        vec![
            ("C", "DE"),
            ("ST", "Berlin"),
            ("O", "Leaf Org"),
            ("CN", "leaf.example.test"),
        ]
    );
    assert_eq!(csr.public_key.algorithm, "EC");
    assert_eq!(
        csr.public_key.parameters,
        KeyParameters::NamedCurve("P-256".into())
    );
    assert_eq!(csr.signature_algorithm, "ecdsa-with-SHA256");
    assert!(csr.other_attributes.is_empty());

    let requested = csr.requested_extensions.unwrap();
    assert_eq!(requested.len(), 2);
    assert_eq!(
        requested.subject_alt_names().unwrap(),
        &[
            GeneralName::Dns("leaf.example.test".into()),
            GeneralName::Dns("www.leaf.example.test".into()),
        ]
    );
    assert_eq!(
        requested.basic_constraints(),
        Some(BasicConstraints {
            is_ca: false,
            path_length: None,
        })
    );
}

#[test]
fn test_request_without_attributes() {
    let der = request(seq(&[int(&[0x00]), subject(), ed25519_spki()]));
    let csr = extract_csr(&decode(&der).unwrap()).unwrap();

    assert_eq!(csr.subject.common_name(), Some("device-17"));
    assert_eq!(csr.requested_extensions, None);
    assert!(csr.other_attributes.is_empty());
}

#[test]
fn test_other_attributes_are_listed() {
    let challenge = seq(&[oid("1.2.840.113549.1.9.7"), set(&[utf8("s3cret")])]);
    let extension_request = seq(&[
        oid(oids::EXTENSION_REQUEST),
        set(&[seq(&[extension(
            oids::BASIC_CONSTRAINTS,
            true,
            seq(&[boolean(true), int(&[0x02])]),
        )])]),
    ]);
    let der = request(seq(&[
        int(&[0x00]),
        subject(),
        ed25519_spki(),
        explicit(0, &[challenge, extension_request]),
    ]));
    let csr = extract_csr(&decode(&der).unwrap()).unwrap();

    assert_eq!(csr.other_attributes, vec!["1.2.840.113549.1.9.7".to_string()]);
    let requested = csr.requested_extensions.unwrap();
    assert!(requested.get(oids::BASIC_CONSTRAINTS).unwrap().critical);
    assert_eq!(
        requested.basic_constraints(),
        Some(BasicConstraints {
            is_ca: true,
            path_length: Some(2),
        })
    );
}

#[test]
fn test_malformed_requests() {
    let wrong_version = request(seq(&[int(&[0x01]), subject(), ed25519_spki()]));
    assert_eq!(
        extract_csr(&decode(&wrong_version).unwrap()).unwrap_err(),
        ExtractError::MalformedStructure("certification_request_info.version")
    );

    let missing_key = request(seq(&[int(&[0x00]), subject()]));
    assert_eq!(
        extract_csr(&decode(&missing_key).unwrap()).unwrap_err(),
        ExtractError::MalformedStructure("subject_public_key_info")
    );

    let bad_extension_request = request(seq(&[
        int(&[0x00]),
        subject(),
        ed25519_spki(),
        explicit(0, &[seq(&[oid(oids::EXTENSION_REQUEST), seq(&[])])]),
    ]));
    assert_eq!(
        extract_csr(&decode(&bad_extension_request).unwrap()).unwrap_err(),
        ExtractError::MalformedStructure("attributes.extension_request")
    );
}
