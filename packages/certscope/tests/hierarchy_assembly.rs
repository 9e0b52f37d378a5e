//! CA forest assembly: explicit links, key identifier fallback, warnings

use certscope::hierarchy::{assemble_at, Assembly, CaNode, CaSummary, ParentRef};
use certscope::{
    assemble_hierarchy, decode, extract_certificate, AssemblyWarning, InspectConfig, Status,
};
use chrono::{DateTime, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap()
}

fn record(id: &str, parent: ParentRef, ski: Option<&str>, aki: Option<&str>) -> CaSummary {
    CaSummary {
        id: id.to_string(),
        name: format!("{id} CA"),
        parent,
        subject_key_id: ski.map(|key| key.as_bytes().to_vec()),
        authority_key_id: aki.map(|key| key.as_bytes().to_vec()),
        not_before: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        not_after: Utc.with_ymd_and_hms(2035, 1, 1, 0, 0, 0).unwrap(),
        revoked: false,
        subject: None,
        public_key: None,
    }
}

fn parent(id: &str) -> ParentRef {
    ParentRef::Id(id.to_string())
}

fn ids(nodes: &[CaNode]) -> Vec<&str> {
    nodes.iter().map(|node| node.id.as_str()).collect()
}

fn assemble(records: &[CaSummary]) -> Assembly {
    assemble_at(records, now(), None)
}

/// No node appears twice and no node is its own descendant
fn assert_acyclic(assembly: &Assembly) {
    let mut seen = std::collections::HashSet::new();
    for node in assembly.iter() {
        assert!(seen.insert(node.id.as_str()), "{} appears twice", node.id);
        assert!(node.iter().skip(1).all(|descendant| descendant.id != node.id));
    }
}

#[test]
fn test_explicit_parents() {
    let records = [
        record("issuing", parent("intermediate"), None, None),
        record("intermediate", parent("root"), None, None),
        record("root", ParentRef::SelfSigned, None, None),
    ];
    let assembly = assemble(&records);

    assert!(assembly.warnings.is_empty());
    assert_eq!(ids(&assembly.roots), vec!["root"]);
    let root = &assembly.roots[0];
    assert_eq!(ids(&root.children), vec!["intermediate"]);
    assert_eq!(ids(&root.children[0].children), vec!["issuing"]);
    assert_eq!(assembly.node_count(), 3);
    assert_eq!(assembly.find("issuing").unwrap().name, "issuing CA");
    assert_eq!(assembly.find("issuing").unwrap().status, Status::Active);
}

#[test]
fn test_three_node_cycle_is_broken() {
    let records = [
        record("A", parent("B"), None, None),
        record("B", parent("C"), None, None),
        record("C", parent("A"), None, None),
    ];
    let assembly = assemble(&records);

    assert_eq!(assembly.node_count(), 3);
    assert_acyclic(&assembly);
    assert_eq!(ids(&assembly.roots), vec!["C"]);
    assert_eq!(ids(&assembly.roots[0].children), vec!["B"]);
    assert_eq!(ids(&assembly.roots[0].children[0].children), vec!["A"]);
    assert_eq!(
        assembly.warnings,
        vec![AssemblyWarning::CycleBroken {
            id: "C".into(),
            parent: "A".into(),
        }]
    );
}

#[test]
fn test_key_identifier_cycle_is_broken() {
    let records = [
        record("A", ParentRef::Unknown, Some("ka"), Some("kb")),
        record("B", ParentRef::Unknown, Some("kb"), Some("ka")),
    ];
    let assembly = assemble(&records);

    assert_acyclic(&assembly);
    assert_eq!(ids(&assembly.roots), vec!["B"]);
    assert_eq!(ids(&assembly.roots[0].children), vec!["A"]);
    assert!(matches!(
        assembly.warnings.as_slice(),
        [AssemblyWarning::CycleBroken { id, .. }] if id == "B"
    ));
}

#[test]
fn test_ambiguous_key_identifier_match() {
    let records = [
        record("imported", ParentRef::Unknown, Some("leaf"), Some("shared")),
        record("X", ParentRef::SelfSigned, Some("shared"), None),
        record("Y", ParentRef::SelfSigned, Some("shared"), None),
    ];
    let assembly = assemble(&records);

    assert_eq!(ids(&assembly.roots), vec!["imported", "X", "Y"]);
    assert!(assembly.roots.iter().all(|root| root.children.is_empty()));
    assert_eq!(
        assembly.warnings,
        vec![AssemblyWarning::AmbiguousParentMatch {
            id: "imported".into(),
            candidates: vec!["X".into(), "Y".into()],
        }]
    );
}

#[test]
fn test_key_identifier_fallback() {
    let records = [
        record("root", ParentRef::SelfSigned, Some("root-key"), None),
        record("imported", ParentRef::Unknown, Some("sub-key"), Some("root-key")),
        record("orphan", ParentRef::Unknown, None, Some("missing-key")),
    ];
    let assembly = assemble(&records);

    assert!(assembly.warnings.is_empty());
    assert_eq!(ids(&assembly.roots), vec!["root", "orphan"]);
    assert_eq!(ids(&assembly.roots[0].children), vec!["imported"]);
}

#[test]
fn test_explicit_parent_wins_over_key_identifiers() {
    let records = [
        record("a", ParentRef::SelfSigned, Some("k1"), None),
        record("b", ParentRef::SelfSigned, Some("k2"), None),
        record("c", parent("b"), None, Some("k1")),
    ];
    let assembly = assemble(&records);

    assert!(assembly.find("a").unwrap().children.is_empty());
    assert_eq!(ids(&assembly.find("b").unwrap().children), vec!["c"]);
}

#[test]
fn test_unresolved_explicit_parent() {
    let records = [
        record("root", ParentRef::SelfSigned, Some("root-key"), None),
        record("lost", parent("ghost"), None, None),
        record("rescued", parent("ghost"), None, Some("root-key")),
    ];
    let assembly = assemble(&records);

    assert_eq!(ids(&assembly.roots), vec!["root", "lost"]);
    assert_eq!(ids(&assembly.roots[0].children), vec!["rescued"]);
    assert_eq!(
        assembly.warnings,
        vec![AssemblyWarning::UnresolvedParent {
            id: "lost".into(),
            parent: "ghost".into(),
        }]
    );
}

#[test]
fn test_self_references_become_roots() {
    let records = [
        record("own-parent", parent("own-parent"), None, None),
        record("self-issued", ParentRef::Unknown, Some("k"), Some("k")),
        record("other", ParentRef::Unknown, Some("k"), None),
    ];
    let assembly = assemble(&records);

    assert!(assembly.warnings.is_empty());
    assert_eq!(ids(&assembly.roots), vec!["own-parent", "self-issued", "other"]);
}

#[test]
fn test_children_follow_input_order_and_runs_are_stable() {
    let records = [
        record("c2", parent("root"), None, None),
        record("root", ParentRef::SelfSigned, None, None),
        record("c1", parent("root"), None, None),
        record("c3", parent("root"), None, None),
    ];
    let first = assemble(&records);
    assert_eq!(ids(&first.roots[0].children), vec!["c2", "c1", "c3"]);
    assert_eq!(first, assemble(&records));
}

#[test]
fn test_duplicate_ids_link_to_first() {
    let mut second = record("dup", ParentRef::SelfSigned, None, None);
    second.name = "second".into();
    let records = [
        record("dup", ParentRef::SelfSigned, None, None),
        second,
        record("child", parent("dup"), None, None),
    ];
    let assembly = assemble(&records);

    assert_eq!(assembly.node_count(), 3);
    assert_eq!(ids(&assembly.roots), vec!["dup", "dup"]);
    assert_eq!(ids(&assembly.roots[0].children), vec!["child"]);
    assert!(assembly.roots[1].children.is_empty());
}

#[test]
fn test_status_uses_expiring_window() {
    let mut soon = record("soon", ParentRef::SelfSigned, None, None);
    soon.not_after = now() + chrono::Duration::days(10);
    let mut revoked = record("revoked", parent("soon"), None, None);
    revoked.revoked = true;
    let mut expired = record("expired", parent("soon"), None, None);
    expired.not_after = now() - chrono::Duration::days(1);

    let assembly = assemble_hierarchy(&[soon, revoked, expired], &InspectConfig::default(), now());
    assert_eq!(assembly.find("soon").unwrap().status, Status::Expiring);
    assert_eq!(assembly.find("revoked").unwrap().status, Status::Revoked);
    assert_eq!(assembly.find("expired").unwrap().status, Status::Expired);
}

#[test]
fn test_summaries_from_certificates() {
    let root_der = include_bytes!("fixtures/rsa_ca.der");
    let intermediate_der = include_bytes!("fixtures/ec_p384_intermediate.der");
    let root = extract_certificate(&decode(root_der).unwrap()).unwrap();
    let intermediate = extract_certificate(&decode(intermediate_der).unwrap()).unwrap();

    let records = [
        CaSummary::from_certificate("int-1", "Issuing CA 1", ParentRef::Unknown, &intermediate, false),
        CaSummary::from_certificate("root", "Root CA", ParentRef::Unknown, &root, false),
    ];
    assert_eq!(records[0].authority_key_id, records[1].subject_key_id);

    let assembly = assemble(&records);
    assert!(assembly.warnings.is_empty());
    assert_eq!(ids(&assembly.roots), vec!["root"]);
    let child = &assembly.roots[0].children[0];
    assert_eq!(child.id, "int-1");
    assert_eq!(child.status, Status::Active);
    assert_eq!(
        child.subject.as_ref().and_then(|dn| dn.common_name()),
        Some("Certscope Issuing CA 1")
    );
    assert_eq!(child.public_key.as_ref().unwrap().to_string(), "EC (P-384)");
}

#[test]
fn test_summary_from_backend_json() {
    let json = r#"[
        {"id": "root", "name": "Root", "parent_id": "self-signed",
         "subject_key_identifier": "12:22:A0:F7",
         "not_before": "2025-01-01T00:00:00Z", "not_after": "2035-01-01T00:00:00Z"},
        {"id": "sub", "name": "Sub", "parent_id": null,
         "authority_key_identifier": "1222a0f7",
         "not_before": "2025-01-01T00:00:00Z", "not_after": "2035-01-01T00:00:00Z",
         "revoked": true}
    ]"#;
    let records: Vec<CaSummary> = serde_json::from_str(json).unwrap();

    assert_eq!(records[0].parent, ParentRef::SelfSigned);
    assert_eq!(records[1].parent, ParentRef::Unknown);
    assert_eq!(records[0].subject_key_id.as_deref(), Some(&[0x12, 0x22, 0xA0, 0xF7][..]));

    let assembly = assemble(&records);
    let sub = &assembly.roots[0].children[0];
    assert_eq!(sub.id, "sub");
    assert_eq!(sub.status, Status::Revoked);

    let round_trip = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(round_trip["parent_id"], "self-signed");
    assert_eq!(round_trip["subject_key_identifier"], "1222a0f7");
}
