//! Two-pass linking of CA records into a forest
//!
//! Pass one honours explicit parent ids. Pass two matches the authority key
//! identifier of every record still unplaced against the subject key
//! identifiers of all records, and only links on a unique match. Every
//! accepted link is checked against the ancestors already accepted, so the
//! parent relation stays acyclic throughout.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use certscope_common::LoggingTransformer;

use super::types::{Assembly, CaNode, CaSummary, ParentRef};
use crate::errors::AssemblyWarning;
use crate::status::{classify, classify_with_horizon};

/// Where pass one left a record
enum Placement {
    /// Root or linked; pass two skips it
    Settled,
    /// No explicit parent
    Unplaced,
    /// Explicit parent id absent from the records
    Dangling(String),
}

struct Linker<'r> {
    records: &'r [CaSummary],
    parents: Vec<Option<usize>>,
    warnings: Vec<AssemblyWarning>,
}

impl Linker<'_> {
    /// Link `child` under `parent` unless `child` is already an ancestor of `parent`
    fn link(&mut self, child: usize, parent: usize) {
        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                self.warn(AssemblyWarning::CycleBroken {
                    id: self.records[child].id.clone(),
                    parent: self.records[parent].id.clone(),
                });
                return;
            }
            cursor = self.parents[ancestor];
        }
        tracing::debug!(
            node_id = %self.records[child].id,
            parent_id = %self.records[parent].id,
            "linked CA"
        );
        self.parents[child] = Some(parent);
    }

    fn warn(&mut self, warning: AssemblyWarning) {
        LoggingTransformer::log_assembly_warning(warning.id(), &warning);
        self.warnings.push(warning);
    }
}

/// Assemble against the current time, without an expiring horizon
#[must_use]
pub fn assemble(records: &[CaSummary]) -> Assembly {
    assemble_at(records, Utc::now(), None)
}

/// Assemble the forest, classifying every node at `now`
///
/// With `expiring_window` set, nodes whose remaining lifetime falls inside it
/// are reported as [`Status::Expiring`](crate::status::Status::Expiring).
#[must_use]
pub fn assemble_at(
    records: &[CaSummary],
    now: DateTime<Utc>,
    expiring_window: Option<Duration>,
) -> Assembly {
    let mut by_id: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut by_ski: HashMap<&[u8], Vec<usize>> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        by_id.entry(record.id.as_str()).or_insert(index);
        if let Some(ski) = record.subject_key_id.as_deref() {
            by_ski.entry(ski).or_default().push(index);
        }
    }

    let mut linker = Linker {
        records,
        parents: vec![None; records.len()],
        warnings: Vec::new(),
    };

    // Pass one: explicit parents
    let mut placements = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let placement = match &record.parent {
            ParentRef::SelfSigned => Placement::Settled,
            ParentRef::Unknown => Placement::Unplaced,
            ParentRef::Id(parent_id) => match by_id.get(parent_id.as_str()) {
                Some(&parent) if parent == index => Placement::Settled,
                Some(&parent) => {
                    linker.link(index, parent);
                    Placement::Settled
                }
                None => Placement::Dangling(parent_id.clone()),
            },
        };
        placements.push(placement);
    }

    // Pass two: authority key identifier fallback
    for (index, placement) in placements.into_iter().enumerate() {
        let dangling = match placement {
            Placement::Settled => continue,
            Placement::Unplaced => None,
            Placement::Dangling(parent_id) => Some(parent_id),
        };
        let record = &records[index];

        let candidates: &[usize] = match record.authority_key_id.as_deref() {
            Some(aki) if record.subject_key_id.as_deref() == Some(aki) => continue,
            Some(aki) => by_ski.get(aki).map_or(&[][..], Vec::as_slice),
            None => &[][..],
        };
        let candidates: Vec<usize> = candidates.iter().copied().filter(|&c| c != index).collect();

        match candidates.as_slice() {
            [parent] => linker.link(index, *parent),
            [] => {
                if let Some(parent) = dangling {
                    linker.warn(AssemblyWarning::UnresolvedParent {
                        id: record.id.clone(),
                        parent,
                    });
                }
            }
            many => {
                let candidates = many.iter().map(|&c| records[c].id.clone()).collect();
                linker.warn(AssemblyWarning::AmbiguousParentMatch {
                    id: record.id.clone(),
                    candidates,
                });
            }
        }
    }

    let Linker {
        parents, warnings, ..
    } = linker;
    let roots = build_forest(records, &parents, now, expiring_window);
    let assembly = Assembly { roots, warnings };

    LoggingTransformer::log_assembly_summary(
        records.len(),
        assembly.roots.len(),
        assembly.warnings.len(),
    );
    assembly
}

/// Materialize the parent links as owned trees without recursion
fn build_forest(
    records: &[CaSummary],
    parents: &[Option<usize>],
    now: DateTime<Utc>,
    expiring_window: Option<Duration>,
) -> Vec<CaNode> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut root_indices = Vec::new();
    for (index, parent) in parents.iter().enumerate() {
        match parent {
            Some(parent) => children[*parent].push(index),
            None => root_indices.push(index),
        }
    }

    // Pre-order puts every parent before its children, so building in
    // reverse pre-order finds all children already built.
    let mut preorder = Vec::with_capacity(records.len());
    let mut stack: Vec<usize> = root_indices.iter().rev().copied().collect();
    while let Some(index) = stack.pop() {
        preorder.push(index);
        stack.extend(children[index].iter().rev());
    }

    let mut built: Vec<Option<CaNode>> = vec![None; records.len()];
    for &index in preorder.iter().rev() {
        let record = &records[index];
        let status = match expiring_window {
            Some(horizon) => classify_with_horizon(
                record.not_before,
                record.not_after,
                record.revoked,
                now,
                horizon,
            ),
            None => classify(record.not_before, record.not_after, record.revoked, now),
        };
        let node_children = children[index]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = Some(CaNode {
            id: record.id.clone(),
            name: record.name.clone(),
            status,
            subject: record.subject.clone(),
            public_key: record.public_key.clone(),
            subject_key_id: record.subject_key_id.clone(),
            authority_key_id: record.authority_key_id.clone(),
            parent: record.parent.clone(),
            children: node_children,
        });
    }

    root_indices
        .into_iter()
        .filter_map(|index| built[index].take())
        .collect()
}
