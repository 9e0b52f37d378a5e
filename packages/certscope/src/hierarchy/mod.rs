//! CA trust forest assembly
//!
//! Links flat [`CaSummary`] records into rooted [`CaNode`] trees. Explicit
//! parent ids are authoritative; key identifier matching is a fallback that
//! never guesses between several candidates.

mod assemble;
mod types;

pub use assemble::{assemble, assemble_at};
pub use types::{Assembly, CaNode, CaSummary, Nodes, ParentRef, SELF_SIGNED};
