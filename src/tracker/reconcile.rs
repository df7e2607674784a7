//! Change detection between consecutive scans.

use crate::result::Reference;

/// Outcome of comparing two scans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Whether the new scan should replace the stored one.
    pub changed: bool,

    /// Growth in entry count, never negative. This approximates "new
    /// entries"; it is not a set difference.
    pub added_count: usize,
}

/// Compare `next` against `previous` position by position.
///
/// Scans differ when their lengths differ or any position carries a
/// different id, so a reordering of the same entries counts as a change.
#[must_use]
pub fn reconcile(previous: &[Reference], next: &[Reference]) -> Reconciliation {
    let changed = previous.len() != next.len()
        || previous.iter().zip(next).any(|(before, after)| before.id != after.id);

    Reconciliation {
        changed,
        added_count: next.len().saturating_sub(previous.len()),
    }
}
