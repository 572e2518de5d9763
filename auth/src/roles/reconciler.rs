use std::collections::BTreeSet;

/// Changes needed to turn a current role assignment into a desired one.
///
/// `to_add` and `to_remove` are always disjoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDiff<T: Ord> {
    pub to_add: BTreeSet<T>,
    pub to_remove: BTreeSet<T>,
}

impl<T: Ord + Clone> RoleDiff<T> {
    /// True when the current assignment already equals the desired one.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Apply the diff to `current`, yielding the assignment it was computed for.
    pub fn apply(&self, current: &BTreeSet<T>) -> BTreeSet<T> {
        current
            .difference(&self.to_remove)
            .chain(self.to_add.iter())
            .cloned()
            .collect()
    }
}

/// Compute the role additions and removals between two assignments.
///
/// # Arguments
/// * `current` - Roles currently assigned
/// * `desired` - Roles that should be assigned
///
/// # Returns
/// `desired - current` as additions and `current - desired` as removals
pub fn reconcile<T: Ord + Clone>(current: &BTreeSet<T>, desired: &BTreeSet<T>) -> RoleDiff<T> {
    RoleDiff {
        to_add: desired.difference(current).cloned().collect(),
        to_remove: current.difference(desired).cloned().collect(),
    }
}
