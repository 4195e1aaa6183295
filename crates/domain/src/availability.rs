//! Complement-set computation between assigned roles and the catalog.

use std::collections::HashSet;

use crate::role::{Role, RoleId};

/// Returns the catalog roles not currently assigned to the subject.
///
/// Pure and deterministic: builds an identifier set over the assigned roles,
/// then keeps catalog entries whose id is absent, preserving the catalog's
/// original order. Runs in O(|assigned| + |catalog|).
#[must_use]
pub fn available_for_assignment(assigned: &[Role], catalog: &[Role]) -> Vec<Role> {
    let assigned_ids: HashSet<&RoleId> = assigned.iter().map(Role::id).collect();

    catalog
        .iter()
        .filter(|candidate| !assigned_ids.contains(candidate.id()))
        .cloned()
        .collect()
}
