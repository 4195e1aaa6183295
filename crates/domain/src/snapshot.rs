//! Server-confirmed assignment state for one subject.

use crate::availability::available_for_assignment;
use crate::role::Role;

/// The complete, server-confirmed state of a subject's assignments plus the
/// derived assignable set, as of the most recent lookup.
///
/// A snapshot is produced fresh by every lookup and is never mutated in
/// place: the next lookup replaces it wholesale. The client keeps no durable
/// local state beyond the currently displayed snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentSnapshot {
    display_name: String,
    assigned_roles: Vec<Role>,
    available_roles: Vec<Role>,
}

impl AssignmentSnapshot {
    /// Builds a snapshot from the server's view, deriving the assignable set
    /// as the catalog complement of the assigned ids.
    ///
    /// The role service reports the full catalog under `availableRoles`; the
    /// true available set is always computed client-side so an assigned role
    /// can never be offered twice.
    #[must_use]
    pub fn derive(
        display_name: impl Into<String>,
        assigned_roles: Vec<Role>,
        catalog_roles: &[Role],
    ) -> Self {
        let available_roles = available_for_assignment(&assigned_roles, catalog_roles);

        Self {
            display_name: display_name.into(),
            assigned_roles,
            available_roles,
        }
    }

    /// Returns the subject's display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the roles currently bound to the subject, in server order.
    #[must_use]
    pub fn assigned_roles(&self) -> &[Role] {
        self.assigned_roles.as_slice()
    }

    /// Returns the catalog roles still assignable, in catalog order.
    #[must_use]
    pub fn available_roles(&self) -> &[Role] {
        self.available_roles.as_slice()
    }

    /// True when the subject holds no roles. A valid state, not an error.
    #[must_use]
    pub fn has_no_assignments(&self) -> bool {
        self.assigned_roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::AssignmentSnapshot;
    use crate::role::{Role, RoleId};

    fn role(id: &str) -> Role {
        let role_id =
            RoleId::new(id).unwrap_or_else(|error| panic!("invalid test role id: {error}"));
        Role::new(role_id, format!("Role {id}"))
    }

    #[test]
    fn derives_available_set_as_catalog_complement() {
        let catalog = vec![role("r1"), role("r2"), role("r3")];

        let snapshot = AssignmentSnapshot::derive("Jo Operator", vec![role("r2")], &catalog);

        let available: Vec<&str> = snapshot
            .available_roles()
            .iter()
            .map(|entry| entry.id().as_str())
            .collect();
        assert_eq!(available, vec!["r1", "r3"]);
    }

    #[test]
    fn empty_assignment_set_is_a_valid_state() {
        let catalog = vec![role("r1")];

        let snapshot = AssignmentSnapshot::derive("Jo Operator", Vec::new(), &catalog);

        assert!(snapshot.has_no_assignments());
        assert_eq!(snapshot.available_roles().len(), 1);
    }
}
