use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use roledeck_application::{MembershipLookup, MembershipOverview, RoleMembershipGateway};
use roledeck_core::{ConsoleError, ConsoleResult};
use roledeck_domain::{Role, RoleSelection, SubjectEmail};

/// In-memory role directory implementation.
///
/// Serves the same contract as the HTTP gateway from process-local state, so
/// the console can run without a live directory. Unknown subjects and roles
/// surface as the remote errors a real directory would return.
#[derive(Debug, Default)]
pub struct InMemoryRoleDirectory {
    catalog: RwLock<Vec<Role>>,
    subjects: RwLock<HashMap<String, SubjectRecord>>,
}

#[derive(Debug, Clone)]
struct SubjectRecord {
    display_name: String,
    assigned: Vec<Role>,
}

fn user_not_found() -> ConsoleError {
    ConsoleError::Remote {
        status: 404,
        message: "User not found.".to_owned(),
    }
}

impl InMemoryRoleDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-seeded with a grantable catalog.
    #[must_use]
    pub fn with_catalog(catalog: Vec<Role>) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            subjects: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a subject with no assignments yet.
    pub async fn register_subject(&self, email: &SubjectEmail, display_name: &str) {
        self.subjects.write().await.insert(
            email.as_str().to_owned(),
            SubjectRecord {
                display_name: display_name.to_owned(),
                assigned: Vec::new(),
            },
        );
    }
}

#[async_trait]
impl RoleMembershipGateway for InMemoryRoleDirectory {
    async fn lookup_roles(&self, email: &SubjectEmail) -> ConsoleResult<MembershipLookup> {
        let catalog = self.catalog.read().await.clone();
        let subjects = self.subjects.read().await;
        let record = subjects.get(email.as_str()).ok_or_else(user_not_found)?;

        Ok(MembershipLookup {
            display_name: record.display_name.clone(),
            assigned_roles: record.assigned.clone(),
            catalog_roles: catalog,
        })
    }

    async fn assign_roles(
        &self,
        email: &SubjectEmail,
        selection: &RoleSelection,
    ) -> ConsoleResult<String> {
        let catalog = self.catalog.read().await.clone();
        let mut subjects = self.subjects.write().await;
        let record = subjects
            .get_mut(email.as_str())
            .ok_or_else(user_not_found)?;

        // Resolve every id before touching the record so a bad selection
        // cannot leave a partial assignment behind.
        let mut granted = Vec::new();
        for id in selection.ids() {
            let template = catalog.iter().find(|role| role.id() == id).ok_or_else(|| {
                ConsoleError::Remote {
                    status: 400,
                    message: format!("Role '{id}' is not in the catalog."),
                }
            })?;
            granted.push(template.clone());
        }

        for role in granted {
            if record.assigned.iter().all(|assigned| assigned.id() != role.id()) {
                record
                    .assigned
                    .push(role.with_assignment_date(Utc::now()));
            }
        }

        Ok("Roles assigned successfully.".to_owned())
    }

    async fn remove_roles(
        &self,
        email: &SubjectEmail,
        selection: &RoleSelection,
    ) -> ConsoleResult<String> {
        let mut subjects = self.subjects.write().await;
        let record = subjects
            .get_mut(email.as_str())
            .ok_or_else(user_not_found)?;

        record
            .assigned
            .retain(|role| !selection.ids().contains(role.id()));

        Ok("Roles removed successfully.".to_owned())
    }

    async fn fetch_catalog(&self) -> ConsoleResult<Vec<Role>> {
        Ok(self.catalog.read().await.clone())
    }

    async fn list_memberships(&self) -> ConsoleResult<Vec<MembershipOverview>> {
        let subjects = self.subjects.read().await;

        let mut rows = Vec::new();
        for record in subjects.values() {
            for role in &record.assigned {
                rows.push(MembershipOverview {
                    subject: record.display_name.clone(),
                    role_name: role.display_name().to_owned(),
                    assigned_at: role.assignment_date().map(|date| date.to_rfc3339()),
                });
            }
        }
        rows.sort_by(|left, right| {
            left.subject
                .cmp(&right.subject)
                .then_with(|| left.role_name.cmp(&right.role_name))
        });

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use roledeck_domain::RoleId;

    use super::*;

    fn role(id: &str, name: &str) -> Role {
        Role::new(RoleId::new(id).unwrap_or_else(|_| unreachable!()), name)
    }

    fn email(value: &str) -> SubjectEmail {
        SubjectEmail::new(value).unwrap_or_else(|_| unreachable!())
    }

    fn selection(ids: &[&str]) -> RoleSelection {
        RoleSelection::new(ids.iter().copied()).unwrap_or_else(|_| unreachable!())
    }

    fn seeded_directory() -> InMemoryRoleDirectory {
        InMemoryRoleDirectory::with_catalog(vec![
            role("r-reader", "Reader"),
            role("r-editor", "Editor"),
        ])
    }

    #[tokio::test]
    async fn assign_then_lookup_reflects_the_mutation() {
        let directory = seeded_directory();
        let subject = email("avery.chen@example.com");
        directory.register_subject(&subject, "Avery Chen").await;

        let confirmation = directory
            .assign_roles(&subject, &selection(&["r-reader"]))
            .await;
        assert!(confirmation.is_ok_and(|message| message == "Roles assigned successfully."));

        let lookup = directory
            .lookup_roles(&subject)
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(lookup.display_name, "Avery Chen");
        assert_eq!(lookup.assigned_roles.len(), 1);
        assert!(lookup.assigned_roles[0].assignment_date().is_some());
        assert_eq!(lookup.catalog_roles.len(), 2);
    }

    #[tokio::test]
    async fn unknown_subject_is_a_remote_not_found() {
        let directory = seeded_directory();

        let result = directory.lookup_roles(&email("ghost@example.com")).await;

        assert!(matches!(
            result,
            Err(ConsoleError::Remote { status: 404, message }) if message == "User not found."
        ));
    }

    #[tokio::test]
    async fn unknown_role_rejects_the_whole_selection() {
        let directory = seeded_directory();
        let subject = email("avery.chen@example.com");
        directory.register_subject(&subject, "Avery Chen").await;

        let result = directory
            .assign_roles(&subject, &selection(&["r-reader", "r-ghost"]))
            .await;

        assert!(matches!(
            result,
            Err(ConsoleError::Remote { status: 400, .. })
        ));
        let lookup = directory
            .lookup_roles(&subject)
            .await
            .unwrap_or_else(|_| unreachable!());
        assert!(lookup.assigned_roles.is_empty());
    }

    #[tokio::test]
    async fn removing_an_unassigned_role_is_a_quiet_no_op() {
        let directory = seeded_directory();
        let subject = email("avery.chen@example.com");
        directory.register_subject(&subject, "Avery Chen").await;

        let result = directory
            .remove_roles(&subject, &selection(&["r-editor"]))
            .await;

        assert!(result.is_ok_and(|message| message == "Roles removed successfully."));
    }

    #[tokio::test]
    async fn assigning_twice_keeps_a_single_binding() {
        let directory = seeded_directory();
        let subject = email("avery.chen@example.com");
        directory.register_subject(&subject, "Avery Chen").await;

        for _ in 0..2 {
            let result = directory
                .assign_roles(&subject, &selection(&["r-reader"]))
                .await;
            assert!(result.is_ok());
        }

        let lookup = directory
            .lookup_roles(&subject)
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(lookup.assigned_roles.len(), 1);
    }

    #[tokio::test]
    async fn overview_rows_are_sorted_by_subject_then_role() {
        let directory = seeded_directory();
        let first = email("avery.chen@example.com");
        let second = email("blake.reyes@example.com");
        directory.register_subject(&first, "Avery Chen").await;
        directory.register_subject(&second, "Blake Reyes").await;

        let seeded = directory
            .assign_roles(&second, &selection(&["r-editor", "r-reader"]))
            .await;
        assert!(seeded.is_ok());
        let seeded = directory.assign_roles(&first, &selection(&["r-reader"])).await;
        assert!(seeded.is_ok());

        let rows = directory
            .list_memberships()
            .await
            .unwrap_or_else(|_| unreachable!());
        let summary: Vec<(&str, &str)> = rows
            .iter()
            .map(|row| (row.subject.as_str(), row.role_name.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Avery Chen", "Reader"),
                ("Blake Reyes", "Editor"),
                ("Blake Reyes", "Reader"),
            ]
        );
    }
}
