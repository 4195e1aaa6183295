use super::*;

use tracing::info;

use roledeck_domain::RoleSelection;

impl ReconciliationService {
    /// Revokes the selected roles from the subject, then refreshes.
    ///
    /// Mirrors [`ReconciliationService::assign`]: validation precedes any
    /// network traffic, and a failed revocation ends the chain without a
    /// refresh.
    pub async fn remove(
        &self,
        email: &str,
        role_ids: Vec<String>,
    ) -> ConsoleResult<AssignmentSnapshot> {
        let _guard = self.begin_chain()?;

        self.enter_phase(ChainPhase::Validating);
        let subject = SubjectEmail::new(email).map_err(|error| self.fail(error))?;
        let selection = RoleSelection::new(role_ids).map_err(|error| self.fail(error))?;

        self.enter_phase(ChainPhase::Requesting);
        let confirmation = self
            .gateway
            .remove_roles(&subject, &selection)
            .await
            .map_err(|error| self.fail(error))?;

        info!(
            subject = %subject,
            role_count = selection.len(),
            "roles removed; refreshing snapshot"
        );
        self.presenter.show_confirmation(&confirmation);

        self.enter_phase(ChainPhase::Refreshing);
        let snapshot = self
            .fetch_snapshot(&subject)
            .await
            .map_err(|error| self.fail(error))?;

        self.presenter.show_snapshot(&snapshot);
        self.enter_phase(ChainPhase::Idle);

        Ok(snapshot)
    }
}
