use super::*;

use tracing::info;

use roledeck_domain::RoleSelection;

impl ReconciliationService {
    /// Grants the selected roles to the subject, then refreshes.
    ///
    /// The directory's acknowledgement is display-only; the snapshot shown
    /// afterwards always comes from a fresh lookup. When the mutation fails
    /// the refresh is skipped so the previously presented state stays
    /// untouched.
    pub async fn assign(
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
            .assign_roles(&subject, &selection)
            .await
            .map_err(|error| self.fail(error))?;

        info!(
            subject = %subject,
            role_count = selection.len(),
            "roles assigned; refreshing snapshot"
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
