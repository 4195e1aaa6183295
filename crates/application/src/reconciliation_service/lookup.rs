use super::*;

use tracing::info;

impl ReconciliationService {
    /// Resolves the subject's current assignment state.
    ///
    /// Validates the email before any network traffic, fetches the membership
    /// record, and presents the derived snapshot. A subject with no assigned
    /// roles is a successful, empty snapshot rather than an error.
    pub async fn lookup(&self, email: &str) -> ConsoleResult<AssignmentSnapshot> {
        let _guard = self.begin_chain()?;

        self.enter_phase(ChainPhase::Validating);
        let subject = SubjectEmail::new(email).map_err(|error| self.fail(error))?;

        self.enter_phase(ChainPhase::Requesting);
        let snapshot = self
            .fetch_snapshot(&subject)
            .await
            .map_err(|error| self.fail(error))?;

        info!(
            subject = %subject,
            assigned = snapshot.assigned_roles().len(),
            available = snapshot.available_roles().len(),
            "assignment snapshot resolved"
        );

        self.presenter.show_snapshot(&snapshot);
        self.enter_phase(ChainPhase::Idle);

        Ok(snapshot)
    }
}
