use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use roledeck_core::{ConsoleError, ConsoleResult};
use roledeck_domain::{AssignmentSnapshot, SubjectEmail};

use crate::directory_ports::{ChainPhase, ConsolePresenter, RoleMembershipGateway};

mod assign;
mod directory;
mod lookup;
mod remove;

/// Drives role-state reconciliation chains against the directory.
///
/// Every operation runs as one chain: validate input locally, call the
/// gateway, and narrate each phase through the presenter. At most one chain
/// is in flight at a time; starting a second one while the first is still
/// running is rejected before any validation or network traffic.
#[derive(Clone)]
pub struct ReconciliationService {
    gateway: Arc<dyn RoleMembershipGateway>,
    presenter: Arc<dyn ConsolePresenter>,
    chain_guard: Arc<Mutex<()>>,
}

impl ReconciliationService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn RoleMembershipGateway>,
        presenter: Arc<dyn ConsolePresenter>,
    ) -> Self {
        Self {
            gateway,
            presenter,
            chain_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Claims the single chain slot, rejecting the operation when another
    /// chain still holds it. Rejection happens before any phase change.
    fn begin_chain(&self) -> ConsoleResult<MutexGuard<'_, ()>> {
        self.chain_guard.try_lock().map_err(|_| {
            let error =
                ConsoleError::Validation("another operation is already in progress".to_owned());
            warn!(error = %error, "operation chain rejected");
            self.presenter.show_error(&error);
            error
        })
    }

    /// Narrates a phase transition to the log and the presenter.
    fn enter_phase(&self, phase: ChainPhase) {
        debug!(phase = %phase, "chain phase changed");
        self.presenter.phase_changed(phase);
    }

    /// Reports a failed chain and returns the console to idle.
    fn fail(&self, error: ConsoleError) -> ConsoleError {
        warn!(error = %error, "operation chain failed");
        self.presenter.show_error(&error);
        self.enter_phase(ChainPhase::Idle);
        error
    }

    /// Fetches the subject's authoritative state and derives a snapshot.
    async fn fetch_snapshot(&self, subject: &SubjectEmail) -> ConsoleResult<AssignmentSnapshot> {
        let lookup = self.gateway.lookup_roles(subject).await?;

        Ok(AssignmentSnapshot::derive(
            lookup.display_name,
            lookup.assigned_roles,
            &lookup.catalog_roles,
        ))
    }
}
