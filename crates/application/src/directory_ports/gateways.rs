use async_trait::async_trait;

use roledeck_core::{ConsoleError, ConsoleResult};
use roledeck_domain::{AssignmentSnapshot, Role, RoleSelection, SubjectEmail};

use super::records::{ChainPhase, MembershipLookup, MembershipOverview};

/// Gateway port to the remote role directory.
///
/// Implementations speak whatever wire protocol the directory exposes and map
/// every failure into the [`ConsoleError`] taxonomy before returning.
#[async_trait]
pub trait RoleMembershipGateway: Send + Sync {
    /// Fetches the subject's current assignments together with the catalog.
    async fn lookup_roles(&self, email: &SubjectEmail) -> ConsoleResult<MembershipLookup>;

    /// Grants the selected roles to the subject.
    ///
    /// Returns the directory's confirmation text for display only.
    async fn assign_roles(
        &self,
        email: &SubjectEmail,
        selection: &RoleSelection,
    ) -> ConsoleResult<String>;

    /// Revokes the selected roles from the subject.
    ///
    /// Returns the directory's confirmation text for display only.
    async fn remove_roles(
        &self,
        email: &SubjectEmail,
        selection: &RoleSelection,
    ) -> ConsoleResult<String>;

    /// Lists every role the directory can grant.
    async fn fetch_catalog(&self) -> ConsoleResult<Vec<Role>>;

    /// Lists all subject-role bindings across the directory.
    async fn list_memberships(&self) -> ConsoleResult<Vec<MembershipOverview>>;
}

/// Output port for everything the console shows the operator.
///
/// The service narrates each chain through this trait; implementations decide
/// how phases, snapshots, and errors are rendered.
pub trait ConsolePresenter: Send + Sync {
    /// Announces that the current chain entered `phase`.
    fn phase_changed(&self, phase: ChainPhase);

    /// Renders a freshly derived assignment snapshot.
    fn show_snapshot(&self, snapshot: &AssignmentSnapshot);

    /// Relays a directory confirmation message verbatim.
    fn show_confirmation(&self, message: &str);

    /// Reports a failed chain.
    fn show_error(&self, error: &ConsoleError);

    /// Renders the full role catalog.
    fn show_catalog(&self, catalog: &[Role]);

    /// Renders the directory-wide membership overview.
    fn show_memberships(&self, rows: &[MembershipOverview]);
}
