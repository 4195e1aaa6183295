use super::*;

use roledeck_domain::Role;

use crate::directory_ports::MembershipOverview;

impl ReconciliationService {
    /// Fetches the full role catalog for browsing.
    ///
    /// Catalog reads are display-only and run outside the chain state
    /// machine; they never touch a subject's snapshot.
    pub async fn catalog(&self) -> ConsoleResult<Vec<Role>> {
        let catalog = self.gateway.fetch_catalog().await.map_err(|error| {
            warn!(error = %error, "catalog fetch failed");
            self.presenter.show_error(&error);
            error
        })?;

        self.presenter.show_catalog(&catalog);

        Ok(catalog)
    }

    /// Fetches every subject-role binding across the directory.
    pub async fn memberships(&self) -> ConsoleResult<Vec<MembershipOverview>> {
        let rows = self.gateway.list_memberships().await.map_err(|error| {
            warn!(error = %error, "membership overview fetch failed");
            self.presenter.show_error(&error);
            error
        })?;

        self.presenter.show_memberships(&rows);

        Ok(rows)
    }
}
