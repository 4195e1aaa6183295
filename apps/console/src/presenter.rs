//! Terminal rendering for chain progress and assignment state.

use roledeck_application::{ChainPhase, ConsolePresenter, MembershipOverview};
use roledeck_core::ConsoleError;
use roledeck_domain::{AssignmentSnapshot, Role};

/// Renders chain progress, snapshots, and failures to the terminal.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    /// Creates a terminal presenter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ConsolePresenter for TerminalPresenter {
    fn phase_changed(&self, phase: ChainPhase) {
        match phase {
            ChainPhase::Requesting => println!("Fetching roles..."),
            ChainPhase::Refreshing => println!("Refreshing assigned roles..."),
            ChainPhase::Validating | ChainPhase::Idle => {}
        }
    }

    fn show_snapshot(&self, snapshot: &AssignmentSnapshot) {
        println!();
        println!("Roles for {}", snapshot.display_name());

        if snapshot.has_no_assignments() {
            println!("No roles assigned.");
        } else {
            for role in snapshot.assigned_roles() {
                println!(
                    "  {} - Assigned on: {}",
                    role.display_name(),
                    format_assignment_date(role)
                );
            }
        }

        println!();
        if snapshot.available_roles().is_empty() {
            println!("No roles available for assignment.");
        } else {
            println!("Available for assignment:");
            for role in snapshot.available_roles() {
                println!("  {}  {}", role.id(), role.display_name());
            }
        }
    }

    fn show_confirmation(&self, message: &str) {
        println!("{message}");
    }

    fn show_error(&self, error: &ConsoleError) {
        eprintln!("Error: {error}");
    }

    fn show_catalog(&self, catalog: &[Role]) {
        if catalog.is_empty() {
            println!("The role catalog is empty.");
            return;
        }

        println!("Role catalog:");
        for role in catalog {
            println!("  {}  {}", role.id(), role.display_name());
        }
    }

    fn show_memberships(&self, rows: &[MembershipOverview]) {
        if rows.is_empty() {
            println!("No role assignments recorded.");
            return;
        }

        for row in rows {
            println!(
                "  {}  {}  {}",
                row.subject,
                row.role_name,
                row.assigned_at.as_deref().unwrap_or("N/A")
            );
        }
    }
}

fn format_assignment_date(role: &Role) -> String {
    role.assignment_date().map_or_else(
        || "N/A".to_owned(),
        |date| date.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}
