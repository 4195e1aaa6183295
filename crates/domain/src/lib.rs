//! Domain entities and invariants for role-state reconciliation.

#![forbid(unsafe_code)]

mod availability;
mod role;
mod selection;
mod snapshot;
mod subject;

pub use availability::available_for_assignment;
pub use role::{Role, RoleId};
pub use selection::RoleSelection;
pub use snapshot::AssignmentSnapshot;
pub use subject::SubjectEmail;
