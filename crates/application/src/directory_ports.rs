//! Ports for the role directory service and the console surface.

mod gateways;
mod records;

pub use gateways::{ConsolePresenter, RoleMembershipGateway};
pub use records::{ChainPhase, MembershipLookup, MembershipOverview};
