//! Application services and ports for the role console.

#![forbid(unsafe_code)]

mod directory_ports;
mod reconciliation_service;

pub use directory_ports::{
    ChainPhase, ConsolePresenter, MembershipLookup, MembershipOverview, RoleMembershipGateway,
};
pub use reconciliation_service::ReconciliationService;
