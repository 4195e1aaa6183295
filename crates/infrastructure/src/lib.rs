//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_role_membership_gateway;
mod in_memory_role_directory;

pub use http_role_membership_gateway::HttpRoleMembershipGateway;
pub use in_memory_role_directory::InMemoryRoleDirectory;
