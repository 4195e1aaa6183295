use roledeck_domain::Role;

/// Raw membership state for one subject as reported by the directory.
///
/// The service derives an [`roledeck_domain::AssignmentSnapshot`] from this
/// record; callers never consume it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipLookup {
    /// Human-readable subject name.
    pub display_name: String,
    /// Roles currently bound to the subject.
    pub assigned_roles: Vec<Role>,
    /// Every role the directory can grant.
    pub catalog_roles: Vec<Role>,
}

/// One subject-role binding from the directory-wide overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipOverview {
    /// Human-readable subject name.
    pub subject: String,
    /// Role name granted to the subject.
    pub role_name: String,
    /// Assignment timestamp in RFC3339, when the directory recorded one.
    pub assigned_at: Option<String>,
}

/// Progress stages of an operation chain.
///
/// Chains move `Idle -> Validating -> Requesting -> Idle` for lookups and
/// `Idle -> Validating -> Requesting -> Refreshing -> Idle` for mutations
/// that succeed. Any failure returns straight to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainPhase {
    /// No chain in flight; input is actionable.
    Idle,
    /// Local input checks before any network traffic.
    Validating,
    /// Awaiting the directory's response.
    Requesting,
    /// Mutation acknowledged; re-fetching the authoritative state.
    Refreshing,
}

impl ChainPhase {
    /// Stable lowercase label for logs and progress lines.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Requesting => "requesting",
            Self::Refreshing => "refreshing",
        }
    }
}

impl std::fmt::Display for ChainPhase {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}
