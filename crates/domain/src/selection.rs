//! Operator-chosen role identifiers for the next mutation.

use std::collections::HashSet;

use roledeck_core::{ConsoleError, ConsoleResult};

use crate::role::RoleId;

/// Ephemeral, ordered, de-duplicated, non-empty set of role identifiers.
///
/// Built from the operator's selection immediately before an assign or
/// remove request; it is not persisted and is superseded by the next
/// snapshot. An empty selection fails fast with no request issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSelection {
    ids: Vec<RoleId>,
}

impl RoleSelection {
    /// Creates a validated selection, preserving first-occurrence order and
    /// dropping duplicate identifiers.
    pub fn new<I, S>(ids: I) -> ConsoleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();

        for raw in ids {
            let id = RoleId::new(raw)?;
            if seen.insert(id.clone()) {
                ordered.push(id);
            }
        }

        if ordered.is_empty() {
            return Err(ConsoleError::Validation(
                "select at least one role".to_owned(),
            ));
        }

        Ok(Self { ids: ordered })
    }

    /// Returns the selected identifiers in first-occurrence order.
    #[must_use]
    pub fn ids(&self) -> &[RoleId] {
        self.ids.as_slice()
    }

    /// Returns the number of distinct selected roles (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false: an empty selection never constructs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
