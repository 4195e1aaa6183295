//! Application role entity in its wire form.
//!
//! Field names follow the role service's JSON contract (`displayName`,
//! `assignmentDate`); identity is by the server-assigned `id` only.

use chrono::{DateTime, Utc};
use roledeck_core::{ConsoleResult, NonEmptyString};
use serde::{Deserialize, Deserializer, Serialize};

/// Stable, server-assigned role identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(NonEmptyString);

impl RoleId {
    /// Creates a validated role identifier from operator input.
    pub fn new(value: impl Into<String>) -> ConsoleResult<Self> {
        Ok(Self(NonEmptyString::new(value)?))
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A named permission unit, either from the catalog or bound to the subject.
///
/// `assignment_date` is present only when the role arrived inside the
/// assigned set; catalog entries carry no date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    id: RoleId,
    display_name: String,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    assignment_date: Option<DateTime<Utc>>,
}

impl Role {
    /// Creates a catalog role (no assignment date).
    #[must_use]
    pub fn new(id: RoleId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            assignment_date: None,
        }
    }

    /// Returns the same role stamped with an assignment timestamp.
    #[must_use]
    pub fn with_assignment_date(mut self, assigned_at: DateTime<Utc>) -> Self {
        self.assignment_date = Some(assigned_at);
        self
    }

    /// Returns the stable role identifier.
    #[must_use]
    pub fn id(&self) -> &RoleId {
        &self.id
    }

    /// Returns the human-friendly role name (presentation data, not a key).
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns when the role was assigned, if it is in the assigned set.
    #[must_use]
    pub fn assignment_date(&self) -> Option<DateTime<Utc>> {
        self.assignment_date
    }
}

/// Decodes `assignmentDate` tolerantly: absent, `null`, or unparsable values
/// all become `None`. Directory backends disagree on this field (RFC 3339
/// timestamps versus a literal `"N/A"` placeholder), and it is cosmetic
/// either way.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        DateTime::parse_from_rfc3339(value.as_str())
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc))
    }))
}

#[cfg(test)]
mod tests {
    use super::{Role, RoleId};

    fn role_id(value: &str) -> RoleId {
        RoleId::new(value).unwrap_or_else(|error| panic!("invalid test role id: {error}"))
    }

    #[test]
    fn empty_role_id_is_rejected() {
        assert!(RoleId::new("  ").is_err());
    }

    #[test]
    fn wire_role_with_rfc3339_date_parses() {
        let decoded: Result<Role, _> = serde_json::from_str(
            r#"{"id":"r1","displayName":"Reader","assignmentDate":"2016-10-19T10:37:00Z"}"#,
        );
        assert!(decoded.is_ok_and(|role| role.assignment_date().is_some()));
    }

    #[test]
    fn wire_role_without_date_parses_as_catalog_entry() {
        let decoded: Result<Role, _> =
            serde_json::from_str(r#"{"id":"r1","displayName":"Reader"}"#);
        assert!(decoded.is_ok_and(|role| role.assignment_date().is_none()));
    }

    #[test]
    fn wire_role_with_placeholder_date_degrades_to_none() {
        let decoded: Result<Role, _> = serde_json::from_str(
            r#"{"id":"r1","displayName":"Reader","assignmentDate":"N/A"}"#,
        );
        assert!(decoded.is_ok_and(|role| role.assignment_date().is_none()));
    }

    #[test]
    fn wire_role_with_null_date_degrades_to_none() {
        let decoded: Result<Role, _> = serde_json::from_str(
            r#"{"id":"r1","displayName":"Reader","assignmentDate":null}"#,
        );
        assert!(decoded.is_ok_and(|role| role.assignment_date().is_none()));
    }

    #[test]
    fn serialized_catalog_role_omits_assignment_date() {
        let encoded = serde_json::to_string(&Role::new(role_id("r1"), "Reader"));
        assert!(encoded.is_ok_and(|json| !json.contains("assignmentDate")));
    }
}
