use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use roledeck_application::{MembershipLookup, MembershipOverview, RoleMembershipGateway};
use roledeck_core::{ConsoleError, ConsoleResult};
use roledeck_domain::{Role, RoleId, RoleSelection, SubjectEmail};

/// HTTP gateway speaking the role service's JSON contract.
///
/// All failures are folded into the console error taxonomy here: a request
/// that never produced a response (or produced an unreadable one) becomes
/// `Transport`, a non-success status becomes `Remote` carrying the service's
/// own `error` field when the body supplies one.
pub struct HttpRoleMembershipGateway {
    http_client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct SubjectRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct MutationRequest<'a> {
    email: &'a str,
    role_ids: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MembershipLookupResponse {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    assigned_roles: Vec<Role>,
    #[serde(default)]
    available_roles: Vec<Role>,
}

#[derive(Debug, Deserialize)]
struct MutationResponse {
    #[serde(default)]
    message: String,
}

/// The catalog endpoint is served either as a bare array or wrapped in a
/// `value` envelope depending on the directory backend; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogResponse {
    Wrapped { value: Vec<Role> },
    Bare(Vec<Role>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MembershipOverviewRow {
    #[serde(default)]
    principal_display_name: Option<String>,
    #[serde(default)]
    role_name: Option<String>,
    #[serde(default)]
    created_date_time: Option<String>,
}

impl MembershipOverviewRow {
    fn into_overview(self) -> MembershipOverview {
        MembershipOverview {
            subject: self
                .principal_display_name
                .unwrap_or_else(|| "Unknown Subject".to_owned()),
            role_name: self.role_name.unwrap_or_else(|| "Unknown Role".to_owned()),
            assigned_at: self.created_date_time,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Maps a non-success response body to `ConsoleError::Remote`, preferring
/// the service's own `error` field over the generic message.
fn remote_error(status: u16, body: &str) -> ConsoleError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| ConsoleError::GENERIC_REMOTE_MESSAGE.to_owned());

    ConsoleError::Remote { status, message }
}

impl HttpRoleMembershipGateway {
    /// Creates a gateway rooted at `base_url`; a trailing slash is tolerated.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();

        Self {
            http_client,
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn execute<T>(
        &self,
        request: reqwest::RequestBuilder,
        context: &'static str,
    ) -> ConsoleResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = request.send().await.map_err(|error| {
            ConsoleError::Transport(format!("failed to reach role service for {context}: {error}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_owned());
            return Err(remote_error(status.as_u16(), &body));
        }

        response.json::<T>().await.map_err(|error| {
            ConsoleError::Transport(format!(
                "failed to parse role service response for {context}: {error}"
            ))
        })
    }
}

#[async_trait]
impl RoleMembershipGateway for HttpRoleMembershipGateway {
    async fn lookup_roles(&self, email: &SubjectEmail) -> ConsoleResult<MembershipLookup> {
        let request = self
            .http_client
            .post(self.endpoint("user_roles"))
            .json(&SubjectRequest {
                email: email.as_str(),
            });

        let body: MembershipLookupResponse = self.execute(request, "user lookup").await?;

        Ok(MembershipLookup {
            display_name: body
                .display_name
                .unwrap_or_else(|| email.as_str().to_owned()),
            assigned_roles: body.assigned_roles,
            catalog_roles: body.available_roles,
        })
    }

    async fn assign_roles(
        &self,
        email: &SubjectEmail,
        selection: &RoleSelection,
    ) -> ConsoleResult<String> {
        let request = self
            .http_client
            .post(self.endpoint("assign_roles"))
            .json(&MutationRequest {
                email: email.as_str(),
                role_ids: selection.ids().iter().map(RoleId::as_str).collect(),
            });

        let body: MutationResponse = self.execute(request, "role assignment").await?;

        Ok(body.message)
    }

    async fn remove_roles(
        &self,
        email: &SubjectEmail,
        selection: &RoleSelection,
    ) -> ConsoleResult<String> {
        let request = self
            .http_client
            .delete(self.endpoint("remove_roles"))
            .json(&MutationRequest {
                email: email.as_str(),
                role_ids: selection.ids().iter().map(RoleId::as_str).collect(),
            });

        let body: MutationResponse = self.execute(request, "role removal").await?;

        Ok(body.message)
    }

    async fn fetch_catalog(&self) -> ConsoleResult<Vec<Role>> {
        let request = self.http_client.get(self.endpoint("roles"));
        let body: CatalogResponse = self.execute(request, "role catalog").await?;

        Ok(match body {
            CatalogResponse::Wrapped { value } => value,
            CatalogResponse::Bare(roles) => roles,
        })
    }

    async fn list_memberships(&self) -> ConsoleResult<Vec<MembershipOverview>> {
        let request = self.http_client.get(self.endpoint("users_with_roles"));
        let rows: Vec<MembershipOverviewRow> =
            self.execute(request, "membership overview").await?;

        Ok(rows
            .into_iter()
            .map(MembershipOverviewRow::into_overview)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn lookup_response_tolerates_missing_fields() {
        let parsed: Result<MembershipLookupResponse, _> = serde_json::from_str("{}");

        assert!(parsed.is_ok_and(|body| {
            body.display_name.is_none()
                && body.assigned_roles.is_empty()
                && body.available_roles.is_empty()
        }));
    }

    #[test]
    fn lookup_response_parses_the_full_contract() {
        let payload = json!({
            "displayName": "Avery Chen",
            "assignedRoles": [
                {
                    "id": "r-reader",
                    "displayName": "Reader",
                    "assignmentDate": "2025-03-01T09:30:00Z"
                }
            ],
            "availableRoles": [
                { "id": "r-reader", "displayName": "Reader" },
                { "id": "r-editor", "displayName": "Editor" }
            ]
        });

        let parsed: Result<MembershipLookupResponse, _> = serde_json::from_value(payload);

        assert!(parsed.is_ok_and(|body| {
            body.display_name.as_deref() == Some("Avery Chen")
                && body.assigned_roles.len() == 1
                && body.assigned_roles[0].assignment_date().is_some()
                && body.available_roles.len() == 2
        }));
    }

    #[test]
    fn catalog_response_accepts_bare_and_wrapped_arrays() {
        let bare = json!([{ "id": "r-reader", "displayName": "Reader" }]);
        let wrapped = json!({ "value": [{ "id": "r-reader", "displayName": "Reader" }] });

        let bare: Result<CatalogResponse, _> = serde_json::from_value(bare);
        let wrapped: Result<CatalogResponse, _> = serde_json::from_value(wrapped);

        assert!(bare.is_ok_and(|body| matches!(body, CatalogResponse::Bare(roles) if roles.len() == 1)));
        assert!(
            wrapped
                .is_ok_and(|body| matches!(body, CatalogResponse::Wrapped { value } if value.len() == 1))
        );
    }

    #[test]
    fn remote_error_prefers_the_service_message() {
        let error = remote_error(404, r#"{"error": "User not found."}"#);

        assert!(matches!(
            error,
            ConsoleError::Remote { status: 404, message } if message == "User not found."
        ));
    }

    #[test]
    fn remote_error_falls_back_on_unparsable_bodies() {
        let html = remote_error(502, "<html>Bad Gateway</html>");
        let empty = remote_error(500, r#"{"error": "  "}"#);

        assert!(matches!(
            html,
            ConsoleError::Remote { status: 502, message }
                if message == ConsoleError::GENERIC_REMOTE_MESSAGE
        ));
        assert!(matches!(
            empty,
            ConsoleError::Remote { status: 500, message }
                if message == ConsoleError::GENERIC_REMOTE_MESSAGE
        ));
    }

    #[test]
    fn mutation_request_serializes_the_wire_shape() {
        let serialized = serde_json::to_value(MutationRequest {
            email: "avery.chen@example.com",
            role_ids: vec!["r-reader", "r-editor"],
        });

        assert!(serialized.is_ok_and(|value| {
            value
                == json!({
                    "email": "avery.chen@example.com",
                    "role_ids": ["r-reader", "r-editor"]
                })
        }));
    }

    #[test]
    fn overview_rows_degrade_to_placeholders() {
        let parsed: Result<MembershipOverviewRow, _> = serde_json::from_value(json!({
            "createdDateTime": "2025-03-01T09:30:00Z"
        }));

        let overview = parsed
            .map(MembershipOverviewRow::into_overview)
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(overview.subject, "Unknown Subject");
        assert_eq!(overview.role_name, "Unknown Role");
        assert_eq!(overview.assigned_at.as_deref(), Some("2025-03-01T09:30:00Z"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let gateway = HttpRoleMembershipGateway::new(
            reqwest::Client::new(),
            "http://localhost:5000/",
        );

        assert_eq!(gateway.endpoint("user_roles"), "http://localhost:5000/user_roles");
    }
}
