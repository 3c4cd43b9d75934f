//! Better Auth REST client.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

use super::{AuthClient, AuthError, LinkRedirect, PermissionCheck};
use crate::entities::{Account, AccountInfo, MemberList, Session, Team, TeamMember};

/// Error body returned by Better Auth endpoints.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PermissionResponse {
    #[serde(default)]
    success: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PermissionRequest<'a> {
    organization_id: &'a str,
    permissions: &'a std::collections::BTreeMap<String, Vec<String>>,
}

/// Auth client speaking to a Better Auth server over HTTP.
pub struct HttpAuthClient {
    client: Client,
    base_url: Url,
    session_token: Option<String>,
}

impl HttpAuthClient {
    /// Create a client for the auth routes mounted at `base_url`
    /// (e.g. `https://example.com/api/auth`).
    pub fn new(base_url: &str, session_token: Option<String>, timeout: Duration) -> Result<Self, AuthError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| AuthError::InvalidData(format!("invalid base URL '{base_url}': {e}")))?;
        // Url::join replaces the last segment unless the path ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            session_token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AuthError::InvalidData(format!("invalid endpoint '{path}': {e}")))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, AuthError> {
        let request = self.client.get(self.endpoint(path)?).query(query);
        self.send(path, request).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, AuthError> {
        let request = self.client.post(self.endpoint(path)?).json(body);
        self.send(path, request).await
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T, AuthError> {
        log::debug!("auth http: {path}");
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| AuthError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::error_from_body(status, &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| AuthError::InvalidData(format!("{path}: {e}")))
    }

    fn error_from_body(status: StatusCode, bytes: &[u8]) -> AuthError {
        let body: ErrorBody = serde_json::from_slice(bytes).unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED && body.code.is_none() {
            return AuthError::Unauthenticated;
        }
        AuthError::Api {
            status: status.as_u16(),
            code: body.code,
            message: body
                .message
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string()),
        }
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    fn client_type(&self) -> &str {
        "http"
    }

    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        self.get_json("get-session", &[]).await
    }

    async fn list_teams(&self, organization_id: &str) -> Result<Vec<Team>, AuthError> {
        self.get_json("organization/list-teams", &[("organizationId", organization_id)])
            .await
    }

    async fn list_member_teams(&self, organization_id: &str, user_id: &str) -> Result<Vec<Team>, AuthError> {
        // The REST API only lists the session user's teams, so membership of
        // another member is resolved team by team.
        let teams = self.list_teams(organization_id).await?;
        let mut member_teams = Vec::new();
        for team in teams {
            let members = self.list_team_members(&team.id).await?;
            if members.iter().any(|member| member.user_id == user_id) {
                member_teams.push(team);
            }
        }
        Ok(member_teams)
    }

    async fn list_team_members(&self, team_id: &str) -> Result<Vec<TeamMember>, AuthError> {
        self.get_json("organization/list-team-members", &[("teamId", team_id)])
            .await
    }

    async fn list_members(&self, organization_id: &str) -> Result<MemberList, AuthError> {
        self.get_json("organization/list-members", &[("organizationId", organization_id)])
            .await
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AuthError> {
        self.get_json("list-accounts", &[]).await
    }

    async fn account_info(&self, account_id: &str) -> Result<AccountInfo, AuthError> {
        self.get_json("account-info", &[("accountId", account_id)]).await
    }

    async fn has_permission(&self, organization_id: &str, check: &PermissionCheck) -> Result<bool, AuthError> {
        let body = PermissionRequest {
            organization_id,
            permissions: &check.permissions,
        };
        let response: PermissionResponse = self.post_json("organization/has-permission", &body).await?;
        Ok(response.success)
    }

    async fn create_team(&self, organization_id: &str, name: &str) -> Result<Team, AuthError> {
        self.post_json(
            "organization/create-team",
            &json!({ "name": name, "organizationId": organization_id }),
        )
        .await
    }

    async fn update_team(&self, team_id: &str, name: &str) -> Result<Team, AuthError> {
        self.post_json(
            "organization/update-team",
            &json!({ "teamId": team_id, "data": { "name": name } }),
        )
        .await
    }

    async fn remove_team(&self, team_id: &str, organization_id: &str) -> Result<(), AuthError> {
        let _: Value = self
            .post_json(
                "organization/remove-team",
                &json!({ "teamId": team_id, "organizationId": organization_id }),
            )
            .await?;
        Ok(())
    }

    async fn add_team_member(&self, team_id: &str, user_id: &str) -> Result<(), AuthError> {
        let _: Value = self
            .post_json(
                "organization/add-team-member",
                &json!({ "teamId": team_id, "userId": user_id }),
            )
            .await?;
        Ok(())
    }

    async fn remove_team_member(&self, team_id: &str, user_id: &str) -> Result<(), AuthError> {
        let _: Value = self
            .post_json(
                "organization/remove-team-member",
                &json!({ "teamId": team_id, "userId": user_id }),
            )
            .await?;
        Ok(())
    }

    async fn link_social(&self, provider: &str, callback_url: &str) -> Result<LinkRedirect, AuthError> {
        self.post_json(
            "link-social",
            &json!({ "provider": provider, "callbackURL": callback_url }),
        )
        .await
    }

    async fn link_oauth2(&self, provider_id: &str, callback_url: &str) -> Result<LinkRedirect, AuthError> {
        self.post_json(
            "oauth2/link",
            &json!({ "providerId": provider_id, "callbackURL": callback_url }),
        )
        .await
    }

    async fn unlink_account(&self, provider_id: &str, account_id: Option<&str>) -> Result<(), AuthError> {
        let _: Value = self
            .post_json(
                "unlink-account",
                &json!({ "providerId": provider_id, "accountId": account_id }),
            )
            .await?;
        Ok(())
    }
}
