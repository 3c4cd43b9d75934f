//! Auth client abstraction.
//!
//! Every screen talks to the auth service through the [`AuthClient`] trait so
//! the widgets never know whether they are backed by a live Better Auth
//! server or the in-process directory used for demos and tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::{Account, AccountInfo, MemberList, Session, Team, TeamMember};

pub mod http;
pub mod memory;

pub use http::HttpAuthClient;
pub use memory::MemoryAuthClient;

/// Errors returned by auth client operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The service rejected the request (validation, permission, conflict).
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidData(String),

    #[error("Not signed in")]
    Unauthenticated,
}

impl AuthError {
    pub fn api(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// Machine readable reason, used as a localization key.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            Self::Unauthenticated => Some("UNAUTHORIZED"),
            Self::Network(_) | Self::InvalidData(_) => None,
        }
    }

    /// Human readable message supplied by the service, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Permission query sent to `has-permission`, e.g. `{ "team": ["create"] }`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionCheck {
    pub permissions: BTreeMap<String, Vec<String>>,
}

impl PermissionCheck {
    pub fn new(resource: &str, action: &str) -> Self {
        let mut permissions = BTreeMap::new();
        permissions.insert(resource.to_string(), vec![action.to_string()]);
        Self { permissions }
    }

    pub fn team(action: &str) -> Self {
        Self::new("team", action)
    }
}

/// Where the provider wants the user to go to finish linking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRedirect {
    pub url: String,
    #[serde(default)]
    pub redirect: bool,
}

/// Operations the management screens need from the auth service.
///
/// Queries feed the data sources behind each card; mutations are only ever
/// invoked through an action lifecycle controller.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Returns the client type identifier (e.g., "http", "memory").
    fn client_type(&self) -> &str;

    // Queries
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;
    async fn list_teams(&self, organization_id: &str) -> Result<Vec<Team>, AuthError>;
    async fn list_member_teams(&self, organization_id: &str, user_id: &str) -> Result<Vec<Team>, AuthError>;
    async fn list_team_members(&self, team_id: &str) -> Result<Vec<TeamMember>, AuthError>;
    async fn list_members(&self, organization_id: &str) -> Result<MemberList, AuthError>;
    async fn list_accounts(&self) -> Result<Vec<Account>, AuthError>;
    async fn account_info(&self, account_id: &str) -> Result<AccountInfo, AuthError>;
    async fn has_permission(&self, organization_id: &str, check: &PermissionCheck) -> Result<bool, AuthError>;

    // Team mutations
    async fn create_team(&self, organization_id: &str, name: &str) -> Result<Team, AuthError>;
    async fn update_team(&self, team_id: &str, name: &str) -> Result<Team, AuthError>;
    async fn remove_team(&self, team_id: &str, organization_id: &str) -> Result<(), AuthError>;
    async fn add_team_member(&self, team_id: &str, user_id: &str) -> Result<(), AuthError>;
    async fn remove_team_member(&self, team_id: &str, user_id: &str) -> Result<(), AuthError>;

    // Provider mutations
    async fn link_social(&self, provider: &str, callback_url: &str) -> Result<LinkRedirect, AuthError>;
    async fn link_oauth2(&self, provider_id: &str, callback_url: &str) -> Result<LinkRedirect, AuthError>;
    async fn unlink_account(&self, provider_id: &str, account_id: Option<&str>) -> Result<(), AuthError>;
}

/// Builds the client selected by `[auth] client`.
///
/// The HTTP client reads its session token from the configured environment
/// variable; a missing token is an error since every route needs a session.
pub fn client_from_config(config: &crate::config::AuthConfig) -> anyhow::Result<std::sync::Arc<dyn AuthClient>> {
    use anyhow::Context;

    match config.client {
        crate::config::ClientKind::Memory => Ok(std::sync::Arc::new(MemoryAuthClient::demo(
            config.effective_organization_id(),
        ))),
        crate::config::ClientKind::Http => {
            let token = std::env::var(&config.session_token_env).with_context(|| {
                format!(
                    "{} ({})",
                    crate::constants::ERROR_NO_SESSION_TOKEN,
                    config.session_token_env
                )
            })?;
            let client = HttpAuthClient::new(&config.base_url, Some(token), config.request_timeout())
                .context("Failed to build HTTP auth client")?;
            Ok(std::sync::Arc::new(client))
        }
    }
}
