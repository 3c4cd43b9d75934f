use std::fmt;

use crate::auth::{AuthClient, AuthError};
use crate::entities::Team;
use crate::localization::keys;

/// One state-changing request against the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateTeam { organization_id: String, name: String },
    UpdateTeam { team_id: String, name: String },
    RemoveTeam { team_id: String, organization_id: String },
    AddTeamMember { team_id: String, user_id: String },
    RemoveTeamMember { team_id: String, user_id: String },
    LinkSocial { provider: String, callback_url: String },
    LinkOAuth2 { provider_id: String, callback_url: String },
    UnlinkAccount { provider_id: String, account_id: Option<String> },
}

/// What a successful mutation asks the UI to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationResponse {
    Done,
    /// Linking continues at this URL.
    Redirect(String),
}

impl Mutation {
    /// Operation name as the auth client spells it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateTeam { .. } => "createTeam",
            Self::UpdateTeam { .. } => "updateTeam",
            Self::RemoveTeam { .. } => "removeTeam",
            Self::AddTeamMember { .. } => "addTeamMember",
            Self::RemoveTeamMember { .. } => "removeTeamMember",
            Self::LinkSocial { .. } => "linkSocial",
            Self::LinkOAuth2 { .. } => "linkOAuth2",
            Self::UnlinkAccount { .. } => "unlinkAccount",
        }
    }

    /// Localization key of the success toast.
    pub fn success_key(&self) -> &'static str {
        match self {
            Self::CreateTeam { .. } => keys::CREATE_TEAM_SUCCESS,
            Self::UpdateTeam { .. } => keys::UPDATE_TEAM_SUCCESS,
            Self::RemoveTeam { .. } => keys::DELETE_TEAM_SUCCESS,
            Self::AddTeamMember { .. } => keys::ADD_TEAM_MEMBER_SUCCESS,
            Self::RemoveTeamMember { .. } => keys::REMOVE_TEAM_MEMBER_SUCCESS,
            Self::LinkSocial { .. } | Self::LinkOAuth2 { .. } => keys::LINK_ACCOUNT_REDIRECT,
            Self::UnlinkAccount { .. } => keys::UNLINK_ACCOUNT_SUCCESS,
        }
    }

    pub async fn execute(&self, client: &dyn AuthClient) -> Result<MutationResponse, AuthError> {
        match self {
            Self::CreateTeam { organization_id, name } => {
                client.create_team(organization_id, name).await?;
                Ok(MutationResponse::Done)
            }
            Self::UpdateTeam { team_id, name } => {
                client.update_team(team_id, name).await?;
                Ok(MutationResponse::Done)
            }
            Self::RemoveTeam { team_id, organization_id } => {
                client.remove_team(team_id, organization_id).await?;
                Ok(MutationResponse::Done)
            }
            Self::AddTeamMember { team_id, user_id } => {
                client.add_team_member(team_id, user_id).await?;
                Ok(MutationResponse::Done)
            }
            Self::RemoveTeamMember { team_id, user_id } => {
                client.remove_team_member(team_id, user_id).await?;
                Ok(MutationResponse::Done)
            }
            Self::LinkSocial { provider, callback_url } => {
                let redirect = client.link_social(provider, callback_url).await?;
                Ok(MutationResponse::Redirect(redirect.url))
            }
            Self::LinkOAuth2 {
                provider_id,
                callback_url,
            } => {
                let redirect = client.link_oauth2(provider_id, callback_url).await?;
                Ok(MutationResponse::Redirect(redirect.url))
            }
            Self::UnlinkAccount {
                provider_id,
                account_id,
            } => {
                client.unlink_account(provider_id, account_id.as_deref()).await?;
                Ok(MutationResponse::Done)
            }
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateTeam { organization_id, name } => {
                write!(f, "createTeam(organizationId={organization_id}, name={name})")
            }
            Self::UpdateTeam { team_id, name } => write!(f, "updateTeam(teamId={team_id}, name={name})"),
            Self::RemoveTeam { team_id, organization_id } => {
                write!(f, "removeTeam(teamId={team_id}, organizationId={organization_id})")
            }
            Self::AddTeamMember { team_id, user_id } => {
                write!(f, "addTeamMember(teamId={team_id}, userId={user_id})")
            }
            Self::RemoveTeamMember { team_id, user_id } => {
                write!(f, "removeTeamMember(teamId={team_id}, userId={user_id})")
            }
            Self::LinkSocial { provider, callback_url } => {
                write!(f, "linkSocial(provider={provider}, callbackURL={callback_url})")
            }
            Self::LinkOAuth2 {
                provider_id,
                callback_url,
            } => write!(f, "linkOAuth2(providerId={provider_id}, callbackURL={callback_url})"),
            Self::UnlinkAccount {
                provider_id,
                account_id,
            } => write!(
                f,
                "unlinkAccount(providerId={provider_id}, accountId={})",
                account_id.as_deref().unwrap_or("-")
            ),
        }
    }
}

/// State a toggle control moves its target into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Attached,
    Detached,
}

/// Add/remove and link/unlink controls.
///
/// The caller supplies whether the target is currently attached; the toggle
/// picks the opposite state and maps it to the mutation that reaches it.
pub trait Toggle {
    fn is_attached(&self) -> bool;

    fn apply(&self, target: TargetState) -> Mutation;

    fn target_state(&self) -> TargetState {
        if self.is_attached() {
            TargetState::Detached
        } else {
            TargetState::Attached
        }
    }

    fn mutation(&self) -> Mutation {
        self.apply(self.target_state())
    }
}

/// Membership of one user in one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipToggle {
    pub team_id: String,
    pub user_id: String,
    pub added: bool,
}

impl MembershipToggle {
    /// `added` is true when `team_id` is among the user's teams.
    pub fn from_member_teams(team_id: &str, user_id: &str, member_teams: &[Team]) -> Self {
        Self {
            team_id: team_id.to_string(),
            user_id: user_id.to_string(),
            added: member_teams.iter().any(|team| team.id == team_id),
        }
    }
}

impl Toggle for MembershipToggle {
    fn is_attached(&self) -> bool {
        self.added
    }

    fn apply(&self, target: TargetState) -> Mutation {
        match target {
            TargetState::Attached => Mutation::AddTeamMember {
                team_id: self.team_id.clone(),
                user_id: self.user_id.clone(),
            },
            TargetState::Detached => Mutation::RemoveTeamMember {
                team_id: self.team_id.clone(),
                user_id: self.user_id.clone(),
            },
        }
    }
}

/// Link state of one provider for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderToggle {
    pub provider_id: String,
    /// Present when the provider is already linked.
    pub account_id: Option<String>,
    /// Generic OAuth providers link through `oauth2/link`.
    pub other: bool,
    pub callback_url: String,
}

impl Toggle for ProviderToggle {
    fn is_attached(&self) -> bool {
        self.account_id.is_some()
    }

    fn apply(&self, target: TargetState) -> Mutation {
        match target {
            TargetState::Attached if self.other => Mutation::LinkOAuth2 {
                provider_id: self.provider_id.clone(),
                callback_url: self.callback_url.clone(),
            },
            TargetState::Attached => Mutation::LinkSocial {
                provider: self.provider_id.clone(),
                callback_url: self.callback_url.clone(),
            },
            TargetState::Detached => Mutation::UnlinkAccount {
                provider_id: self.provider_id.clone(),
                account_id: self.account_id.clone(),
            },
        }
    }
}

/// A team name is submittable once it has non-whitespace content.
pub fn validate_team_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
