//! In-process auth directory.
//!
//! Mirrors the organization/team/account rules of the Better Auth server
//! closely enough to drive the console in demo mode and in tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

use super::{AuthClient, AuthError, LinkRedirect, PermissionCheck};
use crate::entities::session::SessionInfo;
use crate::entities::{Account, AccountInfo, Member, MemberList, Session, SessionUser, Team, TeamMember, UserSummary};

#[derive(Default)]
struct Directory {
    session: Option<Session>,
    members: Vec<Member>,
    teams: Vec<Team>,
    team_members: Vec<TeamMember>,
    accounts: Vec<Account>,
    account_emails: HashMap<String, String>,
    grants: HashMap<String, Vec<(String, String)>>,
    failures: HashMap<String, AuthError>,
    calls: Vec<String>,
}

impl Directory {
    fn session_user_id(&self) -> Result<String, AuthError> {
        self.session
            .as_ref()
            .map(|session| session.user.id.clone())
            .ok_or(AuthError::Unauthenticated)
    }

    fn role_of(&self, organization_id: &str, user_id: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|member| member.organization_id == organization_id && member.user_id == user_id)
            .map(|member| member.role.as_str())
    }

    fn allows(&self, organization_id: &str, resource: &str, action: &str) -> Result<bool, AuthError> {
        let user_id = self.session_user_id()?;
        let Some(role) = self.role_of(organization_id, &user_id) else {
            return Ok(false);
        };
        if role == "owner" {
            return Ok(true);
        }
        Ok(self
            .grants
            .get(role)
            .is_some_and(|grants| grants.iter().any(|(r, a)| r == resource && a == action)))
    }

    fn require(&self, organization_id: &str, action: &str, code: &str, message: &str) -> Result<(), AuthError> {
        if self.allows(organization_id, "team", action)? {
            Ok(())
        } else {
            Err(AuthError::api(403, code, message))
        }
    }

    fn team(&self, team_id: &str) -> Result<&Team, AuthError> {
        self.teams
            .iter()
            .find(|team| team.id == team_id)
            .ok_or_else(|| AuthError::api(404, "TEAM_NOT_FOUND", "Team not found"))
    }

    fn take_failure(&mut self, operation: &str) -> Result<(), AuthError> {
        match self.failures.remove(operation) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Auth client backed by an in-memory directory.
pub struct MemoryAuthClient {
    directory: Mutex<Directory>,
    latency: Duration,
}

impl MemoryAuthClient {
    /// Start a directory with `user` signed in as owner of `organization_id`.
    pub fn new(user: SessionUser, organization_id: &str) -> Self {
        let now = Utc::now();
        let member = Member {
            id: format!("member-{}", user.id),
            organization_id: organization_id.to_string(),
            user_id: user.id.clone(),
            role: "owner".to_string(),
            created_at: now,
            user: Some(UserSummary {
                id: user.id.clone(),
                name: Some(user.name.clone()),
                email: Some(user.email.clone()),
            }),
        };
        let session = Session {
            session: SessionInfo {
                id: Uuid::new_v4().to_string(),
                user_id: user.id.clone(),
                expires_at: now + ChronoDuration::days(7),
                active_organization_id: Some(organization_id.to_string()),
            },
            user,
        };

        Self {
            directory: Mutex::new(Directory {
                session: Some(session),
                members: vec![member],
                ..Default::default()
            }),
            latency: Duration::ZERO,
        }
    }

    /// A small seeded organization used by demo mode.
    pub fn demo(organization_id: &str) -> Self {
        let base = Utc::now() - ChronoDuration::days(30);
        Self::new(
            SessionUser {
                id: "user-ada".to_string(),
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            },
            organization_id,
        )
        .with_member("user-grace", "Grace Hopper", "grace@example.com", "admin")
        .with_member("user-alan", "Alan Turing", "alan@example.com", "member")
        .with_team("team-platform", "Platform", base)
        .with_team("team-research", "Research", base + ChronoDuration::days(3))
        .with_team("team-design", "Design", base + ChronoDuration::days(9))
        .with_team_member("team-platform", "user-ada")
        .with_team_member("team-research", "user-grace")
        .with_account("credential", "user-ada", "ada@example.com")
        .with_account("github", "gh-1815", "ada.lovelace@users.noreply.github.com")
        .grant("admin", "team", "update")
        .with_latency(Duration::from_millis(400))
    }

    pub fn with_member(self, user_id: &str, name: &str, email: &str, role: &str) -> Self {
        if let Ok(mut dir) = self.directory.lock() {
            let organization_id = dir
                .members
                .first()
                .map(|member| member.organization_id.clone())
                .unwrap_or_default();
            dir.members.push(Member {
                id: format!("member-{user_id}"),
                organization_id,
                user_id: user_id.to_string(),
                role: role.to_string(),
                created_at: Utc::now(),
                user: Some(UserSummary {
                    id: user_id.to_string(),
                    name: Some(name.to_string()),
                    email: Some(email.to_string()),
                }),
            });
        }
        self
    }

    pub fn with_team(self, team_id: &str, name: &str, created_at: DateTime<Utc>) -> Self {
        if let Ok(mut dir) = self.directory.lock() {
            let organization_id = dir
                .members
                .first()
                .map(|member| member.organization_id.clone())
                .unwrap_or_default();
            dir.teams.push(Team {
                id: team_id.to_string(),
                name: name.to_string(),
                organization_id,
                created_at,
                updated_at: None,
            });
        }
        self
    }

    pub fn with_team_member(self, team_id: &str, user_id: &str) -> Self {
        if let Ok(mut dir) = self.directory.lock() {
            dir.team_members.push(TeamMember {
                id: Uuid::new_v4().to_string(),
                team_id: team_id.to_string(),
                user_id: user_id.to_string(),
                created_at: Utc::now(),
            });
        }
        self
    }

    pub fn with_account(self, provider_id: &str, account_id: &str, email: &str) -> Self {
        if let Ok(mut dir) = self.directory.lock() {
            dir.accounts.push(Account {
                id: Uuid::new_v4().to_string(),
                provider_id: provider_id.to_string(),
                account_id: account_id.to_string(),
                created_at: Some(Utc::now()),
            });
            dir.account_emails.insert(account_id.to_string(), email.to_string());
        }
        self
    }

    /// Grant `role` permission to perform `action` on `resource`.
    pub fn grant(self, role: &str, resource: &str, action: &str) -> Self {
        if let Ok(mut dir) = self.directory.lock() {
            dir.grants
                .entry(role.to_string())
                .or_default()
                .push((resource.to_string(), action.to_string()));
        }
        self
    }

    /// Switch the signed-in user to another member of the directory.
    pub fn sign_in_as(self, user_id: &str) -> Self {
        if let Ok(mut dir) = self.directory.lock() {
            let user = dir
                .members
                .iter()
                .find(|member| member.user_id == user_id)
                .and_then(|member| member.user.clone());
            if let (Some(user), Some(session)) = (user, dir.session.as_mut()) {
                session.session.user_id = user.id.clone();
                session.user = SessionUser {
                    id: user.id,
                    name: user.name.unwrap_or_default(),
                    email: user.email.unwrap_or_default(),
                };
            }
        }
        self
    }

    /// Delay every mutation, so busy states are visible in demo mode.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make the next call of `operation` (e.g. "addTeamMember") fail with `error`.
    pub fn fail_next(&self, operation: &str, error: AuthError) {
        if let Ok(mut dir) = self.directory.lock() {
            dir.failures.insert(operation.to_string(), error);
        }
    }

    /// Every mutation and refetch received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.directory.lock().map(|dir| dir.calls.clone()).unwrap_or_default()
    }

    fn with_directory<T>(
        &self,
        operation: &str,
        call: String,
        f: impl FnOnce(&mut Directory) -> Result<T, AuthError>,
    ) -> Result<T, AuthError> {
        let mut dir = self
            .directory
            .lock()
            .map_err(|_| AuthError::InvalidData("directory lock poisoned".to_string()))?;
        dir.calls.push(call);
        dir.take_failure(operation)?;
        f(&mut dir)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl AuthClient for MemoryAuthClient {
    fn client_type(&self) -> &str {
        "memory"
    }

    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        self.with_directory("getSession", "getSession()".to_string(), |dir| Ok(dir.session.clone()))
    }

    async fn list_teams(&self, organization_id: &str) -> Result<Vec<Team>, AuthError> {
        self.with_directory(
            "listTeams",
            format!("listTeams(organizationId={organization_id})"),
            |dir| {
                Ok(dir
                    .teams
                    .iter()
                    .filter(|team| team.organization_id == organization_id)
                    .cloned()
                    .collect())
            },
        )
    }

    async fn list_member_teams(&self, organization_id: &str, user_id: &str) -> Result<Vec<Team>, AuthError> {
        self.with_directory(
            "listMemberTeams",
            format!("listMemberTeams(organizationId={organization_id}, userId={user_id})"),
            |dir| {
                Ok(dir
                    .teams
                    .iter()
                    .filter(|team| team.organization_id == organization_id)
                    .filter(|team| {
                        dir.team_members
                            .iter()
                            .any(|tm| tm.team_id == team.id && tm.user_id == user_id)
                    })
                    .cloned()
                    .collect())
            },
        )
    }

    async fn list_team_members(&self, team_id: &str) -> Result<Vec<TeamMember>, AuthError> {
        self.with_directory("listTeamMembers", format!("listTeamMembers(teamId={team_id})"), |dir| {
            dir.team(team_id)?;
            Ok(dir
                .team_members
                .iter()
                .filter(|tm| tm.team_id == team_id)
                .cloned()
                .collect())
        })
    }

    async fn list_members(&self, organization_id: &str) -> Result<MemberList, AuthError> {
        self.with_directory(
            "listMembers",
            format!("listMembers(organizationId={organization_id})"),
            |dir| {
                let members: Vec<Member> = dir
                    .members
                    .iter()
                    .filter(|member| member.organization_id == organization_id)
                    .cloned()
                    .collect();
                let total = members.len();
                Ok(MemberList { members, total })
            },
        )
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AuthError> {
        self.with_directory("listAccounts", "listAccounts()".to_string(), |dir| {
            dir.session_user_id()?;
            Ok(dir.accounts.clone())
        })
    }

    async fn account_info(&self, account_id: &str) -> Result<AccountInfo, AuthError> {
        self.with_directory("accountInfo", format!("accountInfo(accountId={account_id})"), |dir| {
            let email = dir
                .account_emails
                .get(account_id)
                .cloned()
                .ok_or_else(|| AuthError::api(404, "ACCOUNT_NOT_FOUND", "Account not found"))?;
            Ok(AccountInfo {
                user: UserSummary {
                    id: account_id.to_string(),
                    name: None,
                    email: Some(email),
                },
            })
        })
    }

    async fn has_permission(&self, organization_id: &str, check: &PermissionCheck) -> Result<bool, AuthError> {
        self.with_directory(
            "hasPermission",
            format!("hasPermission(organizationId={organization_id}, {:?})", check.permissions),
            |dir| {
                for (resource, actions) in &check.permissions {
                    for action in actions {
                        if !dir.allows(organization_id, resource, action)? {
                            return Ok(false);
                        }
                    }
                }
                Ok(true)
            },
        )
    }

    async fn create_team(&self, organization_id: &str, name: &str) -> Result<Team, AuthError> {
        self.simulate_latency().await;
        self.with_directory(
            "createTeam",
            format!("createTeam(organizationId={organization_id}, name={name})"),
            |dir| {
                dir.require(
                    organization_id,
                    "create",
                    "YOU_ARE_NOT_ALLOWED_TO_CREATE_TEAMS_IN_THIS_ORGANIZATION",
                    "You are not allowed to create teams in this organization",
                )?;
                if dir
                    .teams
                    .iter()
                    .any(|team| team.organization_id == organization_id && team.name == name)
                {
                    return Err(AuthError::api(400, "TEAM_ALREADY_EXISTS", "Team already exists"));
                }
                let team = Team {
                    id: Uuid::new_v4().to_string(),
                    name: name.to_string(),
                    organization_id: organization_id.to_string(),
                    created_at: Utc::now(),
                    updated_at: None,
                };
                dir.teams.push(team.clone());
                Ok(team)
            },
        )
    }

    async fn update_team(&self, team_id: &str, name: &str) -> Result<Team, AuthError> {
        self.simulate_latency().await;
        self.with_directory("updateTeam", format!("updateTeam(teamId={team_id}, name={name})"), |dir| {
            let organization_id = dir.team(team_id)?.organization_id.clone();
            dir.require(
                &organization_id,
                "update",
                "YOU_ARE_NOT_ALLOWED_TO_UPDATE_THIS_TEAM",
                "You are not allowed to update this team",
            )?;
            let team = dir
                .teams
                .iter_mut()
                .find(|team| team.id == team_id)
                .ok_or_else(|| AuthError::api(404, "TEAM_NOT_FOUND", "Team not found"))?;
            team.name = name.to_string();
            team.updated_at = Some(Utc::now());
            Ok(team.clone())
        })
    }

    async fn remove_team(&self, team_id: &str, organization_id: &str) -> Result<(), AuthError> {
        self.simulate_latency().await;
        self.with_directory(
            "removeTeam",
            format!("removeTeam(teamId={team_id}, organizationId={organization_id})"),
            |dir| {
                dir.team(team_id)?;
                dir.require(
                    organization_id,
                    "delete",
                    "YOU_ARE_NOT_ALLOWED_TO_DELETE_THIS_TEAM",
                    "You are not allowed to delete this team",
                )?;
                dir.teams.retain(|team| team.id != team_id);
                dir.team_members.retain(|tm| tm.team_id != team_id);
                Ok(())
            },
        )
    }

    async fn add_team_member(&self, team_id: &str, user_id: &str) -> Result<(), AuthError> {
        self.simulate_latency().await;
        self.with_directory(
            "addTeamMember",
            format!("addTeamMember(teamId={team_id}, userId={user_id})"),
            |dir| {
                let organization_id = dir.team(team_id)?.organization_id.clone();
                dir.require(
                    &organization_id,
                    "update",
                    "YOU_ARE_NOT_ALLOWED_TO_UPDATE_THIS_TEAM",
                    "You are not allowed to update this team",
                )?;
                if dir.role_of(&organization_id, user_id).is_none() {
                    return Err(AuthError::api(
                        400,
                        "USER_IS_NOT_A_MEMBER_OF_THE_ORGANIZATION",
                        "User is not a member of the organization",
                    ));
                }
                if dir
                    .team_members
                    .iter()
                    .any(|tm| tm.team_id == team_id && tm.user_id == user_id)
                {
                    return Err(AuthError::api(
                        400,
                        "USER_IS_ALREADY_A_MEMBER_OF_THIS_TEAM",
                        "User is already a member of this team",
                    ));
                }
                dir.team_members.push(TeamMember {
                    id: Uuid::new_v4().to_string(),
                    team_id: team_id.to_string(),
                    user_id: user_id.to_string(),
                    created_at: Utc::now(),
                });
                Ok(())
            },
        )
    }

    async fn remove_team_member(&self, team_id: &str, user_id: &str) -> Result<(), AuthError> {
        self.simulate_latency().await;
        self.with_directory(
            "removeTeamMember",
            format!("removeTeamMember(teamId={team_id}, userId={user_id})"),
            |dir| {
                let organization_id = dir.team(team_id)?.organization_id.clone();
                dir.require(
                    &organization_id,
                    "update",
                    "YOU_ARE_NOT_ALLOWED_TO_UPDATE_THIS_TEAM",
                    "You are not allowed to update this team",
                )?;
                let before = dir.team_members.len();
                dir.team_members
                    .retain(|tm| !(tm.team_id == team_id && tm.user_id == user_id));
                if dir.team_members.len() == before {
                    return Err(AuthError::api(
                        400,
                        "USER_IS_NOT_A_MEMBER_OF_THE_TEAM",
                        "User is not a member of the team",
                    ));
                }
                Ok(())
            },
        )
    }

    async fn link_social(&self, provider: &str, callback_url: &str) -> Result<LinkRedirect, AuthError> {
        self.simulate_latency().await;
        self.with_directory(
            "linkSocial",
            format!("linkSocial(provider={provider}, callbackURL={callback_url})"),
            |dir| {
                dir.session_user_id()?;
                Ok(LinkRedirect {
                    url: format!("https://{provider}.example.com/authorize?redirect_uri={callback_url}"),
                    redirect: true,
                })
            },
        )
    }

    async fn link_oauth2(&self, provider_id: &str, callback_url: &str) -> Result<LinkRedirect, AuthError> {
        self.simulate_latency().await;
        self.with_directory(
            "linkOAuth2",
            format!("linkOAuth2(providerId={provider_id}, callbackURL={callback_url})"),
            |dir| {
                dir.session_user_id()?;
                Ok(LinkRedirect {
                    url: format!("https://oauth.example.com/{provider_id}/authorize?redirect_uri={callback_url}"),
                    redirect: true,
                })
            },
        )
    }

    async fn unlink_account(&self, provider_id: &str, account_id: Option<&str>) -> Result<(), AuthError> {
        self.simulate_latency().await;
        self.with_directory(
            "unlinkAccount",
            format!(
                "unlinkAccount(providerId={provider_id}, accountId={})",
                account_id.unwrap_or("-")
            ),
            |dir| {
                dir.session_user_id()?;
                let position = dir
                    .accounts
                    .iter()
                    .position(|account| {
                        account.provider_id == provider_id
                            && account_id.map_or(true, |id| account.account_id == id)
                    })
                    .ok_or_else(|| AuthError::api(400, "ACCOUNT_NOT_FOUND", "Account not found"))?;
                if dir.accounts.len() == 1 {
                    return Err(AuthError::api(
                        400,
                        "FAILED_TO_UNLINK_LAST_ACCOUNT",
                        "You can't unlink your last account",
                    ));
                }
                dir.accounts.remove(position);
                Ok(())
            },
        )
    }
}
