use async_trait::async_trait;

use super::query::Loader;
use crate::auth::{AuthClient, AuthError};
use crate::entities::{team, Account, AccountInfo, MemberList, Team};

/// Teams of the organization, oldest first.
#[derive(Debug, Clone)]
pub struct ListTeams {
    pub organization_id: String,
}

#[async_trait]
impl Loader<Vec<Team>> for ListTeams {
    fn describe(&self) -> String {
        format!("teams of {}", self.organization_id)
    }

    async fn load(&self, client: &dyn AuthClient) -> Result<Vec<Team>, AuthError> {
        let mut teams = client.list_teams(&self.organization_id).await?;
        team::sort_by_creation(&mut teams);
        Ok(teams)
    }
}

/// Teams a given member belongs to.
#[derive(Debug, Clone)]
pub struct ListMemberTeams {
    pub organization_id: String,
    pub user_id: String,
}

#[async_trait]
impl Loader<Vec<Team>> for ListMemberTeams {
    fn describe(&self) -> String {
        format!("teams of member {}", self.user_id)
    }

    async fn load(&self, client: &dyn AuthClient) -> Result<Vec<Team>, AuthError> {
        client.list_member_teams(&self.organization_id, &self.user_id).await
    }
}

#[derive(Debug, Clone)]
pub struct ListMembers {
    pub organization_id: String,
}

#[async_trait]
impl Loader<MemberList> for ListMembers {
    fn describe(&self) -> String {
        format!("members of {}", self.organization_id)
    }

    async fn load(&self, client: &dyn AuthClient) -> Result<MemberList, AuthError> {
        client.list_members(&self.organization_id).await
    }
}

/// Linked accounts of the signed-in user.
#[derive(Debug, Clone, Default)]
pub struct ListAccounts;

#[async_trait]
impl Loader<Vec<Account>> for ListAccounts {
    fn describe(&self) -> String {
        "linked accounts".to_string()
    }

    async fn load(&self, client: &dyn AuthClient) -> Result<Vec<Account>, AuthError> {
        client.list_accounts().await
    }
}

/// Provider profile of one linked account.
#[derive(Debug, Clone)]
pub struct AccountInfoLoader {
    pub account_id: String,
}

#[async_trait]
impl Loader<AccountInfo> for AccountInfoLoader {
    fn describe(&self) -> String {
        format!("account info for {}", self.account_id)
    }

    async fn load(&self, client: &dyn AuthClient) -> Result<AccountInfo, AuthError> {
        client.account_info(&self.account_id).await
    }
}
