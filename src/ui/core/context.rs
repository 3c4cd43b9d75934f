use std::sync::Arc;

use crate::auth::AuthClient;
use crate::config::Config;
use crate::entities::{Account, MemberList, Team};
use crate::hooks::{ListAccounts, ListMemberTeams, ListMembers, ListTeams, Permissions, Query, TeamPermissions};
use crate::localization::{ErrorLocalizer, Localization};
use crate::logger::Logger;

/// Collaborators shared by every card and dialog.
pub struct AppContext {
    pub client: Arc<dyn AuthClient>,
    pub config: Config,
    pub organization_id: String,
    pub localization: Localization,
    pub errors: Arc<ErrorLocalizer>,
    pub logger: Logger,
    pub teams: Query<Vec<Team>>,
    pub permissions: Query<Permissions>,
    pub members: Query<MemberList>,
    pub accounts: Query<Vec<Account>>,
}

impl AppContext {
    pub fn new(client: Arc<dyn AuthClient>, config: Config, logger: Logger) -> Self {
        let organization_id = config.auth.effective_organization_id().to_string();
        let localization = config.localization();
        let errors = Arc::new(ErrorLocalizer::new(localization.clone(), config.auth.localize_errors));

        let teams = Query::new(
            Arc::clone(&client),
            ListTeams {
                organization_id: organization_id.clone(),
            },
        );
        let permissions = Query::new(
            Arc::clone(&client),
            TeamPermissions {
                organization_id: organization_id.clone(),
            },
        );
        let members = Query::new(
            Arc::clone(&client),
            ListMembers {
                organization_id: organization_id.clone(),
            },
        );
        let accounts = Query::new(Arc::clone(&client), ListAccounts);

        Self {
            client,
            config,
            organization_id,
            localization,
            errors,
            logger,
            teams,
            permissions,
            members,
            accounts,
        }
    }

    /// Teams of one member, loaded by the membership dialog
    pub fn member_teams(&self, user_id: &str) -> Query<Vec<Team>> {
        Query::new(
            Arc::clone(&self.client),
            ListMemberTeams {
                organization_id: self.organization_id.clone(),
                user_id: user_id.to_string(),
            },
        )
    }

    pub fn text(&self, key: &str) -> String {
        self.localization.text(key)
    }
}
