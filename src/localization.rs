//! Localized strings for every widget.
//!
//! Widgets look strings up by key. A card or dialog may receive a partial
//! override table which is layered over the context table, the same way a
//! caller-supplied localization wins over the application-wide one.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::auth::AuthError;

/// Localization keys.
pub mod keys {
    pub const ADD: &str = "ADD";
    pub const ADD_TEAM_MEMBER_SUCCESS: &str = "ADD_TEAM_MEMBER_SUCCESS";
    pub const CANCEL: &str = "CANCEL";
    pub const CREATE: &str = "CREATE";
    pub const CREATE_TEAM: &str = "CREATE_TEAM";
    pub const CREATE_TEAM_DESCRIPTION: &str = "CREATE_TEAM_DESCRIPTION";
    pub const CREATE_TEAM_INSTRUCTIONS: &str = "CREATE_TEAM_INSTRUCTIONS";
    pub const CREATE_TEAM_SUCCESS: &str = "CREATE_TEAM_SUCCESS";
    pub const DELETE: &str = "DELETE";
    pub const DELETE_TEAM: &str = "DELETE_TEAM";
    pub const DELETE_TEAM_DESCRIPTION: &str = "DELETE_TEAM_DESCRIPTION";
    pub const DELETE_TEAM_SUCCESS: &str = "DELETE_TEAM_SUCCESS";
    pub const DONE: &str = "DONE";
    pub const LINK: &str = "LINK";
    pub const LINK_ACCOUNT_REDIRECT: &str = "LINK_ACCOUNT_REDIRECT";
    pub const MEMBERS: &str = "MEMBERS";
    pub const MEMBERS_DESCRIPTION: &str = "MEMBERS_DESCRIPTION";
    pub const NO_MEMBERS_FOUND: &str = "NO_MEMBERS_FOUND";
    pub const NO_TEAMS_FOUND: &str = "NO_TEAMS_FOUND";
    pub const PROVIDERS: &str = "PROVIDERS";
    pub const PROVIDERS_DESCRIPTION: &str = "PROVIDERS_DESCRIPTION";
    pub const REMOVE: &str = "REMOVE";
    pub const REMOVE_TEAM_MEMBER_SUCCESS: &str = "REMOVE_TEAM_MEMBER_SUCCESS";
    pub const REQUEST_FAILED: &str = "REQUEST_FAILED";
    pub const TEAM: &str = "TEAM";
    pub const TEAMS: &str = "TEAMS";
    pub const TEAMS_DESCRIPTION: &str = "TEAMS_DESCRIPTION";
    pub const TEAM_NAME: &str = "TEAM_NAME";
    pub const TEAM_NAME_PLACEHOLDER: &str = "TEAM_NAME_PLACEHOLDER";
    pub const UNLINK: &str = "UNLINK";
    pub const UNLINK_ACCOUNT_SUCCESS: &str = "UNLINK_ACCOUNT_SUCCESS";
    pub const UPDATE: &str = "UPDATE";
    pub const UPDATE_TEAM: &str = "UPDATE_TEAM";
    pub const UPDATE_TEAM_DESCRIPTION: &str = "UPDATE_TEAM_DESCRIPTION";
    pub const UPDATE_TEAM_SUCCESS: &str = "UPDATE_TEAM_SUCCESS";
    pub const UPDATE_TEAMS: &str = "UPDATE_TEAMS";
    pub const UPDATE_TEAMS_DESCRIPTION: &str = "UPDATE_TEAMS_DESCRIPTION";
}

const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    (keys::ADD, "Add"),
    (keys::ADD_TEAM_MEMBER_SUCCESS, "Member added to team"),
    (keys::CANCEL, "Cancel"),
    (keys::CREATE, "Create"),
    (keys::CREATE_TEAM, "Create Team"),
    (keys::CREATE_TEAM_DESCRIPTION, "Create a new team in this organization."),
    (keys::CREATE_TEAM_INSTRUCTIONS, "Teams group members of the organization."),
    (keys::CREATE_TEAM_SUCCESS, "Team created successfully"),
    (keys::DELETE, "Delete"),
    (keys::DELETE_TEAM, "Delete Team"),
    (keys::DELETE_TEAM_DESCRIPTION, "Permanently remove this team. Members stay in the organization."),
    (keys::DELETE_TEAM_SUCCESS, "Team deleted successfully"),
    (keys::DONE, "Done"),
    (keys::LINK, "Link"),
    (keys::LINK_ACCOUNT_REDIRECT, "Continue linking in your browser"),
    (keys::MEMBERS, "Members"),
    (keys::MEMBERS_DESCRIPTION, "Add, remove and manage the teams of organization members."),
    (keys::NO_MEMBERS_FOUND, "No members found"),
    (keys::NO_TEAMS_FOUND, "No teams found"),
    (keys::PROVIDERS, "Providers"),
    (keys::PROVIDERS_DESCRIPTION, "Connect your account with a third-party service."),
    (keys::REMOVE, "Remove"),
    (keys::REMOVE_TEAM_MEMBER_SUCCESS, "Member removed from team"),
    (keys::REQUEST_FAILED, "Request failed"),
    (keys::TEAM, "Team"),
    (keys::TEAMS, "Teams"),
    (keys::TEAMS_DESCRIPTION, "Manage the teams of your organization."),
    (keys::TEAM_NAME, "Team Name"),
    (keys::TEAM_NAME_PLACEHOLDER, "Engineering"),
    (keys::UNLINK, "Unlink"),
    (keys::UNLINK_ACCOUNT_SUCCESS, "Account unlinked"),
    (keys::UPDATE, "Update"),
    (keys::UPDATE_TEAM, "Update Team"),
    (keys::UPDATE_TEAM_DESCRIPTION, "Change the name of this team."),
    (keys::UPDATE_TEAM_SUCCESS, "Team updated successfully"),
    (keys::UPDATE_TEAMS, "Update Teams"),
    (keys::UPDATE_TEAMS_DESCRIPTION, "Choose the teams this member belongs to."),
    // Error codes returned by the auth service
    ("ACCOUNT_NOT_FOUND", "Account not found"),
    ("FAILED_TO_UNLINK_LAST_ACCOUNT", "You can't unlink your last account"),
    ("TEAM_ALREADY_EXISTS", "A team with this name already exists"),
    ("TEAM_NOT_FOUND", "Team not found"),
    ("UNAUTHORIZED", "You need to sign in again"),
    ("USER_IS_ALREADY_A_MEMBER_OF_THIS_TEAM", "User is already a member of this team"),
    ("USER_IS_NOT_A_MEMBER_OF_THE_ORGANIZATION", "User is not a member of the organization"),
    ("USER_IS_NOT_A_MEMBER_OF_THE_TEAM", "User is not a member of the team"),
    (
        "YOU_ARE_NOT_ALLOWED_TO_CREATE_TEAMS_IN_THIS_ORGANIZATION",
        "You are not allowed to create teams in this organization",
    ),
    ("YOU_ARE_NOT_ALLOWED_TO_DELETE_THIS_TEAM", "You are not allowed to delete this team"),
    ("YOU_ARE_NOT_ALLOWED_TO_UPDATE_THIS_TEAM", "You are not allowed to update this team"),
];

static DEFAULTS: Lazy<HashMap<String, String>> = Lazy::new(|| {
    DEFAULT_ENTRIES
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
});

/// A table of localized strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Localization {
    entries: HashMap<String, String>,
}

impl Default for Localization {
    fn default() -> Self {
        Self {
            entries: DEFAULTS.clone(),
        }
    }
}

impl Localization {
    /// A table with no entries, used for partial overrides.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Layer `overrides` on top of this table.
    pub fn merged(&self, overrides: &Localization) -> Localization {
        let mut entries = self.entries.clone();
        entries.extend(overrides.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        Localization { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Localized text for `key`, or the key itself when nothing is mapped.
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Turns auth failures into the message shown in an error toast.
#[derive(Debug, Clone)]
pub struct ErrorLocalizer {
    localization: Localization,
    localize_errors: bool,
}

impl ErrorLocalizer {
    pub fn new(localization: Localization, localize_errors: bool) -> Self {
        Self {
            localization,
            localize_errors,
        }
    }

    /// Mapped code localization, then the service message, then the generic
    /// "request failed" text.
    pub fn message(&self, error: &AuthError) -> String {
        if self.localize_errors {
            if let Some(text) = error.code().and_then(|code| self.localization.get(code)) {
                return text.to_string();
            }
        }
        if let Some(message) = error.server_message() {
            return message.to_string();
        }
        self.localization.text(keys::REQUEST_FAILED)
    }
}
