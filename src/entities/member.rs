use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The user fields the member list embeds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub organization_id: String,
    pub user_id: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

impl Member {
    /// Name shown in member cells, falling back to the email then the user id.
    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|user| user.name.as_deref().or(user.email.as_deref()))
            .unwrap_or(&self.user_id)
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.email.as_deref())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberList {
    pub members: Vec<Member>,
    pub total: usize,
}
