use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::member::UserSummary;

/// A provider account linked to the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub provider_id: String,
    pub account_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Provider-side profile of a linked account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub user: UserSummary,
}
