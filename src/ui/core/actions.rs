use std::fmt;
use std::sync::Arc;

use crate::entities::{Member, Team};
use crate::lifecycle::{ActionController, FeedbackEvent, Mutation, RefreshSource};
use crate::localization::Localization;

/// Cards shown in the main view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardFocus {
    #[default]
    Teams,
    Members,
    Providers,
}

impl CardFocus {
    pub fn from_view(view: &str) -> Self {
        match view {
            crate::constants::VIEW_MEMBERS => Self::Members,
            crate::constants::VIEW_PROVIDERS => Self::Providers,
            _ => Self::Teams,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Teams => Self::Members,
            Self::Members => Self::Providers,
            Self::Providers => Self::Teams,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Teams => Self::Providers,
            Self::Members => Self::Teams,
            Self::Providers => Self::Members,
        }
    }
}

/// Data sets a background load can settle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataKind {
    Teams,
    Permissions,
    Members,
    Accounts,
    MemberTeams(String),
}

/// Query handed to a mutation for the post-success refetch.
#[derive(Clone)]
pub struct RefreshHandle {
    pub source: Arc<dyn RefreshSource>,
    pub data: DataKind,
}

impl RefreshHandle {
    pub fn new(source: impl RefreshSource + 'static, data: DataKind) -> Self {
        Self {
            source: Arc::new(source),
            data,
        }
    }
}

impl fmt::Debug for RefreshHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshHandle").field("data", &self.data).finish()
    }
}

/// A mutation bound to the control that triggered it.
#[derive(Debug, Clone)]
pub struct MutationRequest {
    pub mutation: Mutation,
    pub controller: ActionController,
    pub success_message: String,
    pub refresh: Option<RefreshHandle>,
    /// Close the open dialog once the run succeeds
    pub completes_dialog: bool,
}

impl MutationRequest {
    pub fn new(mutation: Mutation, controller: ActionController, localization: &Localization) -> Self {
        let success_message = localization.text(mutation.success_key());
        Self {
            mutation,
            controller,
            success_message,
            refresh: None,
            completes_dialog: false,
        }
    }

    pub fn refreshing(mut self, refresh: RefreshHandle) -> Self {
        self.refresh = Some(refresh);
        self
    }

    pub fn completing_dialog(mut self) -> Self {
        self.completes_dialog = true;
        self
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NextRow,
    PreviousRow,
    NextCard,
    PreviousCard,

    // Mutations and their results
    Submit(MutationRequest),
    Toast(FeedbackEvent),
    Navigate(String),

    // Background data
    DataRefreshed(DataKind),
    AccountInfoLoaded { account_id: String, email: Option<String> },

    // UI operations
    ShowDialog(DialogType),
    HideDialog,
    DialogCompleted,

    // App control
    Quit,
    None,
}

#[derive(Debug, Clone)]
pub enum DialogType {
    CreateTeam,
    UpdateTeam(Team),
    DeleteTeam(Team),
    UpdateMemberTeams(Member),
    Logs,
}
