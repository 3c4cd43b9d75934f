//! Reusable UI components

pub mod dialog_component;
pub mod dialogs;
pub mod members_card;
pub mod provider_cell;
pub mod providers_card;
pub mod settings_card;
pub mod skeleton;
pub mod team_cell;
pub mod teams_card;
pub mod toast_host;
pub mod update_member_team_cell;

// Component exports
pub use dialog_component::{ActiveDialog, DialogComponent};
pub use members_card::MembersCard;
pub use provider_cell::ProviderCell;
pub use providers_card::ProvidersCard;
pub use skeleton::SettingsCellSkeleton;
pub use team_cell::TeamCell;
pub use teams_card::TeamsCard;
pub use toast_host::ToastHost;
pub use update_member_team_cell::UpdateMemberTeamCell;
