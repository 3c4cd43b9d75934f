//! Dialog components module

pub mod common;
mod create_team_dialog;
mod delete_team_dialog;
mod logs_dialog;
mod update_member_teams_dialog;
mod update_team_dialog;

pub use create_team_dialog::CreateTeamDialog;
pub use delete_team_dialog::DeleteTeamDialog;
pub use logs_dialog::LogsDialog;
pub use update_member_teams_dialog::UpdateMemberTeamsDialog;
pub use update_team_dialog::UpdateTeamDialog;
