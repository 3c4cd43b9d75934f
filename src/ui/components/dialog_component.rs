//! Container for the dialog currently on screen.
//!
//! Keys go to the open dialog first. Closing a dialog tears down its
//! controllers, so a request still in flight can no longer touch the UI.

use crate::entities::Team;
use crate::hooks::Query;
use crate::ui::components::dialogs::{
    CreateTeamDialog, DeleteTeamDialog, LogsDialog, UpdateMemberTeamsDialog, UpdateTeamDialog,
};
use crate::ui::core::{
    actions::{Action, DialogType},
    AppContext, Component,
};
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

pub enum ActiveDialog {
    CreateTeam(CreateTeamDialog),
    UpdateTeam(UpdateTeamDialog),
    DeleteTeam(DeleteTeamDialog),
    UpdateMemberTeams(UpdateMemberTeamsDialog),
    Logs(LogsDialog),
}

impl ActiveDialog {
    fn component(&mut self) -> &mut dyn Component {
        match self {
            Self::CreateTeam(dialog) => dialog,
            Self::UpdateTeam(dialog) => dialog,
            Self::DeleteTeam(dialog) => dialog,
            Self::UpdateMemberTeams(dialog) => dialog,
            Self::Logs(dialog) => dialog,
        }
    }

    fn teardown(&mut self) {
        match self {
            Self::CreateTeam(dialog) => dialog.teardown(),
            Self::UpdateTeam(dialog) => dialog.teardown(),
            Self::DeleteTeam(dialog) => dialog.teardown(),
            Self::UpdateMemberTeams(dialog) => dialog.teardown(),
            Self::Logs(_) => {}
        }
    }

    fn on_tick(&mut self) {
        match self {
            Self::CreateTeam(dialog) => dialog.on_tick(),
            Self::UpdateTeam(dialog) => dialog.on_tick(),
            Self::DeleteTeam(dialog) => dialog.on_tick(),
            Self::UpdateMemberTeams(dialog) => dialog.on_tick(),
            Self::Logs(_) => {}
        }
    }
}

#[derive(Default)]
pub struct DialogComponent {
    active: Option<ActiveDialog>,
}

impl DialogComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveDialog> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveDialog> {
        self.active.as_mut()
    }

    /// Open a dialog, closing whichever one was showing
    pub fn open(&mut self, dialog_type: DialogType, context: &AppContext) {
        self.close();
        let localization = context.localization.clone();
        let dialog = match dialog_type {
            DialogType::CreateTeam => ActiveDialog::CreateTeam(CreateTeamDialog::new(
                context.organization_id.clone(),
                context.teams.clone(),
                localization,
            )),
            DialogType::UpdateTeam(team) => {
                ActiveDialog::UpdateTeam(UpdateTeamDialog::new(team, context.teams.clone(), localization))
            }
            DialogType::DeleteTeam(team) => {
                ActiveDialog::DeleteTeam(DeleteTeamDialog::new(team, context.teams.clone(), localization))
            }
            DialogType::UpdateMemberTeams(member) => {
                let member_teams = context.member_teams(&member.user_id);
                ActiveDialog::UpdateMemberTeams(UpdateMemberTeamsDialog::new(
                    member,
                    context.teams.clone(),
                    member_teams,
                    localization,
                ))
            }
            DialogType::Logs => ActiveDialog::Logs(LogsDialog::new(context.logger.clone())),
        };
        self.active = Some(dialog);
    }

    /// Tear down and drop the open dialog
    pub fn close(&mut self) {
        if let Some(mut dialog) = self.active.take() {
            dialog.teardown();
        }
    }

    /// The member-teams query of an open membership dialog, to load it
    pub fn member_teams_query(&self) -> Option<(String, Query<Vec<Team>>)> {
        match &self.active {
            Some(ActiveDialog::UpdateMemberTeams(dialog)) => {
                Some((dialog.member().user_id.clone(), dialog.member_teams_query()))
            }
            _ => None,
        }
    }

    pub fn on_tick(&mut self) {
        if let Some(dialog) = &mut self.active {
            dialog.on_tick();
        }
    }
}

impl Component for DialogComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match &mut self.active {
            Some(dialog) => dialog.component().handle_key_events(key),
            None => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::HideDialog | Action::DialogCompleted => {
                self.close();
                Action::None
            }
            other => match &mut self.active {
                Some(dialog) => dialog.component().update(other),
                None => other,
            },
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if let Some(dialog) = &mut self.active {
            dialog.component().render(f, rect);
        }
    }
}
