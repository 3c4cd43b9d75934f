//! Organization teams card.
//!
//! Lists the organization's teams oldest first and opens the create, update
//! and delete dialogs. Controls are only offered when the matching team
//! permission has been granted.

use crate::entities::{team, Team};
use crate::hooks::{Permissions, QueryState};
use crate::localization::{keys, ErrorLocalizer, Localization};
use crate::ui::components::settings_card::{actions_line, render_card, split_footer, CardAction};
use crate::ui::components::skeleton::SettingsCellSkeleton;
use crate::ui::components::team_cell::TeamCell;
use crate::ui::core::{
    actions::{Action, DialogType},
    Component,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{List, ListState, Paragraph},
    Frame,
};

pub struct TeamsCard {
    teams: Vec<Team>,
    permissions: Permissions,
    teams_pending: bool,
    permissions_pending: bool,
    error: Option<String>,
    list_state: ListState,
    pub focused: bool,
    localization: Localization,
}

impl TeamsCard {
    pub fn new(localization: Localization) -> Self {
        Self {
            teams: Vec::new(),
            permissions: Permissions::default(),
            teams_pending: true,
            permissions_pending: true,
            error: None,
            list_state: ListState::default(),
            focused: false,
            localization,
        }
    }

    /// Refresh rows from the latest query snapshots
    pub fn update_data(
        &mut self,
        teams: QueryState<Vec<Team>>,
        permissions: QueryState<Permissions>,
        errors: &ErrorLocalizer,
    ) {
        self.teams_pending = teams.is_pending;
        self.permissions_pending = permissions.is_pending;
        self.error = match (&teams.data, &teams.error) {
            (None, Some(err)) => Some(errors.message(err)),
            _ => None,
        };

        let selected_id = self.selected_team().map(|t| t.id.clone());
        self.teams = teams.data.unwrap_or_default();
        team::sort_by_creation(&mut self.teams);
        self.permissions = permissions.data.unwrap_or_default();

        // Keep the cursor on the same team when it survives the refetch
        let index = selected_id
            .and_then(|id| self.teams.iter().position(|t| t.id == id))
            .or_else(|| self.list_state.selected().map(|i| i.min(self.teams.len().saturating_sub(1))));
        self.list_state
            .select(if self.teams.is_empty() { None } else { index.or(Some(0)) });
    }

    pub fn is_loading(&self) -> bool {
        self.teams_pending || self.permissions_pending
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    pub fn selected_team(&self) -> Option<&Team> {
        self.list_state.selected().and_then(|i| self.teams.get(i))
    }

    fn select_next(&mut self) {
        if self.teams.is_empty() {
            return;
        }
        let next = self.list_state.selected().map_or(0, |i| (i + 1) % self.teams.len());
        self.list_state.select(Some(next));
    }

    fn select_previous(&mut self) {
        if self.teams.is_empty() {
            return;
        }
        let previous = self
            .list_state
            .selected()
            .map_or(0, |i| if i == 0 { self.teams.len() - 1 } else { i - 1 });
        self.list_state.select(Some(previous));
    }
}

impl Component for TeamsCard {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.is_loading() {
            return Action::None;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::NextRow,
            KeyCode::Char('k') | KeyCode::Up => Action::PreviousRow,
            KeyCode::Char('n') if self.permissions.can_create => Action::ShowDialog(DialogType::CreateTeam),
            KeyCode::Char('e') if self.permissions.can_update => self
                .selected_team()
                .map_or(Action::None, |t| Action::ShowDialog(DialogType::UpdateTeam(t.clone()))),
            KeyCode::Char('d') if self.permissions.can_delete => self
                .selected_team()
                .map_or(Action::None, |t| Action::ShowDialog(DialogType::DeleteTeam(t.clone()))),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        if !self.focused {
            return action;
        }
        match action {
            Action::NextRow => {
                self.select_next();
                Action::None
            }
            Action::PreviousRow => {
                self.select_previous();
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let body = render_card(
            f,
            rect,
            &self.localization.text(keys::TEAMS),
            &self.localization.text(keys::TEAMS_DESCRIPTION),
            self.focused,
        );
        let (list_area, footer) = split_footer(body);

        if self.is_loading() {
            SettingsCellSkeleton::default().render(f, list_area);
        } else if let Some(error) = &self.error {
            let paragraph = Paragraph::new(error.clone())
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center);
            f.render_widget(paragraph, list_area);
        } else if self.teams.is_empty() {
            let paragraph = Paragraph::new(self.localization.text(keys::NO_TEAMS_FOUND))
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(paragraph, list_area);
        } else {
            let selected = self.list_state.selected();
            let items: Vec<_> = self
                .teams
                .iter()
                .enumerate()
                .map(|(i, team)| {
                    TeamCell::new(team, &self.permissions).to_list_item(selected == Some(i), &self.localization)
                })
                .collect();
            f.render_stateful_widget(List::new(items), list_area, &mut self.list_state);
        }

        let footer_line = actions_line(&[CardAction {
            key: "n",
            label: self.localization.text(keys::CREATE_TEAM),
            enabled: !self.is_loading() && self.permissions.can_create,
        }]);
        f.render_widget(Paragraph::new(footer_line), footer);
    }
}
