//! Team membership dialog for one organization member.
//!
//! Shows every organization team, oldest first, with an add/remove control
//! per team. Each row owns its own lifecycle controller, so several rows can
//! be in flight at once; closing the dialog tears them all down.

use super::common::{create_dialog_block, create_instructions_paragraph};
use crate::entities::{team, Member, Team};
use crate::hooks::Query;
use crate::lifecycle::{ControllerArena, Toggle};
use crate::localization::{keys, Localization};
use crate::ui::components::skeleton::{spinner, SettingsCellSkeleton};
use crate::ui::components::update_member_team_cell::UpdateMemberTeamCell;
use crate::ui::core::{
    actions::{Action, DataKind, MutationRequest, RefreshHandle},
    Component,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListState, Paragraph, Wrap},
    Frame,
};

pub struct UpdateMemberTeamsDialog {
    member: Member,
    teams: Query<Vec<Team>>,
    member_teams: Query<Vec<Team>>,
    arena: ControllerArena<String>,
    cells: Vec<UpdateMemberTeamCell>,
    list_state: ListState,
    localization: Localization,
    tick: usize,
}

impl UpdateMemberTeamsDialog {
    pub fn new(
        member: Member,
        teams: Query<Vec<Team>>,
        member_teams: Query<Vec<Team>>,
        localization: Localization,
    ) -> Self {
        let mut dialog = Self {
            member,
            teams,
            member_teams,
            arena: ControllerArena::new(),
            cells: Vec::new(),
            list_state: ListState::default(),
            localization,
            tick: 0,
        };
        dialog.sync_cells();
        dialog
    }

    pub fn member(&self) -> &Member {
        &self.member
    }

    pub fn member_teams_query(&self) -> Query<Vec<Team>> {
        self.member_teams.clone()
    }

    /// True until both the organization teams and the member's teams loaded
    pub fn is_pending(&self) -> bool {
        self.teams.is_pending() || self.member_teams.is_pending()
    }

    pub fn cells(&self) -> &[UpdateMemberTeamCell] {
        &self.cells
    }

    pub fn select(&mut self, index: usize) {
        if index < self.cells.len() {
            self.list_state.select(Some(index));
        }
    }

    /// Rebuild rows from the latest query data
    pub fn sync_cells(&mut self) {
        let mut teams = self.teams.data().unwrap_or_default();
        team::sort_by_creation(&mut teams);
        let member_teams = self.member_teams.data().unwrap_or_default();

        self.arena.retain(teams.iter().map(|t| &t.id));
        let user_id = self.member.user_id.clone();
        self.cells = teams
            .into_iter()
            .map(|team| {
                let controller = self.arena.controller(&team.id);
                UpdateMemberTeamCell::new(team, &user_id, &member_teams, controller)
            })
            .collect();

        let index = self.list_state.selected().unwrap_or(0);
        self.list_state.select(if self.cells.is_empty() {
            None
        } else {
            Some(index.min(self.cells.len() - 1))
        });
    }

    pub fn teardown(&mut self) {
        self.arena.teardown_all();
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    fn toggle_selected(&self) -> Action {
        let Some(cell) = self.list_state.selected().and_then(|i| self.cells.get(i)) else {
            return Action::None;
        };
        if cell.is_disabled() {
            return Action::None;
        }
        let request = MutationRequest::new(cell.toggle().mutation(), cell.controller.clone(), &self.localization)
            .refreshing(RefreshHandle::new(
                self.member_teams.clone(),
                DataKind::MemberTeams(self.member.user_id.clone()),
            ));
        Action::Submit(request)
    }

    fn move_selection(&mut self, forward: bool) {
        if self.cells.is_empty() {
            return;
        }
        let len = self.cells.len();
        let current = self.list_state.selected().unwrap_or(0);
        let next = if forward { (current + 1) % len } else { (current + len - 1) % len };
        self.list_state.select(Some(next));
    }
}

impl Component for UpdateMemberTeamsDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        let pending = self.is_pending();
        match key.code {
            // Done stays disabled until the membership data has loaded
            KeyCode::Esc | KeyCode::Char('q') if !pending => Action::HideDialog,
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(true);
                Action::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(false);
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') if !pending => self.toggle_selected(),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match &action {
            Action::DataRefreshed(DataKind::Teams) => self.sync_cells(),
            Action::DataRefreshed(DataKind::MemberTeams(user_id)) if *user_id == self.member.user_id => {
                self.sync_cells()
            }
            _ => {}
        }
        action
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let area = LayoutManager::centered_rect(60, 70, rect);
        f.render_widget(Clear, area);

        let block = create_dialog_block(self.localization.text(keys::UPDATE_TEAMS), Color::Cyan);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [description, member, list_area, hints] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        f.render_widget(
            Paragraph::new(self.localization.text(keys::UPDATE_TEAMS_DESCRIPTION))
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true }),
            description,
        );
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    self.member.display_name().to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", self.member.email().unwrap_or_default()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])),
            member,
        );

        if self.is_pending() {
            SettingsCellSkeleton::default().render(f, list_area);
        } else if self.cells.is_empty() {
            f.render_widget(
                Paragraph::new(self.localization.text(keys::NO_TEAMS_FOUND))
                    .style(Style::default().fg(Color::Gray))
                    .alignment(Alignment::Center),
                list_area,
            );
        } else {
            let selected = self.list_state.selected();
            let frame = spinner(self.tick);
            let items: Vec<_> = self
                .cells
                .iter()
                .enumerate()
                .map(|(i, cell)| cell.to_list_item(selected == Some(i), frame, &self.localization))
                .collect();
            f.render_stateful_widget(List::new(items), list_area, &mut self.list_state);
        }

        let pending = self.is_pending();
        f.render_widget(
            create_instructions_paragraph(&[
                (
                    "Enter",
                    Color::Green,
                    format!("{}/{}", self.localization.text(keys::ADD), self.localization.text(keys::REMOVE)),
                    !pending,
                ),
                ("Esc", Color::Cyan, self.localization.text(keys::DONE), !pending),
            ]),
            hints,
        );
    }
}
