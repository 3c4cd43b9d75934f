//! Delete team confirmation dialog

use super::common::{create_dialog_block, create_instructions_paragraph};
use crate::entities::Team;
use crate::hooks::Query;
use crate::lifecycle::{ActionController, Mutation};
use crate::localization::{keys, Localization};
use crate::ui::components::skeleton::spinner;
use crate::ui::core::{
    actions::{Action, DataKind, MutationRequest, RefreshHandle},
    Component,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

pub struct DeleteTeamDialog {
    team: Team,
    controller: ActionController,
    teams: Query<Vec<Team>>,
    localization: Localization,
    tick: usize,
}

impl DeleteTeamDialog {
    pub fn new(team: Team, teams: Query<Vec<Team>>, localization: Localization) -> Self {
        Self {
            team,
            controller: ActionController::new(),
            teams,
            localization,
            tick: 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    /// Confirm stays off while deleting and after the team is gone.
    pub fn is_confirm_disabled(&self) -> bool {
        self.is_busy() || self.controller.has_succeeded()
    }

    pub fn teardown(&self) {
        self.controller.teardown();
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    fn confirm(&self) -> Action {
        if self.is_confirm_disabled() {
            return Action::None;
        }
        let mutation = Mutation::RemoveTeam {
            team_id: self.team.id.clone(),
            organization_id: self.team.organization_id.clone(),
        };
        Action::Submit(
            MutationRequest::new(mutation, self.controller.clone(), &self.localization)
                .refreshing(RefreshHandle::new(self.teams.clone(), DataKind::Teams))
                .completing_dialog(),
        )
    }
}

impl Component for DeleteTeamDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.is_busy() {
            return Action::None;
        }
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => self.confirm(),
            KeyCode::Char('n') | KeyCode::Esc => Action::HideDialog,
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let area = LayoutManager::centered_rect_lines(60, 9, rect);
        f.render_widget(Clear, area);

        let block = create_dialog_block(self.localization.text(keys::DELETE_TEAM), Color::Red);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [description, name, hints] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(2), Constraint::Length(1)]).areas(inner);

        f.render_widget(
            Paragraph::new(self.localization.text(keys::DELETE_TEAM_DESCRIPTION))
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            description,
        );
        f.render_widget(
            Paragraph::new(format!("\"{}\"", self.team.name))
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            name,
        );

        let delete_label = if self.is_busy() {
            format!("{} {}", spinner(self.tick), self.localization.text(keys::DELETE))
        } else {
            self.localization.text(keys::DELETE)
        };
        f.render_widget(
            create_instructions_paragraph(&[
                ("y", Color::Red, delete_label, !self.is_confirm_disabled()),
                ("n/Esc", Color::Gray, self.localization.text(keys::CANCEL), !self.is_busy()),
            ]),
            hints,
        );
    }
}
