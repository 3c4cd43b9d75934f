use super::common::{create_dialog_block, create_input_paragraph, create_instructions_paragraph};
use crate::entities::Team;
use crate::hooks::Query;
use crate::lifecycle::{validate_team_name, ActionController, Mutation};
use crate::localization::{keys, Localization};
use crate::ui::components::skeleton::spinner;
use crate::ui::core::{
    actions::{Action, DataKind, MutationRequest, RefreshHandle},
    Component,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

pub struct CreateTeamDialog {
    input: String,
    organization_id: String,
    controller: ActionController,
    teams: Query<Vec<Team>>,
    localization: Localization,
    tick: usize,
}

impl CreateTeamDialog {
    pub fn new(organization_id: String, teams: Query<Vec<Team>>, localization: Localization) -> Self {
        Self {
            input: String::new(),
            organization_id,
            controller: ActionController::new(),
            teams,
            localization,
            tick: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.is_busy() || self.controller.has_succeeded() || validate_team_name(&self.input).is_none()
    }

    pub fn teardown(&self) {
        self.controller.teardown();
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    fn submit(&self) -> Action {
        if self.is_submit_disabled() {
            return Action::None;
        }
        let Some(name) = validate_team_name(&self.input) else {
            return Action::None;
        };
        let mutation = Mutation::CreateTeam {
            organization_id: self.organization_id.clone(),
            name,
        };
        let request = MutationRequest::new(mutation, self.controller.clone(), &self.localization)
            .refreshing(RefreshHandle::new(self.teams.clone(), DataKind::Teams))
            .completing_dialog();
        Action::Submit(request)
    }
}

impl Component for CreateTeamDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.is_busy() {
            return Action::None;
        }
        match key.code {
            KeyCode::Esc => Action::HideDialog,
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
                Action::None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let area = LayoutManager::centered_rect_lines(60, 11, rect);
        f.render_widget(Clear, area);

        let block = create_dialog_block(self.localization.text(keys::CREATE_TEAM), Color::Cyan);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [description, input, instructions, hints] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas(inner);

        f.render_widget(
            Paragraph::new(self.localization.text(keys::CREATE_TEAM_DESCRIPTION))
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true }),
            description,
        );
        f.render_widget(
            create_input_paragraph(
                &self.input,
                &self.localization.text(keys::TEAM_NAME_PLACEHOLDER),
                &self.localization.text(keys::TEAM_NAME),
                !self.is_busy(),
            ),
            input,
        );
        f.render_widget(
            Paragraph::new(self.localization.text(keys::CREATE_TEAM_INSTRUCTIONS))
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true }),
            instructions,
        );

        let submit_label = if self.is_busy() {
            format!("{} {}", spinner(self.tick), self.localization.text(keys::CREATE))
        } else {
            self.localization.text(keys::CREATE)
        };
        f.render_widget(
            create_instructions_paragraph(&[
                ("Enter", Color::Green, submit_label, !self.is_submit_disabled()),
                ("Esc", Color::Red, self.localization.text(keys::CANCEL), !self.is_busy()),
            ]),
            hints,
        );
    }
}
