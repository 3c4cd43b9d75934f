use crate::entities::{Member, MemberList};
use crate::hooks::QueryState;
use crate::localization::{keys, Localization};
use crate::ui::components::settings_card::{actions_line, render_card, split_footer, CardAction};
use crate::ui::components::skeleton::SettingsCellSkeleton;
use crate::ui::core::{
    actions::{Action, DialogType},
    Component,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

/// Organization members; Enter opens the member's team dialog.
pub struct MembersCard {
    members: Vec<Member>,
    pending: bool,
    list_state: ListState,
    pub focused: bool,
    localization: Localization,
}

impl MembersCard {
    pub fn new(localization: Localization) -> Self {
        Self {
            members: Vec::new(),
            pending: true,
            list_state: ListState::default(),
            focused: false,
            localization,
        }
    }

    pub fn update_data(&mut self, members: QueryState<MemberList>) {
        self.pending = members.is_pending;
        self.members = members.data.map(|list| list.members).unwrap_or_default();
        self.members
            .sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        let index = self.list_state.selected().unwrap_or(0);
        self.list_state.select(if self.members.is_empty() {
            None
        } else {
            Some(index.min(self.members.len() - 1))
        });
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn selected_member(&self) -> Option<&Member> {
        self.list_state.selected().and_then(|i| self.members.get(i))
    }

    fn member_item(member: &Member, selected: bool) -> ListItem<'static> {
        let name_style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        ListItem::new(vec![
            Line::from(vec![
                Span::styled(member.display_name().to_string(), name_style),
                Span::styled(format!("  {}", member.role), Style::default().fg(Color::Magenta)),
            ]),
            Line::styled(member.email().unwrap_or_default().to_string(), Style::default().fg(Color::DarkGray)),
        ])
    }
}

impl Component for MembersCard {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::NextRow,
            KeyCode::Char('k') | KeyCode::Up => Action::PreviousRow,
            KeyCode::Enter | KeyCode::Char('t') => self
                .selected_member()
                .map_or(Action::None, |m| Action::ShowDialog(DialogType::UpdateMemberTeams(m.clone()))),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        if !self.focused || self.members.is_empty() {
            return action;
        }
        let len = self.members.len();
        let current = self.list_state.selected().unwrap_or(0);
        match action {
            Action::NextRow => {
                self.list_state.select(Some((current + 1) % len));
                Action::None
            }
            Action::PreviousRow => {
                self.list_state.select(Some((current + len - 1) % len));
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let body = render_card(
            f,
            rect,
            &self.localization.text(keys::MEMBERS),
            &self.localization.text(keys::MEMBERS_DESCRIPTION),
            self.focused,
        );
        let (list_area, footer) = split_footer(body);

        if self.pending {
            SettingsCellSkeleton::default().render(f, list_area);
        } else if self.members.is_empty() {
            let paragraph = Paragraph::new(self.localization.text(keys::NO_MEMBERS_FOUND))
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(paragraph, list_area);
        } else {
            let selected = self.list_state.selected();
            let items: Vec<_> = self
                .members
                .iter()
                .enumerate()
                .map(|(i, m)| Self::member_item(m, selected == Some(i)))
                .collect();
            f.render_stateful_widget(List::new(items), list_area, &mut self.list_state);
        }

        let footer_line = actions_line(&[CardAction {
            key: "Enter",
            label: self.localization.text(keys::UPDATE_TEAMS),
            enabled: self.selected_member().is_some(),
        }]);
        f.render_widget(Paragraph::new(footer_line), footer);
    }
}
