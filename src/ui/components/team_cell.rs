use crate::entities::Team;
use crate::hooks::Permissions;
use crate::localization::{keys, Localization};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

/// One team row: name, caption and the controls the user may use.
#[derive(Debug, Clone)]
pub struct TeamCell<'a> {
    pub team: &'a Team,
    pub can_update: bool,
    pub can_delete: bool,
}

impl<'a> TeamCell<'a> {
    pub fn new(team: &'a Team, permissions: &Permissions) -> Self {
        Self {
            team,
            can_update: permissions.can_update,
            can_delete: permissions.can_delete,
        }
    }

    pub fn to_list_item(&self, selected: bool, localization: &Localization) -> ListItem<'static> {
        let name_style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };

        let mut controls = Vec::new();
        if self.can_update {
            controls.push(Span::styled(" [e] ", Style::default().fg(Color::Cyan)));
            controls.push(Span::styled(localization.text(keys::UPDATE), Style::default().fg(Color::Gray)));
        }
        if self.can_delete {
            controls.push(Span::styled(" [d] ", Style::default().fg(Color::Red)));
            controls.push(Span::styled(localization.text(keys::DELETE), Style::default().fg(Color::Gray)));
        }

        let mut title = vec![Span::styled(self.team.name.clone(), name_style)];
        if selected {
            title.extend(controls);
        }

        ListItem::new(vec![
            Line::from(title),
            Line::styled(localization.text(keys::TEAM), Style::default().fg(Color::DarkGray)),
        ])
    }
}
