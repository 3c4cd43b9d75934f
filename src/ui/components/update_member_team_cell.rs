use crate::entities::Team;
use crate::lifecycle::{ActionController, MembershipToggle};
use crate::localization::{keys, Localization};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

/// Add/remove control for one team in the member dialog.
#[derive(Debug, Clone)]
pub struct UpdateMemberTeamCell {
    pub team: Team,
    pub user_id: String,
    pub added: bool,
    pub controller: ActionController,
}

impl UpdateMemberTeamCell {
    pub fn new(team: Team, user_id: &str, member_teams: &[Team], controller: ActionController) -> Self {
        let added = member_teams.iter().any(|t| t.id == team.id);
        Self {
            team,
            user_id: user_id.to_string(),
            added,
            controller,
        }
    }

    pub fn toggle(&self) -> MembershipToggle {
        MembershipToggle {
            team_id: self.team.id.clone(),
            user_id: self.user_id.clone(),
            added: self.added,
        }
    }

    /// The control is inert while its own request is in flight
    pub fn is_disabled(&self) -> bool {
        self.controller.is_busy()
    }

    pub fn to_list_item(&self, selected: bool, spinner: &str, localization: &Localization) -> ListItem<'static> {
        let marker = if self.added { "✓ " } else { "  " };
        let name_style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let control = if self.is_disabled() {
            Span::styled(format!(" {spinner}"), Style::default().fg(Color::Yellow))
        } else if self.added {
            Span::styled(format!(" [{}]", localization.text(keys::REMOVE)), Style::default().fg(Color::Red))
        } else {
            Span::styled(format!(" [{}]", localization.text(keys::ADD)), Style::default().fg(Color::Green))
        };

        ListItem::new(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Green)),
            Span::styled(self.team.name.clone(), name_style),
            control,
        ]))
    }
}
