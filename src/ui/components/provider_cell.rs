use crate::entities::Account;
use crate::lifecycle::{ActionController, ProviderToggle, Toggle};
use crate::localization::{keys, Localization};
use crate::utils::OverflowTracker;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

/// One provider row with its link/unlink control.
#[derive(Debug, Clone)]
pub struct ProviderCell {
    pub provider_id: String,
    /// Generic OAuth provider rather than a built-in social one
    pub other: bool,
    pub account: Option<Account>,
    pub email: Option<String>,
    pub controller: ActionController,
    overflow: OverflowTracker,
}

impl ProviderCell {
    pub fn new(provider_id: &str, other: bool, controller: ActionController) -> Self {
        Self {
            provider_id: provider_id.to_string(),
            other,
            account: None,
            email: None,
            controller,
            overflow: OverflowTracker::new(),
        }
    }

    pub fn display_name(&self) -> String {
        let mut chars = self.provider_id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn toggle(&self, callback_url: &str) -> ProviderToggle {
        ProviderToggle {
            provider_id: self.provider_id.clone(),
            account_id: self.account.as_ref().map(|account| account.account_id.clone()),
            other: self.other,
            callback_url: callback_url.to_string(),
        }
    }

    pub fn is_linked(&self) -> bool {
        self.account.is_some()
    }

    pub fn is_disabled(&self) -> bool {
        self.controller.is_busy()
    }

    /// Whether the email line was cut at the last render
    pub fn is_email_truncated(&self) -> bool {
        self.overflow.is_overflowing()
    }

    pub fn to_list_item(
        &mut self,
        selected: bool,
        width: u16,
        spinner: &str,
        localization: &Localization,
    ) -> ListItem<'static> {
        let name_style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let control = if self.is_disabled() {
            Span::styled(format!(" {spinner}"), Style::default().fg(Color::Yellow))
        } else {
            let (key, color) = if self.is_linked() {
                (keys::UNLINK, Color::Red)
            } else {
                (keys::LINK, Color::Green)
            };
            Span::styled(format!(" [{}]", localization.text(key)), Style::default().fg(color))
        };

        let mut lines = vec![Line::from(vec![Span::styled(self.display_name(), name_style), control])];
        if let Some(email) = &self.email {
            let fitted = self.overflow.fit(email, width);
            lines.push(Line::styled(fitted, Style::default().fg(Color::DarkGray)));
        }
        ListItem::new(lines)
    }
}
