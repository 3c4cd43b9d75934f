//! Shared chrome for the settings cards

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// A card action shown in the footer, greyed out when unavailable
pub struct CardAction<'a> {
    pub key: &'a str,
    pub label: String,
    pub enabled: bool,
}

/// Draws the card border, title and description and returns the body area.
pub fn render_card(f: &mut Frame, area: Rect, title: &str, description: &str, focused: bool) -> Rect {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(border_color).add_modifier(Modifier::BOLD))
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let [description_area, body] = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
    let description = Paragraph::new(description.to_string())
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    f.render_widget(description, description_area);

    body
}

/// Footer line listing the card actions
pub fn actions_line(actions: &[CardAction<'_>]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, action) in actions.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        let (key_style, label_style) = if action.enabled {
            (
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Gray),
            )
        } else {
            (Style::default().fg(Color::DarkGray), Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(action.key.to_string(), key_style));
        spans.push(Span::styled(format!(" {}", action.label), label_style));
    }
    Line::from(spans)
}

/// Splits a card body into the list area and a one-line footer
pub fn split_footer(body: Rect) -> (Rect, Rect) {
    let [list, footer] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(body);
    (list, footer)
}
