use crate::constants::{SKELETON_ROWS, SPINNER_FRAMES};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Placeholder rows shown while a card's data is pending.
#[derive(Debug, Clone, Copy)]
pub struct SettingsCellSkeleton {
    rows: usize,
}

impl Default for SettingsCellSkeleton {
    fn default() -> Self {
        Self { rows: SKELETON_ROWS }
    }
}

impl SettingsCellSkeleton {
    pub fn new(rows: usize) -> Self {
        Self { rows }
    }

    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let bar = usize::from(width.saturating_sub(2)).min(40);
        (0..self.rows)
            .flat_map(|i| {
                let name = "░".repeat(bar.saturating_sub(i * 4).max(4));
                let caption = "░".repeat((bar / 3).max(2));
                [
                    Line::styled(name, Style::default().fg(Color::DarkGray)),
                    Line::styled(caption, Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect()
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        f.render_widget(Paragraph::new(self.lines(area.width)), area);
    }
}

/// Spinner glyph for the given UI tick
pub fn spinner(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}
