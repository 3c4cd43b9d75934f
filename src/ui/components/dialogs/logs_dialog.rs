//! Logs dialog showing the in-memory log buffer

use crate::constants::DIALOG_TITLE_LOGS;
use crate::logger::Logger;
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Margin, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

pub struct LogsDialog {
    logger: Logger,
    scroll_offset: usize,
}

impl LogsDialog {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            scroll_offset: 0,
        }
    }
}

impl Component for LogsDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('L') => Action::HideDialog,
            KeyCode::Char('j') | KeyCode::Down => {
                let max = self.logger.get_logs().len().saturating_sub(1);
                self.scroll_offset = (self.scroll_offset + 1).min(max);
                Action::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                Action::None
            }
            KeyCode::Char('c') => {
                self.logger.clear();
                self.scroll_offset = 0;
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        // Take 80% of the screen
        let modal_width = rect.width.saturating_mul(8) / 10;
        let modal_height = rect.height.saturating_mul(8) / 10;
        let modal_area = Rect {
            x: rect.x + (rect.width.saturating_sub(modal_width)) / 2,
            y: rect.y + (rect.height.saturating_sub(modal_height)) / 2,
            width: modal_width,
            height: modal_height,
        };

        f.render_widget(Clear, modal_area);
        let block = Block::default()
            .title(DIALOG_TITLE_LOGS)
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black))
            .border_style(Style::default().fg(Color::Cyan));
        f.render_widget(block, modal_area);

        let inner_area = modal_area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        });

        let logs = self.logger.get_logs();
        if logs.is_empty() {
            let no_logs = Paragraph::new("No logs available")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(no_logs, inner_area);
            return;
        }

        let items: Vec<ListItem> = logs
            .into_iter()
            .skip(self.scroll_offset)
            .enumerate()
            .map(|(i, log)| {
                let style = if i % 2 == 0 {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(log).style(style)
            })
            .collect();
        f.render_widget(List::new(items), inner_area);
    }
}
