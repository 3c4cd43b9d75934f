//! Toast notifications for mutation feedback

use crate::constants::MAX_VISIBLE_TOASTS;
use crate::lifecycle::{FeedbackEvent, FeedbackKind};
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Toast {
    pub event: FeedbackEvent,
    pub shown_at: Instant,
}

/// Queue of toasts that expire after a fixed duration.
#[derive(Debug)]
pub struct ToastHost {
    toasts: VecDeque<Toast>,
    duration: Duration,
}

impl ToastHost {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            duration,
        }
    }

    pub fn push(&mut self, event: FeedbackEvent) {
        self.push_at(event, Instant::now());
    }

    pub fn push_at(&mut self, event: FeedbackEvent, now: Instant) {
        self.toasts.push_back(Toast { event, shown_at: now });
    }

    /// Drop toasts older than the configured duration
    pub fn prune(&mut self, now: Instant) {
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < self.duration);
    }

    /// Newest toasts, at most [`MAX_VISIBLE_TOASTS`]
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().rev().take(MAX_VISIBLE_TOASTS)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let visible: Vec<&Toast> = self.visible().collect();
        if visible.is_empty() {
            return;
        }

        let stack = LayoutManager::toast_area(area, visible.len() as u16);
        let rows = Layout::vertical(visible.iter().map(|_| Constraint::Length(3))).split(stack);

        for (toast, row) in visible.iter().zip(rows.iter()) {
            let (title, color) = match toast.event.kind {
                FeedbackKind::Success => ("✅", Color::Green),
                FeedbackKind::Error => ("❌", Color::Red),
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(title)
                .border_style(Style::default().fg(color));
            let body = Paragraph::new(toast.event.message.clone())
                .block(block)
                .style(Style::default().fg(Color::White))
                .wrap(Wrap { trim: true });
            f.render_widget(Clear, *row);
            f.render_widget(body, *row);
        }
    }
}
