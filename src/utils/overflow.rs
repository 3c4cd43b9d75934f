use ratatui::text::Line;

use crate::constants::OVERFLOW_MARKER;

/// Tracks whether a piece of text fits the width it is rendered into.
///
/// A change of content resets the state to "not overflowing" until the new
/// content has been measured.
#[derive(Debug, Clone, Default)]
pub struct OverflowTracker {
    content: Option<String>,
    overflowing: bool,
}

impl OverflowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measures `text` against `width` display columns.
    pub fn measure(&mut self, text: &str, width: u16) -> bool {
        if self.content.as_deref() != Some(text) {
            self.content = Some(text.to_string());
            self.overflowing = false;
        }
        self.overflowing = Line::raw(text).width() > usize::from(width);
        self.overflowing
    }

    pub fn is_overflowing(&self) -> bool {
        self.overflowing
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// `text` cut to `width` columns with a trailing marker when it overflows.
    pub fn fit(&mut self, text: &str, width: u16) -> String {
        if !self.measure(text, width) {
            return text.to_string();
        }
        let marker_width = Line::raw(OVERFLOW_MARKER).width();
        let budget = usize::from(width).saturating_sub(marker_width);
        let mut out = String::new();
        let mut used = 0;
        for ch in text.chars() {
            let ch_width = Line::raw(ch.to_string()).width();
            if used + ch_width > budget {
                break;
            }
            used += ch_width;
            out.push(ch);
        }
        out.push_str(OVERFLOW_MARKER);
        out
    }
}
