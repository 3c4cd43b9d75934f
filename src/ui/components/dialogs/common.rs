use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Creates a styled main dialog block
pub fn create_dialog_block(title: String, theme_color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(theme_color).add_modifier(Modifier::BOLD))
        .style(Style::default().fg(theme_color))
}

/// Creates an input field block with a visual cursor, or the placeholder
/// when the buffer is empty
pub fn create_input_paragraph(
    input_buffer: &str,
    placeholder: &str,
    field_title: &str,
    editable: bool,
) -> Paragraph<'static> {
    let cursor_char = if editable { "█" } else { "" };
    let line = if input_buffer.is_empty() {
        Line::from(vec![
            Span::styled(cursor_char.to_string(), Style::default().fg(Color::White)),
            Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::styled(format!("{}{}", input_buffer, cursor_char), Style::default().fg(Color::White))
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", field_title))
        .title_style(Style::default().fg(Color::White))
        .style(Style::default().fg(Color::Gray));

    Paragraph::new(line).block(input_block)
}

/// Instruction shortcut: key, color, description and whether it is usable
pub type InstructionShortcut = (&'static str, Color, String, bool);

/// Creates a paragraph with color-coded instruction shortcuts
pub fn create_instructions_paragraph(instructions: &[InstructionShortcut]) -> Paragraph<'static> {
    let mut instruction_text = Vec::new();
    for (i, (key, color, desc, enabled)) in instructions.iter().enumerate() {
        if i > 0 {
            instruction_text.push(Span::styled(" • ", Style::default().fg(Color::Gray)));
        }
        let (key_style, desc_style) = if *enabled {
            (
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Gray),
            )
        } else {
            (Style::default().fg(Color::DarkGray), Style::default().fg(Color::DarkGray))
        };
        instruction_text.push(Span::styled(*key, key_style));
        instruction_text.push(Span::styled(format!(" {}", desc), desc_style));
    }

    Paragraph::new(Line::from(instruction_text)).alignment(Alignment::Center)
}
