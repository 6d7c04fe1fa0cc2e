//! Field rendering utilities for forms

use crate::state::FieldDescriptor;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rendering flags for one field box
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldFlags {
    pub is_active: bool,
    /// Reported missing by a rejected submit
    pub is_missing: bool,
    pub show_example: bool,
}

/// Box title: the label, optionally followed by the example hint
pub fn field_title(field: &FieldDescriptor, show_example: bool) -> String {
    if show_example {
        format!(" {} (ex: {}) ", field.label, field.example)
    } else {
        format!(" {} ", field.label)
    }
}

/// Draw a single-line field box
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldDescriptor,
    value: &str,
    flags: FieldFlags,
) {
    let border_style = if flags.is_missing {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if flags.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value_style = if flags.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = if value.is_empty() && !flags.is_active {
        vec![Span::styled("(empty)", Style::default().fg(Color::DarkGray))]
    } else {
        // Keep the tail (and the cursor) visible when the value overflows
        let inner_width = area.width.saturating_sub(3) as usize;
        let char_count = value.chars().count();
        let visible: String = if char_count > inner_width {
            value.chars().skip(char_count - inner_width).collect()
        } else {
            value.to_string()
        };
        vec![Span::styled(visible, value_style)]
    };

    if flags.is_active {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let block = Block::default()
        .title(field_title(field, flags.show_example))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
