//! Live prompt preview panel

use crate::state::PromptPreview;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Convert the structured preview into styled lines.
///
/// Segment text is passed through as-is; emphasis only changes the style.
pub fn preview_lines(preview: &PromptPreview) -> Vec<Line<'static>> {
    if preview.is_empty() {
        return vec![Line::from(Span::styled(
            "Start typing to see your prompt take shape.",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    preview
        .lines
        .iter()
        .map(|line| {
            Line::from(
                line.segments
                    .iter()
                    .map(|segment| {
                        let style = if segment.emphasized {
                            Style::default()
                                .fg(Color::LightBlue)
                                .add_modifier(Modifier::ITALIC)
                        } else {
                            Style::default().add_modifier(Modifier::BOLD)
                        };
                        Span::styled(segment.text.clone(), style)
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

/// Draw the preview panel
pub fn draw_preview(frame: &mut Frame, area: Rect, preview: &PromptPreview) {
    let block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(preview_lines(preview))
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}
