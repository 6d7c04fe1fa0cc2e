//! Layout components (header, status bar)

use crate::app::App;
use crate::state::View;
use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Header height in rows (title + tagline + bottom border)
const HEADER_HEIGHT: u16 = 3;

/// Split the screen into header, main content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Min(0),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the title header
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            " PromptAmp",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " Craft prompt-engineering templates with COSTAR or AUTOMAT frameworks.",
            Style::default().fg(Color::Gray),
        )),
    ];

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    // Template badge
    if let Some(form) = &app.state.form {
        spans.push(Span::styled(
            format!("[{}] ", form.template().name),
            Style::default().fg(Color::Magenta),
        ));
    }

    // View-specific hints
    spans.push(Span::styled(
        get_view_hints(app.state.current_view),
        Style::default().fg(Color::Gray),
    ));

    // Status message
    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint and footer on the right
    let footer = format!(" ^C:quit  © {} PromptAmp ", chrono::Local::now().year());
    let footer_width = footer.chars().count() as u16;
    let footer_area = Rect {
        x: area.x + area.width.saturating_sub(footer_width),
        y: area.y,
        width: footer_width.min(area.width),
        height: 1,
    };
    let footer_widget =
        Paragraph::new(footer).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(footer_widget, footer_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::IntentPicker => "←/→:choose  Enter:select  1/2:quick pick  q:quit".to_string(),
        View::Form => format!(
            "Tab:next  {}:copy  {}:copy again  {}:reset  Esc:start over",
            crate::platform::SUBMIT_SHORTCUT,
            crate::platform::COPY_AGAIN_SHORTCUT,
            crate::platform::RESET_SHORTCUT,
        ),
    }
}
