//! Toast overlay shown near the bottom of the screen

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Rows between the toast and the bottom edge (status bar + gap)
const BOTTOM_OFFSET: u16 = 2;

/// Compute the toast rectangle: centered horizontally, above the status bar
pub fn toast_area(screen: Rect, message: &str) -> Rect {
    let width = (message.chars().count() as u16 + 4).min(screen.width);
    let height = 3u16.min(screen.height);
    Rect {
        x: screen.x + screen.width.saturating_sub(width) / 2,
        y: screen.y + screen.height.saturating_sub(height + BOTTOM_OFFSET),
        width,
        height,
    }
}

/// Render a toast message overlay
pub fn render_toast(frame: &mut Frame, message: &str) {
    let area = toast_area(frame.area(), message);

    // Clear the area behind the toast
    frame.render_widget(Clear, area);

    let toast = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(toast, area);
}
