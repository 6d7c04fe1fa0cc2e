//! Intent picker: "What do you want to create?"

use crate::app::App;
use crate::state::{get_template, TemplateId};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Card height in rows
const CARD_HEIGHT: u16 = 8;

/// Draw the intent picker
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Top padding
            Constraint::Length(2),           // Question
            Constraint::Length(CARD_HEIGHT), // Cards
            Constraint::Min(0),              // Bottom padding
        ])
        .split(area);

    let question = Paragraph::new(Line::from(Span::styled(
        "What do you want to create?",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(question, rows[1]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(39),
            Constraint::Percentage(2),
            Constraint::Percentage(39),
            Constraint::Percentage(10),
        ])
        .split(rows[2]);

    for (idx, id) in TemplateId::ALL.into_iter().enumerate() {
        let is_selected = app.state.selected_intent == id;
        draw_card(frame, cards[1 + idx * 2], id, idx + 1, is_selected);
    }
}

fn draw_card(frame: &mut Frame, area: Rect, id: TemplateId, number: usize, is_selected: bool) {
    let template = get_template(id);

    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(template.intent_title, title_style)),
        Line::from(Span::styled(
            template.intent_description,
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} · {} fields", template.name, template.field_count()),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {number} "))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    frame.render_widget(card, area);
}
