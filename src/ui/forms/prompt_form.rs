//! Progressive prompt form: revealed fields on the left, preview on the right

use super::field_renderer::{draw_field, FieldFlags};
use super::preview::draw_preview;
use crate::app::App;
use crate::platform::{RESET_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{FormPhase, PromptForm};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

/// Height of one field box
const FIELD_HEIGHT: u16 = 3;

/// Maximum horizontal shake, in columns, at the start of the invalid flash
const SHAKE_AMPLITUDE: f32 = 2.0;

/// Number of left/right swings during the flash
const SHAKE_SWINGS: f32 = 6.0;

/// Draw the prompt form view
pub fn draw_prompt_form(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = &app.state.form else {
        return;
    };

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Form area
            Constraint::Percentage(45), // Preview
        ])
        .split(area);

    let shake = shake_offset(form.invalid_progress(Instant::now()));
    draw_form_column(frame, shift_x(main_chunks[0], shake), app, form);
    draw_output_column(frame, main_chunks[1], form);
}

/// Horizontal offset for the invalid-submit shake; decays with `cubic_out`
pub fn shake_offset(progress: Option<f32>) -> i16 {
    let Some(progress) = progress else {
        return 0;
    };
    let amplitude = SHAKE_AMPLITUDE * (1.0 - simple_easing::cubic_out(progress));
    let swing = (progress * SHAKE_SWINGS) as i32;
    let direction = if swing % 2 == 0 { 1.0 } else { -1.0 };
    (amplitude * direction).round() as i16
}

fn shift_x(area: Rect, offset: i16) -> Rect {
    if offset == 0 {
        return area;
    }
    let delta = offset.unsigned_abs();
    if offset > 0 {
        Rect {
            x: area.x + delta,
            width: area.width.saturating_sub(delta),
            ..area
        }
    } else {
        Rect {
            width: area.width.saturating_sub(delta),
            ..area
        }
    }
}

fn draw_form_column(frame: &mut Frame, area: Rect, app: &App, form: &PromptForm) {
    let template = form.template();
    let border_color = match form.phase() {
        FormPhase::Invalid => Color::Red,
        FormPhase::Submitted => Color::Green,
        FormPhase::Editing => Color::Cyan,
    };

    let block = Block::default()
        .title(format!(" {} · {} ", template.name, template.description))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(FIELD_HEIGHT),     // Fields
            Constraint::Length(1),             // Next-field hint
            Constraint::Length(BUTTON_HEIGHT), // Buttons
        ])
        .split(inner);

    draw_fields(frame, chunks[0], app, form);
    draw_next_hint(frame, chunks[1], form);
    draw_buttons(frame, chunks[2], form);
}

/// Index of the first revealed field to draw so the active one stays visible
fn first_visible_field(active: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return active;
    }
    (active + 1).saturating_sub(visible_rows)
}

fn draw_fields(frame: &mut Frame, area: Rect, app: &App, form: &PromptForm) {
    let fields = form.revealed_fields();
    let visible_rows = (area.height / FIELD_HEIGHT) as usize;
    let first = first_visible_field(app.state.active_field, visible_rows);

    for (row, (idx, field)) in fields
        .iter()
        .enumerate()
        .skip(first)
        .take(visible_rows)
        .enumerate()
    {
        let field_area = Rect {
            y: area.y + row as u16 * FIELD_HEIGHT,
            height: FIELD_HEIGHT,
            ..area
        };
        let flags = FieldFlags {
            is_active: idx == app.state.active_field,
            is_missing: form.is_flagged_missing(field.key),
            show_example: app.state.show_examples,
        };
        draw_field(frame, field_area, field, form.value(field.key), flags);
    }
}

fn draw_next_hint(frame: &mut Frame, area: Rect, form: &PromptForm) {
    let line = if form.is_fully_revealed() {
        Line::from(Span::styled(
            format!(" All fields revealed. {SUBMIT_SHORTCUT} to copy your prompt."),
            Style::default().fg(Color::Gray),
        ))
    } else if form.can_reveal_next() {
        Line::from(Span::styled(
            " Press Tab or Enter for next field",
            Style::default().fg(Color::Cyan),
        ))
    } else {
        Line::from(Span::styled(
            " Fill in this field to reveal the next one",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_buttons(frame: &mut Frame, area: Rect, form: &PromptForm) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_button(
        frame,
        chunks[0],
        &format!("Copy prompt ({SUBMIT_SHORTCUT})"),
        form.is_complete(),
        true,
    );
    render_button(
        frame,
        chunks[1],
        &format!("Reset ({RESET_SHORTCUT})"),
        false,
        true,
    );
}

fn draw_output_column(frame: &mut Frame, area: Rect, form: &PromptForm) {
    let Some(prompt) = form.last_prompt() else {
        draw_preview(frame, area, &form.preview());
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_preview(frame, chunks[0], &form.preview());

    let ready = Paragraph::new(prompt.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(Span::styled(
                    " Prompt ready ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(ready, chunks[1]);
}
