//! UI module for rendering the TUI

mod components;
mod forms;
mod intent_picker;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (header_area, main_area, status_area) = layout::create_layout(area);

    layout::draw_header(frame, header_area);

    // Draw main content based on current view
    match app.state.current_view {
        View::IntentPicker => intent_picker::draw(frame, main_area, app),
        View::Form => forms::draw_prompt_form(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Toast overlay
    if let Some(msg) = &app.copy_message {
        components::render_toast(frame, msg);
    }
}
