//! Application state definitions

use super::catalog::{get_template, TemplateId};
use super::forms::{FormSignal, PromptForm};
use super::transient::TransientFlag;
use std::time::Duration;

/// How long the "prompt copied" toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_millis(2000);

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// "What do you want to create?" picker
    #[default]
    IntentPicker,
    /// Progressive form for the selected template
    Form,
}

/// Global application state
#[derive(Debug)]
pub struct AppState {
    pub current_view: View,
    /// Highlighted card on the intent picker
    pub selected_intent: TemplateId,
    /// Active form, present only in the form view
    pub form: Option<PromptForm>,
    /// Index of the focused field among the revealed ones
    pub active_field: usize,
    /// Toast shown after a successful copy
    pub toast: TransientFlag,
    /// Show "(ex: ...)" hints under field labels
    pub show_examples: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_view: View::default(),
            selected_intent: TemplateId::default(),
            form: None,
            active_field: 0,
            toast: TransientFlag::new(TOAST_DURATION),
            show_examples: true,
        }
    }
}

impl AppState {
    /// Select a template, discarding any form in progress
    pub fn select_template(&mut self, id: TemplateId) {
        let template = get_template(id);
        match self.form.as_mut() {
            Some(form) => form.initialize(template),
            None => self.form = Some(PromptForm::new(template)),
        }
        self.selected_intent = id;
        self.current_view = View::Form;
        self.apply_form_signal();
    }

    /// Leave the form and go back to the intent picker
    pub fn start_over(&mut self) {
        self.form = None;
        self.active_field = 0;
        self.current_view = View::IntentPicker;
    }

    pub fn next_intent(&mut self) {
        self.selected_intent = self.selected_intent.next();
    }

    /// Move focus to the next revealed field (wraps around)
    pub fn next_form_field(&mut self) {
        let count = self.revealed_count();
        if count > 0 {
            self.active_field = (self.active_field + 1) % count;
        }
    }

    /// Move focus to the previous revealed field (wraps around)
    pub fn prev_form_field(&mut self) {
        let count = self.revealed_count();
        if count == 0 {
            return;
        }
        if self.active_field == 0 {
            self.active_field = count - 1;
        } else {
            self.active_field -= 1;
        }
    }

    /// Whether focus sits on the last revealed field
    pub fn on_last_revealed_field(&self) -> bool {
        self.active_field + 1 == self.revealed_count()
    }

    fn revealed_count(&self) -> usize {
        self.form.as_ref().map(|f| f.revealed_count()).unwrap_or(0)
    }

    /// Key of the focused field
    pub fn active_field_key(&self) -> Option<&'static str> {
        let form = self.form.as_ref()?;
        form.revealed_fields().get(self.active_field).map(|f| f.key)
    }

    /// Apply the pending presentation signal from the form, if any
    pub fn apply_form_signal(&mut self) {
        let Some(signal) = self.form.as_mut().and_then(|f| f.take_signal()) else {
            return;
        };
        match signal {
            FormSignal::FocusField(index) => self.active_field = index,
            FormSignal::ScrollToTop => self.active_field = 0,
        }
    }

    /// Append a character to the focused field
    pub fn form_input_char(&mut self, c: char) {
        self.edit_active_field(|text| text.push(c));
    }

    /// Remove the last character of the focused field
    pub fn form_backspace(&mut self) {
        self.edit_active_field(|text| {
            text.pop();
        });
    }

    /// Clear the focused field
    pub fn form_clear_field(&mut self) {
        self.edit_active_field(String::clear);
    }

    fn edit_active_field(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(key) = self.active_field_key() else {
            return;
        };
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let mut text = form.value(key).to_string();
        edit(&mut text);
        if let Err(err) = form.set_value(key, &text) {
            tracing::error!("focused field rejected by form: {err}");
        }
    }
}
