//! Application state and core logic

use crate::analytics::{
    EventSink, JsonlSink, TracingSink, FORM_RESET, FRAMEWORK_SELECTED, PROMPT_COPIED,
};
use crate::clipboard::{ClipboardWriter, SystemClipboard};
use crate::config::TuiConfig;
use crate::error::FormError;
use crate::state::{AppState, TemplateId, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Toast text shown after a successful copy
pub const COPIED_TOAST: &str = "Prompt copied ✔";

/// Result of a background clipboard write
#[derive(Debug)]
struct ClipboardOutcome {
    /// Copy request this outcome answers
    seq: u64,
    template: TemplateId,
    result: Result<()>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    clipboard: Arc<dyn ClipboardWriter>,
    events: Arc<dyn EventSink>,
    clipboard_tx: mpsc::UnboundedSender<ClipboardOutcome>,
    clipboard_rx: mpsc::UnboundedReceiver<ClipboardOutcome>,
    /// Latest copy request; outcomes carrying an older number are stale
    copy_seq: u64,
    /// Whether the app should quit
    quit: bool,
    /// Transient status line message, cleared on the next key press
    pub status_message: Option<String>,
    /// Toast message, shown while `state.toast` is active
    pub copy_message: Option<String>,
}

impl App {
    /// Create a new App with the system clipboard and the configured event sink
    pub fn new(config: &TuiConfig) -> Self {
        let events: Arc<dyn EventSink> = match TuiConfig::data_dir() {
            Some(dir) if config.analytics_log() => {
                let sink = JsonlSink::new(dir.join("events.jsonl"));
                tracing::info!("recording analytics events to {}", sink.path().display());
                Arc::new(sink)
            }
            _ => Arc::new(TracingSink),
        };

        let mut app = Self::with_collaborators(Arc::new(SystemClipboard), events);
        app.state.show_examples = config.show_examples();
        if let Some(id) = config.default_template_id() {
            app.select_template(id);
        }
        app
    }

    /// Create an App around explicit clipboard and analytics collaborators
    pub fn with_collaborators(
        clipboard: Arc<dyn ClipboardWriter>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let (clipboard_tx, clipboard_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            clipboard,
            events,
            clipboard_tx,
            clipboard_rx,
            copy_seq: 0,
            quit: false,
            status_message: None,
            copy_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Advance timers and collect finished clipboard writes
    pub fn tick(&mut self, now: Instant) {
        while let Ok(outcome) = self.clipboard_rx.try_recv() {
            self.handle_clipboard_outcome(outcome, now);
        }

        if let Some(form) = self.state.form.as_mut() {
            form.tick(now);
        }

        if self.state.toast.tick(now) {
            self.copy_message = None;
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.handle_key_at(key, Instant::now())
    }

    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::IntentPicker => self.handle_intent_picker_key(key),
            View::Form => self.handle_form_key(key, now),
        }
        Ok(())
    }

    /// Handle keys on the intent picker
    fn handle_intent_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Char('h')
            | KeyCode::Char('l')
            | KeyCode::Char('j')
            | KeyCode::Char('k') => self.state.next_intent(),
            KeyCode::Char('1') => self.select_template(TemplateId::Costar),
            KeyCode::Char('2') => self.select_template(TemplateId::Automat),
            KeyCode::Enter => self.select_template(self.state.selected_intent),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Handle keys in the form view
    fn handle_form_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let copy_mod = key.modifiers.contains(crate::platform::COPY_MODIFIER);

        match key.code {
            KeyCode::Esc => {
                tracing::info!("starting over");
                self.state.start_over();
                self.discard_pending_copy();
            }
            // Submit: Ctrl+S everywhere, Cmd+S on macOS
            KeyCode::Char('s') if ctrl || copy_mod => self.submit_form(now),
            KeyCode::Char('y') if copy_mod => self.copy_again(),
            KeyCode::Char('r') if ctrl => self.reset_form(),
            KeyCode::Char('u') if ctrl => self.state.form_clear_field(),
            KeyCode::Tab => self.advance_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_form_field(),
            KeyCode::Down => self.state.next_form_field(),
            KeyCode::Enter => {
                let fully_revealed = self
                    .state
                    .form
                    .as_ref()
                    .is_some_and(|f| f.is_fully_revealed());
                if fully_revealed && self.state.on_last_revealed_field() {
                    self.submit_form(now);
                } else {
                    self.advance_field();
                }
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.state.form_input_char(c)
            }
            KeyCode::Backspace => self.state.form_backspace(),
            _ => {}
        }
    }

    /// Select a template and open its form
    pub fn select_template(&mut self, id: TemplateId) {
        tracing::info!(template = id.as_str(), "template selected");
        self.state.select_template(id);
        self.discard_pending_copy();
        self.track(FRAMEWORK_SELECTED, &[("name", id.as_str())]);
    }

    /// Tab/Enter behaviour: reveal the next field from the last visible one,
    /// otherwise move focus forward
    fn advance_field(&mut self) {
        let on_last = self.state.on_last_revealed_field();
        let Some(form) = self.state.form.as_mut() else {
            return;
        };

        if !on_last || form.is_fully_revealed() {
            self.state.next_form_field();
            return;
        }

        if form.reveal_next() {
            self.state.apply_form_signal();
        } else if let Some(field) = form.revealed_fields().last() {
            self.status_message = Some(format!("Fill in {} to continue", field.label));
        }
    }

    /// Validate the form and copy the assembled prompt
    fn submit_form(&mut self, now: Instant) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        let template = form.template();

        match form.submit_at(now) {
            Ok(prompt) => {
                tracing::info!(
                    template = template.name,
                    chars = prompt.len(),
                    "prompt assembled"
                );
                self.copy_prompt(template.id, prompt);
            }
            Err(err @ FormError::Validation { .. }) => {
                let missing = err.missing_keys();
                let labels: Vec<&str> = missing
                    .iter()
                    .filter_map(|key| template.field(key).map(|f| f.label))
                    .collect();
                // Jump to the first missing field the user can already see
                let first_visible = missing
                    .iter()
                    .filter_map(|key| template.index_of(key))
                    .find(|&index| form.is_revealed(index));
                if let Some(index) = first_visible {
                    self.state.active_field = index;
                }
                self.status_message = Some(format!("Missing: {}", labels.join(", ")));
            }
            Err(err) => {
                tracing::error!("submit failed: {err}");
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Copy the most recently assembled prompt again
    fn copy_again(&mut self) {
        let Some(form) = self.state.form.as_ref() else {
            return;
        };
        match form.last_prompt().map(str::to_string) {
            Some(prompt) => {
                let template = form.template().id;
                self.copy_prompt(template, prompt);
            }
            None => self.status_message = Some("Nothing to copy yet".to_string()),
        }
    }

    fn reset_form(&mut self) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        let name = form.template().name;
        form.reset();
        self.state.apply_form_signal();
        self.discard_pending_copy();
        self.status_message = Some("Form cleared".to_string());
        self.track(FORM_RESET, &[("name", name)]);
    }

    /// Start a background clipboard write; the outcome arrives in `tick`
    fn copy_prompt(&mut self, template: TemplateId, prompt: String) {
        self.copy_seq += 1;
        let seq = self.copy_seq;
        let clipboard = Arc::clone(&self.clipboard);
        let tx = self.clipboard_tx.clone();
        tokio::spawn(async move {
            let result = clipboard.write_text(prompt).await;
            // Receiver only goes away on shutdown
            let _ = tx.send(ClipboardOutcome {
                seq,
                template,
                result,
            });
        });
    }

    /// Make any in-flight clipboard write stale
    fn discard_pending_copy(&mut self) {
        self.copy_seq += 1;
    }

    fn handle_clipboard_outcome(&mut self, outcome: ClipboardOutcome, now: Instant) {
        if outcome.seq != self.copy_seq {
            tracing::debug!(
                template = outcome.template.as_str(),
                "ignoring clipboard result for an earlier copy"
            );
            return;
        }

        match outcome.result {
            Ok(()) => {
                tracing::info!(template = outcome.template.as_str(), "prompt copied");
                self.state.toast.trigger(now);
                self.copy_message = Some(COPIED_TOAST.to_string());
                self.track(PROMPT_COPIED, &[("name", outcome.template.as_str())]);
            }
            Err(err) => {
                tracing::warn!("clipboard write failed: {err:#}");
                self.status_message =
                    Some("Clipboard unavailable; copy the prompt from the panel".to_string());
            }
        }

        if let Some(form) = self.state.form.as_mut() {
            form.acknowledge_copy();
        }
    }

    /// Emit an analytics event; failures never affect the form
    fn track(&self, name: &str, props: &[(&str, &str)]) {
        if let Err(err) = self.events.emit(name, props) {
            tracing::warn!("analytics event {name} dropped: {err:#}");
        }
    }

    /// Wait for the next clipboard outcome and apply it
    #[cfg(test)]
    async fn settle_clipboard(&mut self, now: Instant) {
        if let Some(outcome) = self.clipboard_rx.recv().await {
            self.handle_clipboard_outcome(outcome, now);
        }
    }
}
