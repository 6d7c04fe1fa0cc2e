//! Progressive form controller
//!
//! Fields are revealed one at a time in template order. A field can only be
//! revealed once the one before it holds a non-blank value, and submission is
//! strict: every field must be filled before a prompt is produced.

use super::prompt::{build_preview, build_prompt, PromptPreview};
use crate::error::FormError;
use crate::state::catalog::{FieldDescriptor, Template};
use crate::state::transient::TransientFlag;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Field values keyed by field key
pub type FieldValues = HashMap<String, String>;

/// How long the invalid indicator stays up after a failed submit
pub const INVALID_FLASH: Duration = Duration::from_millis(400);

/// Mutable values of the active form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub values: FieldValues,
    /// Number of visible fields, always in `1..=fields.len()`
    pub revealed_count: usize,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            values: FieldValues::new(),
            revealed_count: 1,
        }
    }
}

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    /// Failed submit; clears itself when the flash timer expires
    Invalid,
    /// Prompt assembled and awaiting the copy outcome
    Submitted,
}

/// Hint for the presentation layer, drained with `take_signal`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSignal {
    /// Move focus to the field at this index
    FocusField(usize),
    /// Scroll back to the top of the form
    ScrollToTop,
}

/// Progressive-disclosure form controller for one template
#[derive(Debug, Clone)]
pub struct PromptForm {
    template: &'static Template,
    state: FormState,
    phase: FormPhase,
    invalid_flash: TransientFlag,
    /// Missing keys reported by the most recent failed submit
    last_missing: Vec<String>,
    last_prompt: Option<String>,
    signal: Option<FormSignal>,
}

impl PromptForm {
    pub fn new(template: &'static Template) -> Self {
        let mut form = Self {
            template,
            state: FormState::default(),
            phase: FormPhase::Editing,
            invalid_flash: TransientFlag::new(INVALID_FLASH),
            last_missing: Vec::new(),
            last_prompt: None,
            signal: None,
        };
        form.initialize(template);
        form
    }

    /// Switch to `template` with empty values and only the first field shown
    pub fn initialize(&mut self, template: &'static Template) {
        self.template = template;
        self.clear();
        self.signal = Some(FormSignal::FocusField(0));
    }

    /// Clear all values for the current template and return to the top
    pub fn reset(&mut self) {
        self.clear();
        self.signal = Some(FormSignal::ScrollToTop);
    }

    fn clear(&mut self) {
        self.state = FormState::default();
        self.phase = FormPhase::Editing;
        self.invalid_flash.cancel();
        self.last_missing.clear();
        self.last_prompt = None;
    }

    pub fn template(&self) -> &'static Template {
        self.template
    }

    #[cfg(test)]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn revealed_count(&self) -> usize {
        self.state.revealed_count
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        index < self.state.revealed_count
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.state.revealed_count >= self.template.field_count()
    }

    /// Fields currently visible, in order
    pub fn revealed_fields(&self) -> &'static [FieldDescriptor] {
        &self.template.fields[..self.state.revealed_count]
    }

    /// Stored value for `key`, or "" when unset
    pub fn value(&self, key: &str) -> &str {
        self.state.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Set the value of a field, replacing any previous text.
    ///
    /// Control characters are dropped: fields are single-line text and must
    /// never carry terminal control sequences into the preview.
    pub fn set_value(&mut self, key: &str, text: &str) -> Result<(), FormError> {
        if !self.template.contains_key(key) {
            return Err(FormError::InvalidKey {
                key: key.to_string(),
                template: self.template.name.to_string(),
            });
        }
        let clean: String = text.chars().filter(|c| !c.is_control()).collect();
        self.state.values.insert(key.to_string(), clean);
        if self.phase == FormPhase::Submitted {
            self.phase = FormPhase::Editing;
        }
        Ok(())
    }

    /// True when another field exists and the last visible one is filled
    pub fn can_reveal_next(&self) -> bool {
        let count = self.state.revealed_count;
        if count >= self.template.field_count() {
            return false;
        }
        let current = &self.template.fields[count - 1];
        !self.value(current.key).trim().is_empty()
    }

    /// Reveal the next field if allowed. Returns false (and changes nothing)
    /// when `can_reveal_next` does not hold.
    pub fn reveal_next(&mut self) -> bool {
        if !self.can_reveal_next() {
            return false;
        }
        self.state.revealed_count += 1;
        let index = self.state.revealed_count - 1;
        tracing::debug!(
            template = self.template.name,
            field = self.template.fields[index].key,
            "revealed field"
        );
        self.signal = Some(FormSignal::FocusField(index));
        true
    }

    /// Keys whose trimmed value is empty, in template order
    pub fn missing_keys(&self) -> Vec<String> {
        self.template
            .fields
            .iter()
            .filter(|f| self.value(f.key).trim().is_empty())
            .map(|f| f.key.to_string())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_keys().is_empty()
    }

    #[allow(dead_code)]
    pub fn submit(&mut self) -> Result<String, FormError> {
        self.submit_at(Instant::now())
    }

    /// Validate every field and assemble the prompt.
    ///
    /// On failure the form enters `Invalid` for `INVALID_FLASH`; a repeated
    /// failure restarts that window.
    pub fn submit_at(&mut self, now: Instant) -> Result<String, FormError> {
        let missing_keys = self.missing_keys();
        if !missing_keys.is_empty() {
            tracing::debug!(
                template = self.template.name,
                missing = missing_keys.len(),
                "submit rejected"
            );
            self.phase = FormPhase::Invalid;
            self.invalid_flash.trigger(now);
            self.last_missing = missing_keys.clone();
            return Err(FormError::Validation { missing_keys });
        }

        let prompt = build_prompt(&self.state.values, self.template);
        self.invalid_flash.cancel();
        self.last_missing.clear();
        self.phase = FormPhase::Submitted;
        self.last_prompt = Some(prompt.clone());
        Ok(prompt)
    }

    /// External notification that the assembled prompt was handed off.
    /// The form stays populated for further edits.
    pub fn acknowledge_copy(&mut self) {
        if self.phase == FormPhase::Submitted {
            self.phase = FormPhase::Editing;
        }
    }

    /// Advance timers; clears the invalid phase once its window has passed
    pub fn tick(&mut self, now: Instant) {
        if self.invalid_flash.tick(now) && self.phase == FormPhase::Invalid {
            self.phase = FormPhase::Editing;
            self.last_missing.clear();
        }
    }

    /// Progress of the invalid flash (0.0 to 1.0) while it is showing
    pub fn invalid_progress(&self, now: Instant) -> Option<f32> {
        if self.phase != FormPhase::Invalid {
            return None;
        }
        self.invalid_flash.progress(now)
    }

    /// Whether `key` was reported missing by the failed submit being flashed
    pub fn is_flagged_missing(&self, key: &str) -> bool {
        self.phase == FormPhase::Invalid && self.last_missing.iter().any(|k| k == key)
    }

    /// Live preview built from the current values
    pub fn preview(&self) -> PromptPreview {
        build_preview(&self.state.values, self.template)
    }

    /// Most recently assembled prompt, kept until reset or template change
    pub fn last_prompt(&self) -> Option<&str> {
        self.last_prompt.as_deref()
    }

    pub fn take_signal(&mut self) -> Option<FormSignal> {
        self.signal.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::{get_template, TemplateId};

    fn costar() -> PromptForm {
        PromptForm::new(get_template(TemplateId::Costar))
    }

    fn fill_all(form: &mut PromptForm, pairs: &[(&str, &str)]) {
        for (key, value) in pairs {
            form.set_value(key, value).unwrap();
            form.reveal_next();
        }
    }

    const COSTAR_VALUES: [(&str, &str); 6] = [
        ("context", "Summarize a legal brief"),
        ("objective", "Explain for a 5th grader"),
        ("style", "Bullet points"),
        ("tone", "Friendly, concise"),
        ("audience", "Law students"),
        ("responseFormat", "Markdown table"),
    ];

    mod initialize {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_starts_with_one_field_and_no_values() {
            for id in TemplateId::ALL {
                let form = PromptForm::new(get_template(id));
                assert_eq!(form.revealed_count(), 1);
                assert!(form.state().values.is_empty());
                assert_eq!(form.phase(), FormPhase::Editing);
            }
        }

        #[test]
        fn test_new_requests_focus_on_first_field() {
            let mut form = costar();
            assert_eq!(form.take_signal(), Some(FormSignal::FocusField(0)));
            assert_eq!(form.take_signal(), None);
        }

        #[test]
        fn test_switching_template_discards_values() {
            let mut form = costar();
            form.set_value("context", "Draft").unwrap();
            form.reveal_next();
            form.set_value("objective", "Explain").unwrap();

            form.initialize(get_template(TemplateId::Automat));

            assert_eq!(form.template().id, TemplateId::Automat);
            assert!(form.state().values.is_empty());
            assert_eq!(form.revealed_count(), 1);
        }
    }

    mod set_value {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_set_value_stores_text() {
            let mut form = costar();
            form.set_value("tone", "Warm").unwrap();
            assert_eq!(form.value("tone"), "Warm");
            assert_eq!(form.value("style"), "");
        }

        #[test]
        fn test_unknown_key_is_rejected() {
            let mut form = costar();
            let err = form.set_value("actAs", "Expert").unwrap_err();
            assert_eq!(
                err,
                FormError::InvalidKey {
                    key: "actAs".to_string(),
                    template: "COSTAR".to_string(),
                }
            );
            assert!(form.state().values.is_empty());
        }

        #[test]
        fn test_set_value_does_not_reveal() {
            let mut form = costar();
            form.set_value("context", "Something").unwrap();
            assert_eq!(form.revealed_count(), 1);
        }

        #[test]
        fn test_control_characters_are_stripped() {
            let mut form = costar();
            form.set_value("context", "line\none\x1b[31m\t!").unwrap();
            assert_eq!(form.value("context"), "lineone[31m!");
        }

        #[test]
        fn test_values_keys_stay_within_template() {
            let mut form = costar();
            let _ = form.set_value("bogus", "x");
            form.set_value("style", "Prose").unwrap();
            let template = form.template();
            assert!(form.state().values.keys().all(|k| template.contains_key(k)));
        }

        #[test]
        fn test_each_field_appears_in_prompt() {
            for field in get_template(TemplateId::Automat).fields {
                let mut form = PromptForm::new(get_template(TemplateId::Automat));
                form.set_value(field.key, "x").unwrap();
                assert!(form
                    .preview()
                    .to_plain_text()
                    .contains(&format!("{}: x", field.label)));
            }
        }
    }

    mod reveal {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_cannot_reveal_when_current_field_empty() {
            let mut form = costar();
            assert!(!form.can_reveal_next());
            assert!(!form.reveal_next());
            assert_eq!(form.revealed_count(), 1);
        }

        #[test]
        fn test_whitespace_only_blocks_reveal() {
            let mut form = costar();
            form.set_value("context", "   ").unwrap();
            assert!(!form.can_reveal_next());
        }

        #[test]
        fn test_reveal_after_filling_current_field() {
            let mut form = costar();
            form.take_signal();
            form.set_value("context", "Brief").unwrap();

            assert!(form.can_reveal_next());
            assert!(form.reveal_next());
            assert_eq!(form.revealed_count(), 2);
            assert_eq!(form.take_signal(), Some(FormSignal::FocusField(1)));
            assert_eq!(form.revealed_fields().len(), 2);
        }

        #[test]
        fn test_reveal_checks_last_visible_field_only() {
            let mut form = costar();
            form.set_value("objective", "Filled ahead").unwrap();
            assert!(!form.can_reveal_next());
        }

        #[test]
        fn test_never_exceeds_field_count() {
            let mut form = costar();
            fill_all(&mut form, &COSTAR_VALUES);
            assert_eq!(form.revealed_count(), 6);
            assert!(form.is_fully_revealed());
            assert!(!form.can_reveal_next());
            assert!(!form.reveal_next());
            assert_eq!(form.revealed_count(), 6);
        }

        #[test]
        fn test_revealed_count_is_monotonic_while_editing() {
            let mut form = costar();
            let mut previous = form.revealed_count();
            for (key, value) in COSTAR_VALUES {
                form.set_value(key, value).unwrap();
                form.reveal_next();
                // Clearing an earlier field must not hide later ones
                form.set_value("context", "").unwrap();
                assert!(form.revealed_count() >= previous);
                previous = form.revealed_count();
                form.set_value("context", "Summarize a legal brief").unwrap();
            }
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_costar_scenario_succeeds() {
            let mut form = costar();
            fill_all(&mut form, &COSTAR_VALUES);

            let prompt = form.submit().unwrap();
            assert_eq!(
                prompt,
                "Context: Summarize a legal brief\n\
                 Objective: Explain for a 5th grader\n\
                 Style: Bullet points\n\
                 Tone: Friendly, concise\n\
                 Audience: Law students\n\
                 Response-format: Markdown table"
            );
            assert_eq!(prompt.lines().count(), 6);
            assert_eq!(form.phase(), FormPhase::Submitted);
            assert_eq!(form.last_prompt(), Some(prompt.as_str()));
        }

        #[test]
        fn test_automat_complete_has_one_line_per_field_in_order() {
            let mut form = PromptForm::new(get_template(TemplateId::Automat));
            fill_all(
                &mut form,
                &[
                    ("actAs", "Expert interviewer"),
                    ("userPersona", "Startup founder, investors"),
                    ("targetedAction", "Generate interview questions"),
                    ("outputDefinition", "List of 10 questions"),
                    ("mode", "Conversational, direct"),
                    ("atypicalCases", "Edge cases, outliers"),
                    ("topicWhitelisting", "Only SaaS topics"),
                ],
            );

            let prompt = form.submit().unwrap();
            let labels: Vec<&str> = prompt
                .lines()
                .filter_map(|line| line.split_once(": ").map(|(label, _)| label))
                .collect();
            assert_eq!(prompt.lines().count(), 7);
            assert_eq!(
                labels,
                [
                    "Act as",
                    "User-persona & audience",
                    "Targeted action",
                    "Output definition",
                    "Mode/tonality/style",
                    "Atypical cases",
                    "Topic whitelisting",
                ]
            );
            assert!(prompt.ends_with("Topic whitelisting: Only SaaS topics"));
            assert_eq!(form.phase(), FormPhase::Submitted);
        }

        #[test]
        fn test_automat_missing_fields_scenario() {
            let mut form = PromptForm::new(get_template(TemplateId::Automat));
            form.set_value("actAs", "Expert interviewer").unwrap();

            let err = form.submit().unwrap_err();
            assert_eq!(
                err,
                FormError::Validation {
                    missing_keys: vec![
                        "userPersona".to_string(),
                        "targetedAction".to_string(),
                        "outputDefinition".to_string(),
                        "mode".to_string(),
                        "atypicalCases".to_string(),
                        "topicWhitelisting".to_string(),
                    ],
                }
            );
            assert_eq!(form.phase(), FormPhase::Invalid);
            assert!(form.is_flagged_missing("mode"));
            assert!(!form.is_flagged_missing("actAs"));
        }

        #[test]
        fn test_whitespace_counts_as_missing() {
            let mut form = costar();
            fill_all(&mut form, &COSTAR_VALUES);
            form.set_value("tone", " \t ").unwrap();
            let err = form.submit().unwrap_err();
            assert_eq!(err.missing_keys(), ["tone"]);
        }

        #[test]
        fn test_invalid_clears_after_flash() {
            let start = Instant::now();
            let mut form = costar();
            assert!(form.submit_at(start).is_err());

            form.tick(start + Duration::from_millis(200));
            assert_eq!(form.phase(), FormPhase::Invalid);
            assert!(form.invalid_progress(start + Duration::from_millis(200)).is_some());

            form.tick(start + INVALID_FLASH);
            assert_eq!(form.phase(), FormPhase::Editing);
            assert!(!form.is_flagged_missing("context"));
        }

        #[test]
        fn test_repeat_failure_restarts_flash() {
            let start = Instant::now();
            let mut form = costar();
            let _ = form.submit_at(start);
            let _ = form.submit_at(start + Duration::from_millis(300));

            form.tick(start + Duration::from_millis(500));
            assert_eq!(form.phase(), FormPhase::Invalid);
            form.tick(start + Duration::from_millis(700));
            assert_eq!(form.phase(), FormPhase::Editing);
        }

        #[test]
        fn test_success_after_failure_cancels_flash() {
            let start = Instant::now();
            let mut form = costar();
            let _ = form.submit_at(start);
            fill_all(&mut form, &COSTAR_VALUES);

            assert!(form.submit_at(start + Duration::from_millis(100)).is_ok());
            form.tick(start + INVALID_FLASH);
            assert_eq!(form.phase(), FormPhase::Submitted);
        }

        #[test]
        fn test_state_survives_copy_acknowledgement() {
            let mut form = costar();
            fill_all(&mut form, &COSTAR_VALUES);
            form.submit().unwrap();

            form.acknowledge_copy();
            assert_eq!(form.phase(), FormPhase::Editing);
            assert_eq!(form.value("tone"), "Friendly, concise");
            assert_eq!(form.revealed_count(), 6);
            assert!(form.last_prompt().is_some());
        }

        #[test]
        fn test_edit_after_submit_returns_to_editing() {
            let mut form = costar();
            fill_all(&mut form, &COSTAR_VALUES);
            form.submit().unwrap();

            form.set_value("tone", "Formal").unwrap();
            assert_eq!(form.phase(), FormPhase::Editing);
        }
    }

    mod reset {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_reset_clears_values_and_signals_scroll() {
            let mut form = costar();
            fill_all(&mut form, &COSTAR_VALUES);
            form.submit().unwrap();
            form.take_signal();

            form.reset();

            assert_eq!(form.template().id, TemplateId::Costar);
            assert_eq!(form.state(), &FormState::default());
            assert_eq!(form.phase(), FormPhase::Editing);
            assert!(form.last_prompt().is_none());
            assert_eq!(form.take_signal(), Some(FormSignal::ScrollToTop));
        }

        #[test]
        fn test_reset_cancels_pending_flash() {
            let start = Instant::now();
            let mut form = costar();
            let _ = form.submit_at(start);

            form.reset();
            form.set_value("context", "New").unwrap();
            form.tick(start + INVALID_FLASH);

            assert_eq!(form.phase(), FormPhase::Editing);
            assert!(form.invalid_progress(start).is_none());
        }

        #[test]
        fn test_template_change_cancels_pending_flash() {
            let start = Instant::now();
            let mut form = costar();
            let _ = form.submit_at(start);

            form.initialize(get_template(TemplateId::Automat));
            assert_eq!(form.phase(), FormPhase::Editing);
            assert!(!form.is_flagged_missing("context"));
        }
    }
}
