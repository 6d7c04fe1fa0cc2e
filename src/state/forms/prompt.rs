//! Prompt assembly and the structured live-preview model

use super::form_state::FieldValues;
use crate::state::catalog::{FieldDescriptor, Template};

/// Separator placed between the label and the value on each line
const LABEL_SEPARATOR: &str = ": ";

/// A run of preview text, optionally emphasized.
///
/// Emphasis is a flag for the renderer, never inline markup, so user-typed
/// values are always displayed as literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSegment {
    pub text: String,
    pub emphasized: bool,
}

impl PreviewSegment {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// One `<label>: <value>` line of the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    pub key: &'static str,
    pub segments: Vec<PreviewSegment>,
}

impl PreviewLine {
    #[cfg(test)]
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Structured preview of the assembled prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptPreview {
    pub lines: Vec<PreviewLine>,
}

impl PromptPreview {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop emphasis and join lines exactly as `build_prompt` does
    #[cfg(test)]
    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(PreviewLine::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Fields with a non-blank value, in template order
fn filled_fields<'a>(
    values: &'a FieldValues,
    template: &'a Template,
) -> impl Iterator<Item = (&'static FieldDescriptor, &'a str)> + 'a {
    template.fields.iter().filter_map(move |field| {
        values
            .get(field.key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
            .map(|v| (field, v))
    })
}

/// Assemble the plain-text prompt: one `<label>: <value>` line per filled
/// field, in template order, joined by newlines.
pub fn build_prompt(values: &FieldValues, template: &Template) -> String {
    filled_fields(values, template)
        .map(|(field, value)| format!("{}{LABEL_SEPARATOR}{value}", field.label))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Same lines as `build_prompt` with each value marked for emphasis
pub fn build_preview(values: &FieldValues, template: &Template) -> PromptPreview {
    let lines = filled_fields(values, template)
        .map(|(field, value)| PreviewLine {
            key: field.key,
            segments: vec![
                PreviewSegment::plain(format!("{}{LABEL_SEPARATOR}", field.label)),
                PreviewSegment::emphasized(value),
            ],
        })
        .collect();
    PromptPreview { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::{get_template, TemplateId};
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn costar_complete() -> FieldValues {
        values(&[
            ("context", "Summarize a legal brief"),
            ("objective", "Explain for a 5th grader"),
            ("style", "Bullet points"),
            ("tone", "Friendly, concise"),
            ("audience", "Law students"),
            ("responseFormat", "Markdown table"),
        ])
    }

    #[test]
    fn test_costar_full_prompt() {
        let prompt = build_prompt(&costar_complete(), get_template(TemplateId::Costar));
        assert_eq!(
            prompt,
            "Context: Summarize a legal brief\n\
             Objective: Explain for a 5th grader\n\
             Style: Bullet points\n\
             Tone: Friendly, concise\n\
             Audience: Law students\n\
             Response-format: Markdown table"
        );
    }

    #[test]
    fn test_empty_values_produce_empty_prompt() {
        let prompt = build_prompt(&FieldValues::new(), get_template(TemplateId::Automat));
        assert_eq!(prompt, "");
    }

    #[test]
    fn test_blank_fields_are_skipped() {
        let vals = values(&[
            ("actAs", "Expert interviewer"),
            ("userPersona", "   "),
            ("mode", "Direct"),
        ]);
        let prompt = build_prompt(&vals, get_template(TemplateId::Automat));
        assert_eq!(prompt, "Act as: Expert interviewer\nMode/tonality/style: Direct");
    }

    #[test]
    fn test_output_follows_template_order_not_insertion_order() {
        let vals = values(&[("tone", "Warm"), ("context", "Release notes")]);
        let prompt = build_prompt(&vals, get_template(TemplateId::Costar));
        assert_eq!(prompt, "Context: Release notes\nTone: Warm");
    }

    #[test]
    fn test_build_prompt_is_idempotent() {
        let vals = costar_complete();
        let template = get_template(TemplateId::Costar);
        assert_eq!(build_prompt(&vals, template), build_prompt(&vals, template));
    }

    #[test]
    fn test_preview_plain_text_matches_prompt() {
        let template = get_template(TemplateId::Costar);
        let vals = costar_complete();
        assert_eq!(
            build_preview(&vals, template).to_plain_text(),
            build_prompt(&vals, template)
        );
    }

    #[test]
    fn test_preview_emphasizes_values_only() {
        let vals = values(&[("context", "Onboarding email")]);
        let preview = build_preview(&vals, get_template(TemplateId::Costar));

        assert_eq!(preview.lines.len(), 1);
        let line = &preview.lines[0];
        assert_eq!(line.key, "context");
        assert_eq!(
            line.segments,
            vec![
                PreviewSegment::plain("Context: "),
                PreviewSegment::emphasized("Onboarding email"),
            ]
        );
    }

    #[test]
    fn test_markup_in_values_stays_literal() {
        let vals = values(&[("context", "<span class=\"x\">hi</span>")]);
        let template = get_template(TemplateId::Costar);
        let preview = build_preview(&vals, template);

        assert_eq!(preview.lines[0].segments.len(), 2);
        assert_eq!(
            preview.lines[0].segments[1].text,
            "<span class=\"x\">hi</span>"
        );
        assert_eq!(preview.to_plain_text(), build_prompt(&vals, template));
    }

    #[test]
    fn test_empty_preview() {
        let preview = build_preview(&FieldValues::new(), get_template(TemplateId::Costar));
        assert!(preview.is_empty());
        assert_eq!(preview.to_plain_text(), "");
    }
}
