//! Template catalog for the supported prompt frameworks

use crate::error::FormError;
use std::fmt;
use std::str::FromStr;

/// A single labeled field within a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Unique key within the template
    pub key: &'static str,
    /// Label used both on screen and in the assembled prompt
    pub label: &'static str,
    /// Example value shown as a hint
    pub example: &'static str,
}

const fn field(key: &'static str, label: &'static str, example: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        key,
        label,
        example,
    }
}

/// Identifier of a prompt framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateId {
    #[default]
    Costar,
    Automat,
}

impl TemplateId {
    /// All templates in display order
    pub const ALL: [TemplateId; 2] = [TemplateId::Costar, TemplateId::Automat];

    /// Literal identifier ("COSTAR" / "AUTOMAT")
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Costar => "COSTAR",
            TemplateId::Automat => "AUTOMAT",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TemplateId::Costar => TemplateId::Automat,
            TemplateId::Automat => TemplateId::Costar,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TemplateId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FormError::NotFound(s.to_string()))
    }
}

/// Immutable catalog entry describing one prompt framework
#[derive(Debug, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    /// Title shown on the intent picker card
    pub intent_title: &'static str,
    /// One-line explanation shown under the intent title
    pub intent_description: &'static str,
    /// Fields in reveal and output order
    pub fields: &'static [FieldDescriptor],
}

impl Template {
    /// Look up a field by key
    pub fn field(&self, key: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Position of a field in declared order
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

static COSTAR: Template = Template {
    id: TemplateId::Costar,
    name: "COSTAR",
    description: "Context, Objective, Style, Tone, Audience, Response-format",
    intent_title: "Write Content",
    intent_description: "Create a stand-alone, audience-focused piece.",
    fields: &[
        field("context", "Context", "Summarize a legal brief"),
        field("objective", "Objective", "Explain for a 5th grader"),
        field("style", "Style", "Bullet points"),
        field("tone", "Tone", "Friendly, concise"),
        field("audience", "Audience", "Law students"),
        field("responseFormat", "Response-format", "Markdown table"),
    ],
};

static AUTOMAT: Template = Template {
    id: TemplateId::Automat,
    name: "AUTOMAT",
    description: "Act as, User-persona & audience, Targeted action, Output definition, \
                  Mode/tonality/style, Atypical cases, Topic whitelisting",
    intent_title: "Automate Task",
    intent_description: "For chatbots, agents, or scheduled jobs.",
    fields: &[
        field("actAs", "Act as", "Expert interviewer"),
        field(
            "userPersona",
            "User-persona & audience",
            "Startup founder, investors",
        ),
        field(
            "targetedAction",
            "Targeted action",
            "Generate interview questions",
        ),
        field(
            "outputDefinition",
            "Output definition",
            "List of 10 questions",
        ),
        field("mode", "Mode/tonality/style", "Conversational, direct"),
        field("atypicalCases", "Atypical cases", "Edge cases, outliers"),
        field("topicWhitelisting", "Topic whitelisting", "Only SaaS topics"),
    ],
};

/// Get the catalog entry for a template id
pub fn get_template(id: TemplateId) -> &'static Template {
    match id {
        TemplateId::Costar => &COSTAR,
        TemplateId::Automat => &AUTOMAT,
    }
}

/// Resolve a template from its literal identifier
pub fn find_template(name: &str) -> Result<&'static Template, FormError> {
    name.parse::<TemplateId>().map(get_template)
}
