//! Error types for the prompt form domain.

use thiserror::Error;

/// Errors raised by the template catalog and the form controller.
///
/// `NotFound` and `InvalidKey` are programming errors given the closed set of
/// templates. `Validation` is the expected, user-recoverable outcome of
/// submitting an incomplete form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Template identifier is not one of the known frameworks.
    #[error("unknown template: {0}")]
    NotFound(String),

    /// Field key is not part of the active template.
    #[error("field '{key}' is not part of the {template} template")]
    InvalidKey { key: String, template: String },

    /// One or more fields are empty, in template order.
    #[error("missing values for: {}", missing_keys.join(", "))]
    Validation { missing_keys: Vec<String> },
}

impl FormError {
    /// Keys reported missing by a validation failure (empty for other kinds)
    pub fn missing_keys(&self) -> &[String] {
        match self {
            FormError::Validation { missing_keys } => missing_keys,
            _ => &[],
        }
    }
}
