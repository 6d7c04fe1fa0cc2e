//! Prompt form domain layer
//!
//! - `form_state`: the progressive-disclosure controller
//! - `prompt`: prompt assembly and the structured preview model

mod form_state;
mod prompt;

pub use form_state::{FormPhase, FormSignal, PromptForm};
pub use prompt::PromptPreview;
#[cfg(test)]
pub use prompt::{PreviewLine, PreviewSegment};
