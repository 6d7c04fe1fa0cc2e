//! Form rendering module
//!
//! - `field_renderer`: single field box
//! - `preview`: live prompt preview panel
//! - `prompt_form`: the progressive COSTAR / AUTOMAT form

mod field_renderer;
mod preview;
mod prompt_form;

pub use prompt_form::draw_prompt_form;
