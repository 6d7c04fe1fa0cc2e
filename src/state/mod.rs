//! Application state module

mod app_state;
pub mod catalog;
mod forms;
mod transient;

pub use app_state::*;
pub use catalog::{find_template, get_template, FieldDescriptor, TemplateId};
pub use forms::*;
