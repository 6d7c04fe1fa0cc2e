//! Configuration handling for the TUI

use crate::state::{find_template, TemplateId};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Template to open directly, skipping the intent picker ("COSTAR" / "AUTOMAT")
    pub default_template: Option<String>,
    /// Show example hints next to field labels
    pub show_examples: Option<bool>,
    /// Record analytics events to a local JSONL file
    pub analytics_log: Option<bool>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "promptamp", "promptamp")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file and the analytics log
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, falling back to defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the configured default template.
    /// An unknown identifier is logged and ignored.
    pub fn default_template_id(&self) -> Option<TemplateId> {
        let name = self.default_template.as_deref()?;
        match find_template(name) {
            Ok(template) => Some(template.id),
            Err(err) => {
                tracing::warn!("ignoring default_template from config: {err}");
                None
            }
        }
    }

    pub fn show_examples(&self) -> bool {
        self.show_examples.unwrap_or(true)
    }

    pub fn analytics_log(&self) -> bool {
        self.analytics_log.unwrap_or(false)
    }
}
