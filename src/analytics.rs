//! Best-effort usage events
//!
//! Events are fire-and-forget: callers log a failed `emit` and move on.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

/// A template was chosen (props: name)
pub const FRAMEWORK_SELECTED: &str = "framework_selected";
/// An assembled prompt reached the clipboard (props: name)
pub const PROMPT_COPIED: &str = "prompt_copied";
/// The form was cleared (props: name)
pub const FORM_RESET: &str = "form_reset";

/// Receiver for named usage events with optional key/value props
#[cfg_attr(test, mockall::automock)]
pub trait EventSink: Send + Sync {
    fn emit<'a>(&self, name: &str, props: &[(&'a str, &'a str)]) -> Result<()>;
}

/// Discards every event
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit<'a>(&self, _name: &str, _props: &[(&'a str, &'a str)]) -> Result<()> {
        Ok(())
    }
}

/// Emits events as structured tracing records
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit<'a>(&self, name: &str, props: &[(&'a str, &'a str)]) -> Result<()> {
        tracing::info!(target: "promptamp::analytics", event = name, props = ?props, "analytics event");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct EventRecord<'a> {
    ts: DateTime<Utc>,
    session: Uuid,
    name: &'a str,
    props: BTreeMap<&'a str, &'a str>,
}

/// Appends one JSON object per event to a local file
#[derive(Debug)]
pub struct JsonlSink {
    path: PathBuf,
    session: Uuid,
    lock: Mutex<()>,
}

impl JsonlSink {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            session: Uuid::new_v4(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl EventSink for JsonlSink {
    fn emit<'a>(&self, name: &str, props: &[(&'a str, &'a str)]) -> Result<()> {
        let record = EventRecord {
            ts: Utc::now(),
            session: self.session,
            name,
            props: props.iter().copied().collect(),
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("analytics log lock poisoned"))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}
