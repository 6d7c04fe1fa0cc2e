//! Clipboard access behind a trait so the app can be tested without a display

use anyhow::Result;
use async_trait::async_trait;

/// Writes text to a clipboard, completing asynchronously
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    /// Replace the clipboard contents with `text`
    async fn write_text(&self, text: String) -> Result<()>;
}

/// System clipboard via arboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[async_trait]
impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: String) -> Result<()> {
        // arboard blocks on some platforms while it talks to the display server
        tokio::task::spawn_blocking(move || -> Result<()> {
            use arboard::Clipboard;
            let mut clipboard = Clipboard::new()?;
            clipboard.set_text(text)?;
            Ok(())
        })
        .await?
    }
}
