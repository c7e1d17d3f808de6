use crate::error::{KoiFoxError, KoiFoxResult};
use arboard::Clipboard;

/// Anything reply text can be copied to
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> KoiFoxResult<()>;
}

/// System clipboard access for the TUI
pub struct ClipboardManager {
    clipboard: Option<Clipboard>,
}

impl ClipboardManager {
    pub fn new() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(cb) => {
                tracing::info!("Clipboard initialized successfully");
                Some(cb)
            }
            Err(e) => {
                tracing::warn!("Failed to initialize clipboard: {} - copy will be unavailable", e);
                None
            }
        };
        Self { clipboard }
    }
}

impl ClipboardSink for ClipboardManager {
    fn copy(&mut self, text: &str) -> KoiFoxResult<()> {
        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or_else(|| KoiFoxError::clipboard("Clipboard not available"))?;

        clipboard
            .set_text(text)
            .map_err(|e| KoiFoxError::clipboard(e.to_string()))?;
        tracing::info!("Copied {} characters to clipboard", text.len());
        Ok(())
    }
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::new()
    }
}
