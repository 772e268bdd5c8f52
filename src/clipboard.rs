//! System clipboard access for the GUI shell

use arboard::Clipboard;
use tracing::warn;

/// Holds a clipboard handle when one is available.
///
/// Clipboard construction fails on headless or misconfigured systems;
/// every operation degrades to `None`/`false` so the caller can report it
/// in the status bar instead of crashing.
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = Clipboard::new()
            .inspect_err(|err| warn!(error = ?err, "System clipboard unavailable"))
            .ok();
        Self { inner }
    }

    /// Read clipboard text, if any
    pub fn get_text(&mut self) -> Option<String> {
        let clipboard = self.inner.as_mut()?;
        match clipboard.get_text() {
            Ok(text) if !text.is_empty() => Some(text),
            Ok(_) => None,
            Err(err) => {
                warn!(error = ?err, "Failed to read clipboard");
                None
            }
        }
    }

    /// Write text to the clipboard; returns false when it could not be set
    pub fn set_text(&mut self, text: &str) -> bool {
        let Some(clipboard) = self.inner.as_mut() else {
            return false;
        };
        clipboard
            .set_text(text.to_string())
            .inspect_err(|err| warn!(error = ?err, "Failed to write clipboard"))
            .is_ok()
    }
}
