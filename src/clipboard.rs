//! Clipboard access.

use log::debug;

use crate::error::PickerError;

/// Destination for copied text.
pub trait ClipboardSink {
    fn write(&mut self, text: &str) -> Result<(), PickerError>;
}

/// The system clipboard via `arboard`.
///
/// The handle is opened on first use and kept for the session; on X11 the
/// copied text is served for as long as it lives. A failed open is retried on
/// the next copy.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, PickerError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| PickerError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| PickerError::Clipboard("clipboard unavailable".into()))
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}

impl ClipboardSink for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), PickerError> {
        let clipboard = self.handle()?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| PickerError::Clipboard(e.to_string()))?;
        debug!("clipboard <- {text}");
        Ok(())
    }
}

/// Keeps copied text in memory. Useful headless and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write(&mut self, text: &str) -> Result<(), PickerError> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_keeps_last_write() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);
        clipboard.write("30, 144, 255").unwrap();
        clipboard.write("#1E90FF").unwrap();
        assert_eq!(clipboard.contents(), Some("#1E90FF"));
    }

    #[test]
    fn system_clipboard_opens_lazily() {
        let clipboard = SystemClipboard::new();
        assert_eq!(format!("{clipboard:?}"), "SystemClipboard { open: false }");
    }
}
