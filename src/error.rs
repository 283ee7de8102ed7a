//! Error types for the color picker.

use thiserror::Error;

/// Errors produced by picker operations.
///
/// None of these are fatal: every failure leaves the session state as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PickerError {
    /// A hex color string was not exactly six hex digits.
    #[error("invalid hex color: {0}")]
    InvalidFormat(String),

    /// The platform offers no screen color sampler.
    #[error("screen color picking is not supported on this system")]
    CapabilityUnavailable,

    /// A screen sampling operation is already running.
    #[error("screen color picking is already in progress")]
    SamplerBusy,

    /// The screen sampler failed while running.
    #[error("screen color picking failed: {0}")]
    Sampler(String),

    /// The clipboard could not be opened or written.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// The history store could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// The settings file was unreadable or held invalid values.
    #[error("invalid settings: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_format_includes_input() {
        let err = PickerError::InvalidFormat("#12345".into());
        let msg = format!("{err}");
        assert!(msg.contains("#12345"), "missing input in: {msg}");
    }

    #[test]
    fn capability_unavailable_is_readable() {
        let msg = PickerError::CapabilityUnavailable.to_string();
        assert!(msg.contains("not supported"), "got: {msg}");
    }

    #[test]
    fn storage_includes_message() {
        let err = PickerError::Storage("disk full".into());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn picker_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PickerError>();
    }

    #[test]
    fn picker_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<PickerError>();
    }
}
