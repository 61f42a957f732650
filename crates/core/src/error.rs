//! Error types for the colormix core.

use thiserror::Error;

/// Errors produced by color construction and combination.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// A color specification was malformed, out of range, or incomplete.
    #[error("invalid color input: {0}")]
    InvalidInput(String),

    /// A combiner was handed fewer colors than it needs.
    #[error("too few colors: need at least {needed}, got {got}")]
    InsufficientInput { needed: usize, got: usize },

    /// A mode name did not match any known combination mode.
    #[error("unknown mode: {0}")]
    UnknownMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_includes_message() {
        let err = ColorError::InvalidInput("fgffff".into());
        let msg = format!("{err}");
        assert!(msg.contains("fgffff"), "missing token in: {msg}");
    }

    #[test]
    fn insufficient_input_includes_counts() {
        let err = ColorError::InsufficientInput { needed: 2, got: 1 };
        let msg = format!("{err}");
        assert!(msg.contains('2'), "missing needed count in: {msg}");
        assert!(msg.contains('1'), "missing got count in: {msg}");
    }

    #[test]
    fn unknown_mode_includes_name() {
        let err = ColorError::UnknownMode("blend".into());
        let msg = format!("{err}");
        assert!(msg.contains("blend"), "missing mode name in: {msg}");
    }

    #[test]
    fn color_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ColorError>();
    }

    #[test]
    fn color_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<ColorError>();
    }
}
