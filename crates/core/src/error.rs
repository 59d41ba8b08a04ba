//! Error types for the constellation core.

use thiserror::Error;

/// Errors produced by constellation operations.
#[derive(Debug, Error)]
pub enum ConstellationError {
    /// Width or height was zero (or overflowed) when creating a raster.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// No built-in theme has the requested name.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// A field configuration value was out of range or non-finite.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Writing a snapshot or seed file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = ConstellationError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_color_includes_message() {
        let msg = ConstellationError::InvalidColor("12 300 4".into()).to_string();
        assert!(msg.contains("12 300 4"), "missing input in: {msg}");
    }

    #[test]
    fn unknown_theme_includes_name() {
        let msg = ConstellationError::UnknownTheme("plaid".into()).to_string();
        assert!(msg.contains("plaid"), "missing name in: {msg}");
    }

    #[test]
    fn invalid_config_includes_message() {
        let msg = ConstellationError::InvalidConfig("friction must be finite".into()).to_string();
        assert!(msg.contains("friction"), "missing detail in: {msg}");
    }

    #[test]
    fn io_includes_message() {
        let msg = ConstellationError::Io("disk full".into()).to_string();
        assert!(msg.contains("disk full"), "missing detail in: {msg}");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConstellationError>();
    }

    #[test]
    fn error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<ConstellationError>();
    }
}
