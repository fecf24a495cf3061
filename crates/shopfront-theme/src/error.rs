//! Theme error types.

use thiserror::Error;

/// Errors that can occur while loading or validating a theme.
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid theme TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Color {token} has invalid value '{value}' (expected #RGB or #RRGGBB)")]
    InvalidColor { token: String, value: String },

    #[error("Font stack {0} is empty")]
    EmptyFontStack(String),

    #[error("Token name '{0}' must be lowercase letters, digits or dashes")]
    InvalidName(String),
}
