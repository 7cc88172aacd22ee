//! Unified error type for mathcap.

use thiserror::Error;

/// Errors that can occur while configuring or drawing a captcha.
#[derive(Debug, Error)]
pub enum CaptchaError {
    /// The font source has no font under the requested name.
    #[error("Font not found: {name}")]
    FontNotFound {
        /// The full font name, including the `fonts/` prefix.
        name: String,
    },

    /// A font was found but its bytes could not be parsed.
    #[error("Invalid font {name}: {message}")]
    InvalidFont {
        /// The full font name.
        name: String,
        /// Parser error message.
        message: String,
    },

    /// The selected font cannot render a character.
    #[error("Glyph {ch:?} is not available in the selected font")]
    MissingGlyph {
        /// The character that has no glyph.
        ch: char,
    },

    /// The canvas rejected a drawing call.
    #[error("Draw error: {0}")]
    Draw(String),

    /// Image encoding error.
    #[error("Image encoding error: {0}")]
    Encode(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
