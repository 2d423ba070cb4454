//! Style error types

use flatkit_core::StateSpecError;
use flatkit_paint::PaintError;
use flatkit_theme::SchemeError;
use std::path::PathBuf;
use thiserror::Error;

/// Style-related errors
#[derive(Error, Debug)]
pub enum StyleError {
    /// Theme name token that is not a registered scheme
    #[error("{0:?} is not a valid color scheme")]
    UnknownScheme(String),

    /// Theme name token that is not a registered engine
    #[error("{0:?} is not a valid theme engine")]
    UnknownEngine(String),

    /// Theme name that is neither a scheme nor an engine
    #[error("{0:?} is not a valid scheme or engine")]
    UnknownTheme(String),

    /// Operation that needs an active theme
    #[error("no theme is in use")]
    NoActiveTheme,

    /// Native theme that was never created
    #[error("theme {0:?} does not exist")]
    ThemeNotFound(String),

    /// Native theme created twice
    #[error("theme {0:?} already exists")]
    ThemeExists(String),

    /// Engine registered twice
    #[error("theme engine {0:?} is already registered")]
    DuplicateEngine(String),

    /// Handler keyword with a token that is not part of the grammar
    #[error("invalid handler keyword {keyword:?}: unexpected {token:?}")]
    InvalidKeyword { keyword: String, token: String },

    /// Window builder invoked without the window
    #[error("style handler {0} requires a widget")]
    MissingWidget(String),

    #[error(transparent)]
    StateSpec(#[from] StateSpecError),

    #[error(transparent)]
    Scheme(#[from] SchemeError),

    #[error(transparent)]
    Paint(#[from] PaintError),

    /// Configuration file could not be read or parsed
    #[error("invalid configuration {path}: {message}")]
    Config { path: PathBuf, message: String },
}

/// Result type for style operations
pub type Result<T> = std::result::Result<T, StyleError>;
