//! Widget error types

use crate::keyword::KeywordError;
use flatkit_style::StyleError;
use thiserror::Error;

/// Widget styling errors
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error(transparent)]
    Keyword(#[from] KeywordError),

    #[error(transparent)]
    Style(#[from] StyleError),

    /// Option value of the wrong kind
    #[error("invalid value {value:?} for option {option:?}")]
    InvalidOption { option: String, value: String },
}

/// Result type for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;
