//! Style keywords
//!
//! A keyword names the look of a widget in up to three dash separated
//! tokens, `[color][-variant][-class]`: `primary`, `danger-outline`,
//! `success-outline-toolbutton`. Each token is optional but they must come
//! in that order. Keywords are case-insensitive. Dotted names and bare
//! native class names such as `TButton` are native style names and are
//! used as given.

use flatkit_style::{ttk_style_name, Orient, StyleRequest, WidgetClass, WidgetVariant};
use flatkit_theme::SemanticColor;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Style keyword errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeywordError {
    #[error("unknown token {token:?} in style keyword {keyword:?}")]
    UnknownToken { keyword: String, token: String },

    /// Tokens must come as color, variant, class
    #[error("token {token:?} is out of order in style keyword {keyword:?}")]
    OutOfOrder { keyword: String, token: String },

    #[error("style keyword {0:?} has more than three tokens")]
    TooManyTokens(String),
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    Color,
    Variant,
    Class,
}

/// A parsed style keyword
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleKeyword {
    pub color: Option<SemanticColor>,
    pub variant: Option<WidgetVariant>,
    /// Class override, such as `toolbutton` on a checkbutton
    pub class: Option<WidgetClass>,
}

impl StyleKeyword {
    pub fn parse(keyword: &str) -> Result<Self, KeywordError> {
        let lowered = keyword.trim().to_lowercase();
        let mut parsed = StyleKeyword::default();
        if lowered.is_empty() {
            return Ok(parsed);
        }

        let tokens: SmallVec<[&str; 3]> = lowered.split('-').collect();
        if tokens.len() > 3 {
            return Err(KeywordError::TooManyTokens(keyword.to_string()));
        }

        let mut last: Option<Slot> = None;
        for token in tokens {
            let slot = if let Some(color) = accent(token) {
                parsed.color = Some(color);
                Slot::Color
            } else if let Ok(variant) = token.parse::<WidgetVariant>() {
                parsed.variant = Some(variant);
                Slot::Variant
            } else if let Ok(class) = token.parse::<WidgetClass>() {
                parsed.class = Some(class);
                Slot::Class
            } else {
                return Err(KeywordError::UnknownToken {
                    keyword: keyword.to_string(),
                    token: token.to_string(),
                });
            };
            if last.is_some_and(|last| slot <= last) {
                return Err(KeywordError::OutOfOrder {
                    keyword: keyword.to_string(),
                    token: token.to_string(),
                });
            }
            last = Some(slot);
        }
        Ok(parsed)
    }

    /// The class a widget of `class` is styled as
    pub fn class_for(&self, class: WidgetClass) -> WidgetClass {
        self.class.unwrap_or(class)
    }

    /// Native style name for a widget of `class`, such as
    /// `Primary.Outline.TButton`
    pub fn ttk_style_name(&self, class: WidgetClass, orient: Option<Orient>) -> String {
        let class = self.class_for(class);
        if !class.is_themed() {
            return String::new();
        }
        ttk_style_name(self.color, self.variant, orient, class)
    }

    /// The routing request for a widget of `class`
    pub fn request(&self, class: WidgetClass, orient: Option<Orient>) -> StyleRequest {
        let mut request = StyleRequest::new(self.class_for(class));
        if let Some(color) = self.color {
            request = request.color(color);
        }
        if let Some(variant) = self.variant {
            request = request.variant(variant);
        }
        if let Some(orient) = orient {
            request = request.orient(orient);
        }
        request.bootstyle = self.to_string();
        request
    }
}

fn accent(token: &str) -> Option<SemanticColor> {
    token
        .parse::<SemanticColor>()
        .ok()
        .filter(|color| color.is_accent())
}

impl FromStr for StyleKeyword {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleKeyword::parse(s)
    }
}

impl fmt::Display for StyleKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: SmallVec<[&str; 3]> = [
            self.color.map(SemanticColor::name),
            self.variant.map(WidgetVariant::token),
            self.class.map(WidgetClass::token),
        ]
        .into_iter()
        .flatten()
        .collect();
        f.write_str(&tokens.join("-"))
    }
}

/// The value of a widget's `bootstyle` or `style` option
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Bootstyle {
    Keyword(StyleKeyword),
    /// A native style name, used as-is and never routed
    Native(String),
}

impl Bootstyle {
    pub fn parse(value: &str) -> Result<Self, KeywordError> {
        if is_native_name(value) {
            Ok(Bootstyle::Native(value.trim().to_string()))
        } else {
            StyleKeyword::parse(value).map(Bootstyle::Keyword)
        }
    }
}

impl Default for Bootstyle {
    fn default() -> Self {
        Bootstyle::Keyword(StyleKeyword::default())
    }
}

impl fmt::Display for Bootstyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bootstyle::Keyword(keyword) => fmt::Display::fmt(keyword, f),
            Bootstyle::Native(name) => f.write_str(name),
        }
    }
}

/// Whether `value` is a native style name rather than a keyword
///
/// Dotted names and bare native class names such as `TButton` qualify.
/// Anything else is a keyword, whatever its case.
pub fn is_native_name(value: &str) -> bool {
    let value = value.trim();
    value.contains('.')
        || WidgetClass::ALL
            .into_iter()
            .any(|class| class.is_themed() && class.native_name() == value)
}
