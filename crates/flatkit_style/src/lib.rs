//! flatkit styles
//!
//! Turns color schemes into native widget styles. A [`Style`] registry pairs
//! a scheme with a [`ThemeEngine`] to form a theme; the engine's builders
//! generate element images, options, state maps and layouts into a
//! [`StyleDb`] the first time a widget asks for a style.
//!
//! Two engines are built in:
//!
//! - **chromatk**: rounded, image based chrome drawn with supersampling
//! - **bootstyle**: flat styles made by recoloring native elements
//!
//! # Quick Start
//!
//! ```rust
//! use flatkit_core::WidgetState;
//! use flatkit_style::{Style, StyleConfig, StyleRequest, StyleValue, WidgetClass};
//! use flatkit_theme::SemanticColor;
//!
//! let style = Style::new(StyleConfig::default())?;
//! style.theme_use("flatly-chromatk")?;
//!
//! let request = StyleRequest::new(WidgetClass::Button).color(SemanticColor::Primary);
//! style.route_style(&request)?;
//!
//! let scheme = style.scheme_get("flatly").unwrap();
//! assert_eq!(
//!     style.lookup("Primary.TButton", "foreground", WidgetState::NONE),
//!     Some(StyleValue::Color(scheme.get_foreground(SemanticColor::Primary))),
//! );
//! # Ok::<(), flatkit_style::StyleError>(())
//! ```

pub mod bootstyle;
pub mod chromatk;
pub mod config;
pub mod db;
pub mod element;
pub mod engine;
pub mod error;
pub mod palette;
pub mod request;
pub mod scale;
pub mod style;

pub use bootstyle::BootstyleEngine;
pub use chromatk::ChromatkEngine;
pub use config::StyleConfig;
pub use db::{NamedFont, StyleDb, StyleValue, ThemeSettings};
pub use element::{
    Edges, ElementImageBuilder, ElementLayout, ElementLayoutBuilder, ImageElement, Side, Sticky,
};
pub use engine::{BuildContext, BuildOptions, Builder, EngineEntry, HandlerTable, ThemeEngine};
pub use error::{Result, StyleError};
pub use palette::Palette;
pub use request::{
    element_prefix, ttk_style_name, HandlerKey, Orient, StyleRequest, WidgetClass, WidgetHandle,
    WidgetVariant,
};
pub use scale::Scale;
pub use style::{Style, StyleBus, Theme, ROUTE_STYLE_HANDLER, THEME_CHANGED};
