//! Theme engines
//!
//! A [`ThemeEngine`] turns style requests into native styles. It registers
//! one builder per [`HandlerKey`] in a [`HandlerTable`]; the registry calls
//! the builder of the current engine the first time a style is needed for
//! a scheme.
//!
//! # Writing an engine
//!
//! ```rust
//! use flatkit_style::{BuildContext, BuildOptions, HandlerTable, NamedFont, Scale, ThemeEngine};
//! use flatkit_style::{StyleValue, Result};
//! use flatkit_theme::SemanticColor;
//!
//! struct Plain;
//!
//! fn label(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
//!     let color = opts.color.unwrap_or(SemanticColor::Foreground);
//!     ctx.db.configure(&opts.ttkstyle, [("foreground", StyleValue::Color(opts.scheme.color(color)))])
//! }
//!
//! impl ThemeEngine for Plain {
//!     fn name(&self) -> &str { "plain" }
//!     fn base(&self) -> &str { "clam" }
//!     fn register_keywords(&self, handlers: &mut HandlerTable) -> Result<()> {
//!         handlers.handler_set("label", label)
//!     }
//!     fn create_named_fonts(&self, _scale: &Scale) -> Vec<NamedFont> { Vec::new() }
//! }
//! ```

use crate::db::{NamedFont, StyleDb, StyleValue, ThemeSettings};
use crate::element::{ElementImageBuilder, ElementLayoutBuilder};
use crate::error::{Result, StyleError};
use crate::request::{HandlerKey, Orient, WidgetClass, WidgetHandle};
use crate::scale::Scale;
use flatkit_paint::ImageHandle;
use flatkit_theme::{ColorScheme, SemanticColor};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::rc::Rc;

/// A style builder
pub type Builder = Rc<dyn Fn(&mut BuildContext, &BuildOptions) -> Result<()>>;

/// What a builder is asked to build
#[derive(Clone)]
pub struct BuildOptions {
    /// Scheme of the current theme
    pub scheme: Rc<ColorScheme>,
    /// Native style name to create, empty for native widgets
    pub ttkstyle: String,
    pub color: Option<SemanticColor>,
    pub orient: Option<Orient>,
    /// Requesting widget, set for window builders
    pub widget: Option<Rc<dyn WidgetHandle>>,
}

impl fmt::Debug for BuildOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildOptions")
            .field("scheme", &self.scheme.name())
            .field("ttkstyle", &self.ttkstyle)
            .field("color", &self.color)
            .field("orient", &self.orient)
            .finish()
    }
}

/// Access a builder has while it runs
pub struct BuildContext<'a> {
    pub db: &'a mut StyleDb,
    pub scale: Scale,
    assets: &'a mut Vec<ImageHandle>,
}

impl<'a> BuildContext<'a> {
    pub fn new(db: &'a mut StyleDb, scale: Scale, assets: &'a mut Vec<ImageHandle>) -> Self {
        Self { db, scale, assets }
    }

    /// Keep generated images alive as long as the engine
    pub fn register_assets<I>(&mut self, images: I)
    where
        I: IntoIterator<Item = ImageHandle>,
    {
        self.assets.extend(images);
    }

    pub fn element_image_builder(&self, name: impl Into<String>, image: ImageHandle) -> ElementImageBuilder {
        ElementImageBuilder::new(name, image)
    }

    pub fn element_layout_builder(&self, style: impl Into<String>) -> ElementLayoutBuilder {
        ElementLayoutBuilder::new(style)
    }
}

/// Builders of one engine, keyed by handler
#[derive(Default)]
pub struct HandlerTable {
    handlers: FxHashMap<HandlerKey, Builder>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a builder for a handler keyword such as `outline-button`
    ///
    /// The keyword is parsed here, so a typo fails registration instead of
    /// leaving the builder unreachable.
    pub fn handler_set<F>(&mut self, keyword: &str, builder: F) -> Result<()>
    where
        F: Fn(&mut BuildContext, &BuildOptions) -> Result<()> + 'static,
    {
        let key = HandlerKey::parse(keyword)?;
        self.handlers.insert(key, Rc::new(builder));
        Ok(())
    }

    pub fn handler_get(&self, key: &HandlerKey) -> Option<Builder> {
        self.handlers.get(key).cloned()
    }

    /// Handler keywords, longest first
    pub fn keywords(&self) -> Vec<String> {
        let mut keywords: Vec<String> = self.handlers.keys().map(HandlerKey::to_string).collect();
        keywords.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        keywords
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// A strategy for turning style requests into native styles
pub trait ThemeEngine {
    /// Engine name, the second half of a theme name
    fn name(&self) -> &str;

    /// Native theme the engine's themes derive from
    fn base(&self) -> &str;

    fn register_keywords(&self, handlers: &mut HandlerTable) -> Result<()>;

    fn create_named_fonts(&self, scale: &Scale) -> Vec<NamedFont>;

    /// Settings applied when a theme of this engine is created
    fn theme_settings(&self, _scheme: &ColorScheme) -> ThemeSettings {
        ThemeSettings::default()
    }
}

/// A registered engine with its handlers and per-scheme registries
pub struct EngineEntry {
    engine: Box<dyn ThemeEngine>,
    handlers: HandlerTable,
    /// Realized style names per scheme
    styles: FxHashMap<String, FxHashSet<String>>,
    /// Generated images per scheme
    assets: IndexMap<String, Vec<ImageHandle>>,
}

impl EngineEntry {
    pub fn new(engine: Box<dyn ThemeEngine>) -> Result<Self> {
        let mut handlers = HandlerTable::new();
        engine.register_keywords(&mut handlers)?;
        tracing::debug!(engine = engine.name(), handlers = handlers.len(), "registered theme engine");
        Ok(Self {
            engine,
            handlers,
            styles: FxHashMap::default(),
            assets: IndexMap::new(),
        })
    }

    pub fn engine(&self) -> &dyn ThemeEngine {
        self.engine.as_ref()
    }

    pub fn name(&self) -> &str {
        self.engine.name()
    }

    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    pub fn style_exists(&self, name: &str, scheme: &str) -> bool {
        self.styles
            .get(scheme)
            .is_some_and(|styles| styles.contains(name))
    }

    pub fn style_register(&mut self, name: &str, scheme: &str) {
        self.styles
            .entry(scheme.to_string())
            .or_default()
            .insert(name.to_string());
    }

    /// Realized style names of a scheme, sorted
    pub fn styles(&self, scheme: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .styles
            .get(scheme)
            .map(|s| s.iter().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    pub fn assets(&self, scheme: &str) -> &[ImageHandle] {
        self.assets.get(scheme).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn assets_mut(&mut self, scheme: &str) -> &mut Vec<ImageHandle> {
        self.assets.entry(scheme.to_string()).or_default()
    }
}

impl fmt::Debug for EngineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineEntry")
            .field("name", &self.name())
            .field("base", &self.engine.base())
            .field("handlers", &self.handlers.keywords())
            .finish()
    }
}

/// Options of the root style `.` for a scheme
pub(crate) fn root_options(scheme: &ColorScheme) -> Vec<(&'static str, StyleValue)> {
    let background = scheme.color(SemanticColor::Background);
    vec![
        ("font", "TkBody".into()),
        ("background", background.into()),
        ("darkcolor", background.into()),
        ("foreground", scheme.color(SemanticColor::Foreground).into()),
        ("troughcolor", background.into()),
        ("selectbg", scheme.color(SemanticColor::Info).into()),
        ("selectfg", background.into()),
        ("fieldbg", background.into()),
        ("borderwidth", StyleValue::Int(1)),
    ]
}

/// Settings hook shared by the built-in engines
pub(crate) fn root_settings(scheme: &ColorScheme) -> ThemeSettings {
    root_options(scheme)
        .into_iter()
        .fold(ThemeSettings::new(), |settings, (option, value)| {
            settings.configure(".", option, value)
        })
}

/// Style the application window and the root style
pub(crate) fn create_window_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let window = opts
        .widget
        .as_ref()
        .ok_or_else(|| StyleError::MissingWidget(HandlerKey::new(WidgetClass::Window).to_string()))?;
    let background = opts.scheme.color(SemanticColor::Background);
    window.set_option("background", background.into());
    ctx.db.configure(".", root_options(&opts.scheme))
}

/// Type scale shared by the built-in engines, sizes in pixels
pub(crate) fn type_ramp(scale: &Scale) -> Vec<NamedFont> {
    const SCALING: f64 = 1.4;
    let s = |px: f64| scale.ss(-px * SCALING) as i32;
    [
        ("TkCaption", "Segoe UI", 12.0),
        ("TkBody", "Segoe UI", 14.0),
        ("TkBodyStrong", "Segoe UI Semibold", 14.0),
        ("TkBodyLarge", "Segoe UI", 18.0),
        ("TkSubtitle", "Segoe UI Semibold", 20.0),
        ("TkTitle", "Segoe UI Semibold", 28.0),
        ("TkTitleLarge", "Segoe UI Semibold", 40.0),
        ("TkDisplay", "Segoe UI Semibold", 68.0),
    ]
    .into_iter()
    .map(|(name, family, px)| NamedFont::new(name, family, s(px)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::WidgetVariant;

    fn noop(_: &mut BuildContext, _: &BuildOptions) -> Result<()> {
        Ok(())
    }

    #[test]
    fn test_handler_table() {
        let mut table = HandlerTable::new();
        table.handler_set("button", noop).unwrap();
        table.handler_set("outline-button", noop).unwrap();
        table.handler_set("tk-tk", noop).unwrap();

        assert_eq!(table.keywords(), ["outline-button", "button", "tk-tk"]);
        let key = HandlerKey::new(WidgetClass::Button).with_variant(WidgetVariant::Outline);
        assert!(table.handler_get(&key).is_some());
        assert!(table
            .handler_get(&HandlerKey::new(WidgetClass::Scale))
            .is_none());
    }

    #[test]
    fn test_typo_fails_registration() {
        let mut table = HandlerTable::new();
        let err = table.handler_set("outline-buton", noop).unwrap_err();
        assert!(matches!(err, StyleError::InvalidKeyword { token, .. } if token == "buton"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_type_ramp_sizes() {
        let fonts = type_ramp(&Scale::default());
        assert_eq!(fonts.len(), 8);
        assert_eq!(fonts[0], NamedFont::new("TkCaption", "Segoe UI", -16));
        assert_eq!(fonts[1].size, -19);
        assert_eq!(fonts[7], NamedFont::new("TkDisplay", "Segoe UI Semibold", -95));
    }
}
