//! In-memory style database
//!
//! [`StyleDb`] has the semantics of a themed widget set's style engine:
//!
//! - **Themes** form a tree. Lookups that miss in the current theme continue
//!   in its parent. The built-in `default` theme is the root and `clam` is a
//!   child of it.
//! - **Styles** are dotted names. `Primary.Outline.TButton` inherits from
//!   `Outline.TButton`, then `TButton`, then the root style `.`.
//! - Each style has configured **options**, per-option **state maps** and an
//!   optional **layout**.
//! - **Elements**, **named fonts** and the **option database** complete the
//!   picture.
//!
//! Everything except fonts and the option database is stored per theme, and
//! every mutation targets the current theme.

use crate::element::{ElementLayout, ImageElement, Sticky};
use crate::error::{Result, StyleError};
use flatkit_core::{Rgb, StateSpec, WidgetState};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::fmt;

/// Name of the root theme
pub const DEFAULT_THEME: &str = "default";

/// Name of the built-in flat skin both engines derive from
pub const CLAM_THEME: &str = "clam";

/// A style option value
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleValue {
    Text(String),
    Color(Rgb),
    Int(i64),
}

impl StyleValue {
    pub fn as_color(&self) -> Option<Rgb> {
        match self {
            StyleValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            StyleValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(s) => f.write_str(s),
            StyleValue::Color(c) => write!(f, "{c}"),
            StyleValue::Int(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<Rgb> for StyleValue {
    fn from(c: Rgb) -> Self {
        StyleValue::Color(c)
    }
}

impl From<i64> for StyleValue {
    fn from(v: i64) -> Self {
        StyleValue::Int(v)
    }
}

impl From<i32> for StyleValue {
    fn from(v: i32) -> Self {
        StyleValue::Int(v.into())
    }
}

impl From<u32> for StyleValue {
    fn from(v: u32) -> Self {
        StyleValue::Int(v.into())
    }
}

/// Style options applied when a theme is created
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeSettings {
    styles: IndexMap<String, IndexMap<String, StyleValue>>,
}

impl ThemeSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(mut self, style: &str, option: &str, value: impl Into<StyleValue>) -> Self {
        self.styles
            .entry(style.to_string())
            .or_default()
            .insert(option.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<String, StyleValue>)> {
        self.styles.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A named font; negative sizes are in pixels, positive sizes in points
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedFont {
    pub name: String,
    pub family: String,
    pub size: i32,
}

impl NamedFont {
    pub fn new(name: &str, family: &str, size: i32) -> Self {
        Self {
            name: name.to_string(),
            family: family.to_string(),
            size,
        }
    }
}

#[derive(Debug, Default)]
struct StyleEntry {
    options: IndexMap<String, StyleValue>,
    maps: IndexMap<String, Vec<(StateSpec, StyleValue)>>,
    layout: Option<Vec<ElementLayout>>,
}

#[derive(Debug, Default)]
struct NativeTheme {
    parent: Option<String>,
    styles: FxHashMap<String, StyleEntry>,
    elements: FxHashMap<String, ImageElement>,
}

/// The style database
#[derive(Debug)]
pub struct StyleDb {
    themes: IndexMap<String, NativeTheme>,
    current: Option<String>,
    fonts: IndexMap<String, NamedFont>,
    options: IndexMap<String, StyleValue>,
}

impl Default for StyleDb {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleDb {
    /// Create a database holding the built-in `default` and `clam` themes
    ///
    /// No theme is in use until [`StyleDb::theme_use`] is called.
    pub fn new() -> Self {
        let mut themes = IndexMap::new();
        themes.insert(DEFAULT_THEME.to_string(), default_theme());
        themes.insert(CLAM_THEME.to_string(), clam_theme());
        Self {
            themes,
            current: None,
            fonts: IndexMap::new(),
            options: IndexMap::new(),
        }
    }

    /// Create a theme
    ///
    /// `parent` defaults to the root theme.
    pub fn theme_create(
        &mut self,
        name: &str,
        parent: Option<&str>,
        settings: Option<&ThemeSettings>,
    ) -> Result<()> {
        if self.themes.contains_key(name) {
            return Err(StyleError::ThemeExists(name.to_string()));
        }
        let parent = parent.unwrap_or(DEFAULT_THEME);
        if !self.themes.contains_key(parent) {
            return Err(StyleError::ThemeNotFound(parent.to_string()));
        }

        tracing::debug!(theme = name, parent, "creating native theme");
        self.themes.insert(
            name.to_string(),
            NativeTheme {
                parent: Some(parent.to_string()),
                ..NativeTheme::default()
            },
        );
        if let Some(settings) = settings {
            self.theme_settings(name, settings)?;
        }
        Ok(())
    }

    /// Apply settings to a theme without switching to it
    pub fn theme_settings(&mut self, name: &str, settings: &ThemeSettings) -> Result<()> {
        let theme = self
            .themes
            .get_mut(name)
            .ok_or_else(|| StyleError::ThemeNotFound(name.to_string()))?;
        for (style, options) in settings.iter() {
            let entry = theme.styles.entry(style.to_string()).or_default();
            for (option, value) in options {
                entry.options.insert(option.clone(), value.clone());
            }
        }
        Ok(())
    }

    pub fn theme_use(&mut self, name: &str) -> Result<()> {
        if !self.themes.contains_key(name) {
            return Err(StyleError::ThemeNotFound(name.to_string()));
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    pub fn current_theme(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Theme names in creation order
    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }

    pub fn theme_parent(&self, name: &str) -> Option<&str> {
        self.themes.get(name).and_then(|t| t.parent.as_deref())
    }

    /// Set options of a style
    pub fn configure<'a, I>(&mut self, style: &str, options: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, StyleValue)>,
    {
        let entry = self.style_entry_mut(style)?;
        for (option, value) in options {
            entry.options.insert(option.to_string(), value);
        }
        Ok(())
    }

    /// Replace the state map of one option of a style
    pub fn map<'a, I>(&mut self, style: &str, option: &str, specs: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, StyleValue)>,
    {
        let specs = specs
            .into_iter()
            .map(|(spec, value)| -> Result<(StateSpec, StyleValue)> {
                Ok((spec.parse()?, value))
            })
            .collect::<Result<Vec<_>>>()?;
        self.style_entry_mut(style)?
            .maps
            .insert(option.to_string(), specs);
        Ok(())
    }

    /// Replace the layout of a style
    pub fn layout(&mut self, style: &str, nodes: Vec<ElementLayout>) -> Result<()> {
        self.style_entry_mut(style)?.layout = Some(nodes);
        Ok(())
    }

    /// Create or replace an element in the current theme
    pub fn element_create(&mut self, name: &str, element: ImageElement) -> Result<()> {
        self.current_mut()?
            .elements
            .insert(name.to_string(), element);
        Ok(())
    }

    /// Create a named font, reconfiguring it if it already exists
    pub fn font_create(&mut self, font: NamedFont) {
        self.fonts.insert(font.name.clone(), font);
    }

    pub fn font(&self, name: &str) -> Option<&NamedFont> {
        self.fonts.get(name)
    }

    pub fn font_names(&self) -> Vec<&str> {
        self.fonts.keys().map(String::as_str).collect()
    }

    /// Add an option database entry such as `*TCombobox*Listbox.background`
    pub fn option_add(&mut self, pattern: &str, value: impl Into<StyleValue>) {
        self.options.insert(pattern.to_string(), value.into());
    }

    pub fn option_get(&self, pattern: &str) -> Option<&StyleValue> {
        self.options.get(pattern)
    }

    /// Resolve an option of a style in `state`
    ///
    /// Each style of the inheritance chain is checked, state map first and
    /// configured value second, before moving on to the parent theme.
    pub fn lookup(&self, style: &str, option: &str, state: WidgetState) -> Option<&StyleValue> {
        self.current_chain().find_map(|theme| {
            style_chain(style).find_map(|name| {
                let entry = theme.styles.get(name)?;
                entry
                    .maps
                    .get(option)
                    .and_then(|specs| specs.iter().find(|(spec, _)| spec.matches(state)))
                    .map(|(_, value)| value)
                    .or_else(|| entry.options.get(option))
            })
        })
    }

    /// The layout a style renders with, inherited like options
    pub fn layout_of(&self, style: &str) -> Option<&[ElementLayout]> {
        self.current_chain().find_map(|theme| {
            style_chain(style)
                .filter(|name| *name != ".")
                .find_map(|name| theme.styles.get(name)?.layout.as_deref())
        })
    }

    /// Find an element in the current theme or its ancestors
    pub fn element(&self, name: &str) -> Option<&ImageElement> {
        self.current_chain()
            .find_map(|theme| theme.elements.get(name))
    }

    /// Element names of the current theme, sorted
    pub fn element_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .current()
            .map(|t| t.elements.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Style names of the current theme, sorted
    pub fn style_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .current()
            .map(|t| t.styles.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Options configured directly on a style of the current theme
    pub fn style_options(&self, style: &str) -> Vec<(&str, &StyleValue)> {
        self.current()
            .and_then(|t| t.styles.get(style))
            .map(|e| e.options.iter().map(|(k, v)| (k.as_str(), v)).collect())
            .unwrap_or_default()
    }

    /// The state map set directly on a style option of the current theme
    pub fn state_map(&self, style: &str, option: &str) -> Option<&[(StateSpec, StyleValue)]> {
        self.current()?
            .styles
            .get(style)?
            .maps
            .get(option)
            .map(Vec::as_slice)
    }

    /// Options with a state map on a style of the current theme
    pub fn mapped_options(&self, style: &str) -> Vec<&str> {
        self.current()
            .and_then(|t| t.styles.get(style))
            .map(|e| e.maps.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn current(&self) -> Option<&NativeTheme> {
        self.themes.get(self.current.as_deref()?)
    }

    fn current_mut(&mut self) -> Result<&mut NativeTheme> {
        let name = self.current.as_deref().ok_or(StyleError::NoActiveTheme)?;
        self.themes
            .get_mut(name)
            .ok_or_else(|| StyleError::ThemeNotFound(name.to_string()))
    }

    fn style_entry_mut(&mut self, style: &str) -> Result<&mut StyleEntry> {
        let style = if style.is_empty() { "." } else { style };
        Ok(self
            .current_mut()?
            .styles
            .entry(style.to_string())
            .or_default())
    }

    fn current_chain(&self) -> impl Iterator<Item = &NativeTheme> {
        std::iter::successors(self.current(), move |theme| {
            self.themes.get(theme.parent.as_deref()?)
        })
    }
}

/// The inheritance chain of a style name, ending with the root style `.`
pub fn style_chain(style: &str) -> impl Iterator<Item = &str> {
    let first = if style.is_empty() { "." } else { style };
    std::iter::successors(Some(first), |name| {
        if *name == "." {
            return None;
        }
        Some(name.split_once('.').map_or(".", |(_, rest)| rest))
    })
}

fn default_theme() -> NativeTheme {
    let mut theme = NativeTheme::default();
    let root = theme.styles.entry(".".to_string()).or_default();
    for (option, value) in [
        ("background", StyleValue::Color(Rgb::from_hex(0xd9d9d9))),
        ("foreground", StyleValue::Color(Rgb::BLACK)),
        ("font", StyleValue::from("TkDefaultFont")),
        ("borderwidth", StyleValue::Int(1)),
    ] {
        root.options.insert(option.to_string(), value);
    }

    let nsew = Some(Sticky::NSEW);
    let nested = |names: &[&str]| {
        names.iter().rev().fold(None::<ElementLayout>, |inner, name| {
            let mut node = ElementLayout::new(*name);
            node.sticky = nsew;
            Some(match inner {
                Some(child) => node.child(child),
                None => node,
            })
        })
    };
    for (style, elements) in [
        (
            "TButton",
            &["Button.border", "Button.focus", "Button.padding", "Button.label"][..],
        ),
        ("TLabel", &["Label.border", "Label.padding", "Label.label"][..]),
        ("TFrame", &["Frame.border"][..]),
    ] {
        theme.styles.entry(style.to_string()).or_default().layout =
            nested(elements).map(|root| vec![root]);
    }
    theme
}

fn clam_theme() -> NativeTheme {
    let mut theme = NativeTheme {
        parent: Some(DEFAULT_THEME.to_string()),
        ..NativeTheme::default()
    };
    let root = theme.styles.entry(".".to_string()).or_default();
    for (option, hex) in [
        ("background", 0xdcdad5),
        ("darkcolor", 0xcfcdc8),
        ("lightcolor", 0xeeebe7),
        ("troughcolor", 0xbab5ab),
        ("bordercolor", 0x9e9a91),
    ] {
        root.options
            .insert(option.to_string(), StyleValue::Color(Rgb::from_hex(hex)));
    }
    theme
}
