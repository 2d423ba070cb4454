//! The style registry
//!
//! [`Style`] owns the color schemes, the theme engines, every theme created
//! so far and the [`StyleDb`] they are registered in. Widgets talk to it
//! through its [`EventBus`]: they dispatch a [`StyleRequest`] on
//! [`ROUTE_STYLE_HANDLER`] and subscribe to [`THEME_CHANGED`].
//!
//! # Example
//!
//! ```rust
//! use flatkit_style::{Style, StyleConfig, StyleRequest, WidgetClass};
//! use flatkit_theme::SemanticColor;
//!
//! let style = Style::new(StyleConfig::default())?;
//! style.theme_use("superhero")?;
//!
//! let request = StyleRequest::new(WidgetClass::Button).color(SemanticColor::Danger);
//! style.route_style(&request)?;
//! assert!(style.is_realized("Danger.TButton"));
//! # Ok::<(), flatkit_style::StyleError>(())
//! ```

use crate::bootstyle::BootstyleEngine;
use crate::chromatk::ChromatkEngine;
use crate::config::StyleConfig;
use crate::db::{StyleDb, StyleValue};
use crate::element::{ElementLayout, ImageElement};
use crate::engine::{BuildContext, BuildOptions, EngineEntry, ThemeEngine};
use crate::error::{Result, StyleError};
use crate::request::StyleRequest;
use crate::scale::Scale;
use flatkit_core::{EventBus, WidgetState};
use flatkit_theme::{builtin_schemes, ColorScheme, SchemeFile, SchemeMode};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::{Rc, Weak};

/// Published after a theme is activated, without a message
pub const THEME_CHANGED: &str = "theme-changed";

/// Carries a [`StyleRequest`] to the registry
pub const ROUTE_STYLE_HANDLER: &str = "route-style-handler";

/// The bus shared by the registry and its widgets
pub type StyleBus = EventBus<StyleRequest, StyleError>;

/// A scheme paired with an engine
#[derive(Clone, Debug)]
pub struct Theme {
    name: String,
    scheme: Rc<ColorScheme>,
    engine: String,
}

impl Theme {
    /// Composite name, `{scheme}-{engine}`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scheme(&self) -> &Rc<ColorScheme> {
        &self.scheme
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }
}

struct Registry {
    scale: Scale,
    default_scheme: String,
    default_engine: String,
    db: StyleDb,
    schemes: IndexMap<String, Rc<ColorScheme>>,
    engines: IndexMap<String, EngineEntry>,
    themes: IndexMap<String, Theme>,
    current: Option<Theme>,
}

impl Registry {
    fn activate(&mut self, name: &str) -> Result<Theme> {
        let theme = match self.themes.get(name) {
            Some(theme) => theme.clone(),
            None => {
                let (scheme, engine) = self.resolve(name)?;
                let composite = format!("{}-{}", scheme.name(), engine);
                match self.themes.get(&composite) {
                    Some(theme) => theme.clone(),
                    None => self.theme_create(composite, scheme, engine)?,
                }
            }
        };
        self.db.theme_use(&theme.name)?;
        self.current = Some(theme.clone());
        Ok(theme)
    }

    /// Split a theme name into its scheme and engine
    fn resolve(&self, name: &str) -> Result<(Rc<ColorScheme>, String)> {
        if let Some(scheme) = self.schemes.get(name) {
            return Ok((scheme.clone(), self.default_engine.clone()));
        }
        if self.engines.contains_key(name) {
            return Ok((self.scheme(&self.default_scheme)?, name.to_string()));
        }
        // the engine is the last token, scheme names may hold hyphens
        let Some((scheme, engine)) = name.rsplit_once('-') else {
            return Err(StyleError::UnknownTheme(name.to_string()));
        };
        let scheme = self.scheme(scheme)?;
        if !self.engines.contains_key(engine) {
            return Err(StyleError::UnknownEngine(engine.to_string()));
        }
        Ok((scheme, engine.to_string()))
    }

    fn scheme(&self, name: &str) -> Result<Rc<ColorScheme>> {
        self.schemes
            .get(name)
            .cloned()
            .ok_or_else(|| StyleError::UnknownScheme(name.to_string()))
    }

    fn theme_create(&mut self, name: String, scheme: Rc<ColorScheme>, engine: String) -> Result<Theme> {
        let entry = self
            .engines
            .get(&engine)
            .ok_or_else(|| StyleError::UnknownEngine(engine.clone()))?;
        let settings = entry.engine().theme_settings(&scheme);
        self.db
            .theme_create(&name, Some(entry.engine().base()), Some(&settings))?;
        for font in entry.engine().create_named_fonts(&self.scale) {
            self.db.font_create(font);
        }

        tracing::debug!(theme = %name, base = entry.engine().base(), "created theme");
        let theme = Theme {
            name: name.clone(),
            scheme,
            engine,
        };
        self.themes.insert(name, theme.clone());
        Ok(theme)
    }

    fn route(&mut self, request: &StyleRequest) -> Result<()> {
        let theme = self.current.clone().ok_or(StyleError::NoActiveTheme)?;
        // sub-styles run every time, they carry global options
        for &class in &request.hybrid_styles {
            self.build(&theme, &request.sub_request(class), true)?;
        }
        self.build(&theme, request, false)
    }

    fn build(&mut self, theme: &Theme, request: &StyleRequest, always: bool) -> Result<()> {
        let Registry {
            scale, db, engines, ..
        } = self;
        let entry = engines
            .get_mut(&theme.engine)
            .ok_or_else(|| StyleError::UnknownEngine(theme.engine.clone()))?;
        let scheme = theme.scheme.name();

        if !always && !request.is_native() && entry.style_exists(&request.ttkstyle, scheme) {
            return Ok(());
        }
        let key = request.handler_key();
        let Some(builder) = entry.handlers().handler_get(&key) else {
            tracing::debug!(handler = %key, engine = entry.name(), "no style handler, using base style");
            return Ok(());
        };

        let opts = BuildOptions {
            scheme: theme.scheme.clone(),
            ttkstyle: request.ttkstyle.clone(),
            color: request.color,
            orient: request.orient,
            widget: request.widget.clone(),
        };
        let mut ctx = BuildContext::new(db, *scale, entry.assets_mut(scheme));
        builder(&mut ctx, &opts)?;

        if !request.is_native() {
            entry.style_register(&request.ttkstyle, scheme);
            tracing::debug!(style = %request.ttkstyle, theme = %theme.name, "realized style");
        }
        Ok(())
    }

    fn current_entry(&self) -> Option<(&Theme, &EngineEntry)> {
        let theme = self.current.as_ref()?;
        Some((theme, self.engines.get(&theme.engine)?))
    }
}

/// Handle to a style registry
///
/// Cloning produces another handle to the same registry.
#[derive(Clone)]
pub struct Style {
    inner: Rc<RefCell<Registry>>,
    bus: StyleBus,
}

impl Style {
    /// Create a registry with the built-in schemes and engines plus the
    /// schemes of `config`
    ///
    /// No theme is in use until [`Style::theme_use`] is called.
    pub fn new(config: StyleConfig) -> Result<Self> {
        let scale = config
            .scaling
            .map(Scale::from_tk_scaling)
            .unwrap_or_default();

        let mut schemes = IndexMap::new();
        for scheme in builtin_schemes() {
            schemes.insert(scheme.name().to_string(), Rc::new(scheme));
        }
        for def in &config.schemes {
            let scheme = def.to_scheme()?;
            schemes.insert(scheme.name().to_string(), Rc::new(scheme));
        }
        if !schemes.contains_key(&config.default_scheme) {
            return Err(StyleError::UnknownScheme(config.default_scheme));
        }

        let builtin: [Box<dyn ThemeEngine>; 2] = [Box::new(ChromatkEngine), Box::new(BootstyleEngine)];
        let mut engines = IndexMap::new();
        for engine in builtin {
            let entry = EngineEntry::new(engine)?;
            engines.insert(entry.name().to_string(), entry);
        }
        if !engines.contains_key(&config.default_engine) {
            return Err(StyleError::UnknownEngine(config.default_engine));
        }

        let inner = Rc::new(RefCell::new(Registry {
            scale,
            default_scheme: config.default_scheme,
            default_engine: config.default_engine,
            db: StyleDb::new(),
            schemes,
            engines,
            themes: IndexMap::new(),
            current: None,
        }));

        let bus = StyleBus::new();
        let weak: Weak<RefCell<Registry>> = Rc::downgrade(&inner);
        bus.subscribe(ROUTE_STYLE_HANDLER, move |request: Option<&StyleRequest>| {
            let (Some(inner), Some(request)) = (weak.upgrade(), request) else {
                return Ok(());
            };
            let mut registry = inner.borrow_mut();
            registry.route(request)
        });

        tracing::debug!(scale = scale.factor(), "created style registry");
        Ok(Self { inner, bus })
    }

    /// Activate a theme by composite, scheme or engine name
    ///
    /// The theme is created the first time it is used. [`THEME_CHANGED`] is
    /// published once the theme is active; the first subscriber error is
    /// returned.
    pub fn theme_use(&self, name: &str) -> Result<()> {
        let theme = self.inner.borrow_mut().activate(name)?;
        tracing::debug!(theme = theme.name(), "theme in use");
        self.bus.dispatch(THEME_CHANGED, None)
    }

    pub fn theme_current(&self) -> Option<Theme> {
        self.inner.borrow().current.clone()
    }

    /// Native theme names, built-in skins included
    pub fn theme_names(&self) -> Vec<String> {
        self.inner
            .borrow()
            .db
            .theme_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn theme_engine_add(&self, engine: Box<dyn ThemeEngine>) -> Result<()> {
        let mut registry = self.inner.borrow_mut();
        if registry.engines.contains_key(engine.name()) {
            return Err(StyleError::DuplicateEngine(engine.name().to_string()));
        }
        let entry = EngineEntry::new(engine)?;
        registry.engines.insert(entry.name().to_string(), entry);
        Ok(())
    }

    pub fn engine_names(&self) -> Vec<String> {
        self.inner.borrow().engines.keys().cloned().collect()
    }

    /// Run `f` with a registered engine
    pub fn with_engine<R>(&self, name: &str, f: impl FnOnce(&EngineEntry) -> R) -> Option<R> {
        self.inner.borrow().engines.get(name).map(f)
    }

    /// Create a scheme from `(color name, hex value)` pairs, replacing any
    /// scheme of the same name
    pub fn scheme_create<'a, I>(&self, name: &str, mode: SchemeMode, colors: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let scheme = ColorScheme::new(name, mode, colors)?;
        self.scheme_add(scheme);
        Ok(())
    }

    /// Add a scheme, replacing any scheme of the same name
    ///
    /// Themes already created keep the scheme they were created with.
    pub fn scheme_add(&self, scheme: ColorScheme) {
        tracing::debug!(scheme = scheme.name(), mode = %scheme.mode(), "added color scheme");
        self.inner
            .borrow_mut()
            .schemes
            .insert(scheme.name().to_string(), Rc::new(scheme));
    }

    pub fn scheme_get(&self, name: &str) -> Option<Rc<ColorScheme>> {
        self.inner.borrow().schemes.get(name).cloned()
    }

    pub fn scheme_names(&self) -> Vec<String> {
        self.inner.borrow().schemes.keys().cloned().collect()
    }

    /// Add every scheme of a TOML scheme file, returning how many were added
    pub fn load_scheme_file(&self, path: &Path) -> Result<usize> {
        let schemes = SchemeFile::load(path)?.to_schemes()?;
        let count = schemes.len();
        for scheme in schemes {
            self.scheme_add(scheme);
        }
        Ok(count)
    }

    /// Realize the native style of a request in the current theme
    pub fn route_style(&self, request: &StyleRequest) -> Result<()> {
        self.inner.borrow_mut().route(request)
    }

    pub fn lookup(&self, style: &str, option: &str, state: WidgetState) -> Option<StyleValue> {
        self.inner.borrow().db.lookup(style, option, state).cloned()
    }

    pub fn layout(&self, style: &str) -> Option<Vec<ElementLayout>> {
        self.inner.borrow().db.layout_of(style).map(<[_]>::to_vec)
    }

    pub fn element(&self, name: &str) -> Option<ImageElement> {
        self.inner.borrow().db.element(name).cloned()
    }

    /// Whether a native style was built for the current theme
    pub fn is_realized(&self, style: &str) -> bool {
        self.inner
            .borrow()
            .current_entry()
            .is_some_and(|(theme, entry)| entry.style_exists(style, theme.scheme.name()))
    }

    /// Native styles built for the current theme, sorted
    pub fn realized_styles(&self) -> Vec<String> {
        self.inner
            .borrow()
            .current_entry()
            .map(|(theme, entry)| {
                entry
                    .styles(theme.scheme.name())
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Images generated for the current theme
    pub fn asset_count(&self) -> usize {
        self.inner
            .borrow()
            .current_entry()
            .map_or(0, |(theme, entry)| entry.assets(theme.scheme.name()).len())
    }

    pub fn scale(&self) -> Scale {
        self.inner.borrow().scale
    }

    /// Run `f` with read access to the style database
    pub fn with_db<R>(&self, f: impl FnOnce(&StyleDb) -> R) -> R {
        f(&self.inner.borrow().db)
    }

    pub fn bus(&self) -> &StyleBus {
        &self.bus
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.borrow();
        f.debug_struct("Style")
            .field("current", &registry.current.as_ref().map(Theme::name))
            .field("schemes", &registry.schemes.len())
            .field("engines", &registry.engines.len())
            .field("themes", &registry.themes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::WidgetClass;
    use flatkit_theme::SemanticColor;

    fn style() -> Style {
        Style::new(StyleConfig::default()).unwrap()
    }

    #[test]
    fn test_theme_name_resolution() {
        let style = style();

        style.theme_use("superhero").unwrap();
        assert_eq!(style.theme_current().unwrap().name(), "superhero-chromatk");

        style.theme_use("bootstyle").unwrap();
        assert_eq!(style.theme_current().unwrap().name(), "flatly-bootstyle");

        style.theme_use("minty-bootstyle").unwrap();
        let theme = style.theme_current().unwrap();
        assert_eq!(theme.scheme().name(), "minty");
        assert_eq!(theme.engine(), "bootstyle");
    }

    #[test]
    fn test_unknown_tokens_are_named() {
        let style = style();
        assert!(matches!(
            style.theme_use("nope-chromatk"),
            Err(StyleError::UnknownScheme(s)) if s == "nope"
        ));
        assert!(matches!(
            style.theme_use("flatly-nope"),
            Err(StyleError::UnknownEngine(e)) if e == "nope"
        ));
        assert!(matches!(
            style.theme_use("not-a-real-scheme-chromatk"),
            Err(StyleError::UnknownScheme(s)) if s == "not-a-real-scheme"
        ));
        assert!(matches!(
            style.theme_use("nothing"),
            Err(StyleError::UnknownTheme(t)) if t == "nothing"
        ));
        assert!(style.theme_current().is_none());
    }

    #[test]
    fn test_hyphenated_scheme_in_composite_name() {
        let style = style();
        style
            .scheme_create(
                "my-dark",
                SchemeMode::Dark,
                [("background", "#111111"), ("foreground", "#eeeeee")],
            )
            .unwrap();
        style.theme_use("my-dark-bootstyle").unwrap();
        let theme = style.theme_current().unwrap();
        assert_eq!(theme.name(), "my-dark-bootstyle");
        assert_eq!(theme.scheme().name(), "my-dark");
        assert_eq!(theme.engine(), "bootstyle");

        style.theme_use("my-dark").unwrap();
        assert_eq!(style.theme_current().unwrap().name(), "my-dark-chromatk");
    }

    #[test]
    fn test_bare_and_composite_names_share_a_theme() {
        let style = style();
        style.theme_use("flatly").unwrap();
        let before = style.theme_names().len();
        style.theme_use("flatly-chromatk").unwrap();
        style.theme_use("chromatk").unwrap();
        assert_eq!(style.theme_names().len(), before);
        assert_eq!(style.theme_names()[..2], ["default", "clam"]);
    }

    #[test]
    fn test_theme_creation_installs_fonts_and_root_options() {
        let style = style();
        style.theme_use("superhero").unwrap();
        let scheme = style.scheme_get("superhero").unwrap();
        assert_eq!(
            style.lookup(".", "background", WidgetState::NONE),
            Some(StyleValue::Color(scheme.color(SemanticColor::Background)))
        );
        style.with_db(|db| {
            assert_eq!(db.theme_parent("superhero-chromatk"), Some("clam"));
            assert_eq!(db.font("TkBody").map(|f| f.size), Some(-19));
        });
    }

    #[test]
    fn test_route_without_theme() {
        let style = style();
        let request = StyleRequest::new(WidgetClass::Button);
        assert!(matches!(
            style.route_style(&request),
            Err(StyleError::NoActiveTheme)
        ));
    }

    #[test]
    fn test_styles_are_realized_per_scheme() {
        let style = style();
        let request = StyleRequest::new(WidgetClass::Button).color(SemanticColor::Info);

        style.theme_use("flatly").unwrap();
        style.route_style(&request).unwrap();
        assert!(style.is_realized("Info.TButton"));
        assert_eq!(style.asset_count(), 3);

        style.theme_use("cosmo").unwrap();
        assert!(!style.is_realized("Info.TButton"));
        assert_eq!(style.asset_count(), 0);

        style.theme_use("flatly").unwrap();
        assert_eq!(style.realized_styles(), ["Info.TButton"]);
    }

    #[test]
    fn test_hybrid_request_realizes_sub_styles() {
        let style = style();
        style.theme_use("flatly").unwrap();
        let request = StyleRequest::new(WidgetClass::Combobox).color(SemanticColor::Success);
        style.bus().dispatch(ROUTE_STYLE_HANDLER, Some(&request)).unwrap();
        assert_eq!(
            style.realized_styles(),
            ["Success.ComboboxPopdownFrame", "Success.TCombobox"]
        );
    }

    #[test]
    fn test_missing_handler_falls_back() {
        let style = style();
        style.theme_use("bootstyle").unwrap();
        let request = StyleRequest::new(WidgetClass::Treeview);
        style.route_style(&request).unwrap();
        assert!(!style.is_realized("Treeview"));
    }

    #[test]
    fn test_duplicate_engine() {
        let style = style();
        let err = style
            .theme_engine_add(Box::new(ChromatkEngine))
            .unwrap_err();
        assert!(matches!(err, StyleError::DuplicateEngine(name) if name == "chromatk"));
    }

    #[test]
    fn test_scheme_create_replaces() {
        let style = style();
        style
            .scheme_create("flatly", SchemeMode::Dark, [("primary", "#000")])
            .unwrap();
        let scheme = style.scheme_get("flatly").unwrap();
        assert!(scheme.is_dark());
        assert_eq!(style.scheme_names().len(), 4);

        let err = style
            .scheme_create("bad", SchemeMode::Light, [("primary", "#zz")])
            .unwrap_err();
        assert!(matches!(err, StyleError::Scheme(_)));
    }

    #[test]
    fn test_config_validation() {
        let config = StyleConfig::default().with_scheme("nope");
        assert!(matches!(Style::new(config), Err(StyleError::UnknownScheme(_))));
        let config = StyleConfig::default().with_engine("nope");
        assert!(matches!(Style::new(config), Err(StyleError::UnknownEngine(_))));
    }
}
