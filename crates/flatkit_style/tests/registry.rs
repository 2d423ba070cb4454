use flatkit_core::{Rgb, WidgetState};
use flatkit_style::{
    BuildContext, BuildOptions, HandlerTable, NamedFont, Orient, Scale, Style, StyleConfig, StyleError,
    StyleRequest, StyleValue, ThemeEngine, WidgetClass, WidgetVariant, ROUTE_STYLE_HANDLER,
    THEME_CHANGED,
};
use flatkit_theme::{SchemeMode, SemanticColor};
use std::cell::Cell;
use std::rc::Rc;

/// Engine counting how often its button builder runs
struct Counting {
    calls: Rc<Cell<u32>>,
}

impl ThemeEngine for Counting {
    fn name(&self) -> &str {
        "counting"
    }

    fn base(&self) -> &str {
        "clam"
    }

    fn register_keywords(&self, handlers: &mut HandlerTable) -> flatkit_style::Result<()> {
        let calls = self.calls.clone();
        handlers.handler_set("button", move |ctx: &mut BuildContext, opts: &BuildOptions| {
            calls.set(calls.get() + 1);
            ctx.db
                .configure(&opts.ttkstyle, [("relief", StyleValue::from("flat"))])
        })
    }

    fn create_named_fonts(&self, _scale: &Scale) -> Vec<NamedFont> {
        vec![NamedFont::new("TkBody", "Inter", -14)]
    }
}

fn registry() -> Style {
    Style::new(StyleConfig::default()).unwrap()
}

#[test]
fn test_custom_scheme_end_to_end() {
    let style = registry();
    style
        .scheme_create(
            "test",
            SchemeMode::Dark,
            [("background", "#000000"), ("foreground", "#ffffff")],
        )
        .unwrap();
    style.theme_use("test-chromatk").unwrap();

    let request = StyleRequest::new(WidgetClass::Button).color(SemanticColor::Primary);
    assert_eq!(request.ttkstyle, "Primary.TButton");
    style.route_style(&request).unwrap();

    let scheme = style.scheme_get("test").unwrap();
    let foreground = style.lookup("Primary.TButton", "foreground", WidgetState::NONE);
    assert_eq!(
        foreground,
        Some(StyleValue::Color(scheme.get_foreground(SemanticColor::Primary)))
    );
    assert_eq!(foreground, Some(StyleValue::Color(Rgb::WHITE)));
    assert!(style.element("Primary.TButton.button").is_some());
}

#[test]
fn test_realized_styles_are_built_once() {
    let style = registry();
    let calls = Rc::new(Cell::new(0));
    style
        .theme_engine_add(Box::new(Counting {
            calls: calls.clone(),
        }))
        .unwrap();
    style.theme_use("flatly-counting").unwrap();

    let request = StyleRequest::new(WidgetClass::Button).color(SemanticColor::Warning);
    style.route_style(&request).unwrap();
    style.route_style(&request).unwrap();
    assert_eq!(calls.get(), 1);

    // the same style for another scheme is built again
    style.theme_use("minty-counting").unwrap();
    style.route_style(&request).unwrap();
    assert_eq!(calls.get(), 2);

    style.theme_use("flatly-counting").unwrap();
    style.route_style(&request).unwrap();
    assert_eq!(calls.get(), 2);

    // unregistered handlers are skipped
    let outline = StyleRequest::new(WidgetClass::Button).variant(WidgetVariant::Outline);
    style.route_style(&outline).unwrap();
    assert!(!style.is_realized("Outline.TButton"));
}

#[test]
fn test_reusing_the_current_theme() {
    let style = registry();
    let calls = Rc::new(Cell::new(0));
    style
        .theme_engine_add(Box::new(Counting {
            calls: calls.clone(),
        }))
        .unwrap();

    let changes = Rc::new(Cell::new(0));
    let seen = changes.clone();
    let bus = style.bus().clone();
    let _sub = style.bus().subscribe(THEME_CHANGED, move |_| {
        seen.set(seen.get() + 1);
        let request = StyleRequest::new(WidgetClass::Button).color(SemanticColor::Info);
        bus.dispatch(ROUTE_STYLE_HANDLER, Some(&request))
    });

    style.theme_use("flatly-counting").unwrap();
    assert_eq!(changes.get(), 1);
    assert_eq!(calls.get(), 1);
    let themes = style.theme_names().len();

    style.theme_use("flatly-counting").unwrap();
    assert_eq!(changes.get(), 2);
    assert_eq!(calls.get(), 1);
    assert_eq!(style.theme_names().len(), themes);
    assert_eq!(style.realized_styles(), ["Info.TButton"]);
}

#[test]
fn test_popdown_options_follow_last_routed_combobox() {
    let style = registry();
    style.theme_use("flatly").unwrap();
    let scheme = style.scheme_get("flatly").unwrap();
    let select_background = || {
        style.with_db(|db| db.option_get("*TCombobox*Listbox.selectBackground").cloned())
    };

    let danger = StyleRequest::new(WidgetClass::Combobox).color(SemanticColor::Danger);
    let info = StyleRequest::new(WidgetClass::Combobox).color(SemanticColor::Info);
    style.route_style(&danger).unwrap();
    style.route_style(&info).unwrap();
    assert_eq!(
        select_background(),
        Some(StyleValue::Color(scheme.color(SemanticColor::Info)))
    );

    // both popdowns are realized, routing danger again still applies it
    assert!(style.is_realized("Danger.ComboboxPopdownFrame"));
    style.route_style(&danger).unwrap();
    assert_eq!(
        select_background(),
        Some(StyleValue::Color(scheme.color(SemanticColor::Danger)))
    );
}

#[test]
fn test_default_engine_matches_composite_name() {
    let a = registry();
    let b = registry();
    a.theme_use("flatly").unwrap();
    b.theme_use("flatly-chromatk").unwrap();

    let request = StyleRequest::new(WidgetClass::Checkbutton).color(SemanticColor::Success);
    a.route_style(&request).unwrap();
    b.route_style(&request).unwrap();

    let (ea, eb) = (
        a.element("Success.Checkbutton.indicator").unwrap(),
        b.element("Success.Checkbutton.indicator").unwrap(),
    );
    assert_eq!(ea.states.len(), eb.states.len());
    assert_eq!(ea.image.pixels(), eb.image.pixels());
    assert_eq!(a.layout("Success.TCheckbutton"), b.layout("Success.TCheckbutton"));
}

#[test]
fn test_theme_changed_subscribers_route_again() {
    let style = registry();
    let bus = style.bus().clone();
    let changes = Rc::new(Cell::new(0));
    let seen = changes.clone();
    let sub = style.bus().subscribe(THEME_CHANGED, move |_| {
        seen.set(seen.get() + 1);
        let request = StyleRequest::new(WidgetClass::Scrollbar).orient(Orient::Vertical);
        bus.dispatch(ROUTE_STYLE_HANDLER, Some(&request))
    });

    style.theme_use("cosmo").unwrap();
    assert_eq!(changes.get(), 1);
    assert!(style.is_realized("Vertical.TScrollbar"));

    style.theme_use("superhero").unwrap();
    assert_eq!(changes.get(), 2);
    assert!(style.is_realized("Vertical.TScrollbar"));

    assert!(sub.unsubscribe());
    style.theme_use("minty").unwrap();
    assert_eq!(changes.get(), 2);
}

#[test]
fn test_subscriber_error_surfaces_from_theme_use() {
    let style = registry();
    let _sub = style.bus().subscribe(THEME_CHANGED, |_| {
        Err(StyleError::MissingWidget("window".to_string()))
    });
    let err = style.theme_use("flatly").unwrap_err();
    assert!(matches!(err, StyleError::MissingWidget(_)));
    // the theme is active even though a subscriber failed
    assert_eq!(style.theme_current().unwrap().name(), "flatly-chromatk");
}

#[test]
fn test_independent_registries() {
    let a = registry();
    let b = registry();
    a.theme_use("superhero").unwrap();
    assert!(b.theme_current().is_none());
    a.route_style(&StyleRequest::new(WidgetClass::Spinbox)).unwrap();
    assert!(a.is_realized("TSpinbox"));
    assert!(b.realized_styles().is_empty());
}

#[test]
fn test_scheme_file() {
    let path = std::env::temp_dir().join(format!("flatkit-schemes-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r##"
[[schemes]]
name = "midnight"
mode = "dark"
primary = "#375a7f"
background = "#222"
foreground = "#fff"
"##,
    )
    .unwrap();

    let style = registry();
    let loaded = style.load_scheme_file(&path);
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded.unwrap(), 1);

    style.theme_use("midnight-bootstyle").unwrap();
    assert!(style.scheme_get("midnight").unwrap().is_dark());

    let missing = style.load_scheme_file(&path).unwrap_err();
    assert!(matches!(missing, StyleError::Scheme(_)));
}
