use flatkit_core::WidgetState;
use flatkit_style::{Orient, Style, StyleConfig, StyleValue, THEME_CHANGED};
use flatkit_theme::{SchemeMode, SemanticColor};
use flatkit_widgets::{
    Button, Checkbutton, Combobox, Progressbar, Scrollbar, StyleKeyword, Switch, Window,
};
use proptest::prelude::*;

fn style() -> Style {
    Style::new(StyleConfig::default()).unwrap()
}

#[test]
fn test_window_follows_theme_background() {
    let style = style();
    style.theme_use("flatly").unwrap();
    let window = Window::new(&style).unwrap();
    assert_eq!(window.ttkstyle(), "");

    let flatly = style.scheme_get("flatly").unwrap();
    assert_eq!(
        window.cget("background"),
        Some(StyleValue::Color(flatly.color(SemanticColor::Background)))
    );

    style.theme_use("superhero").unwrap();
    let superhero = style.scheme_get("superhero").unwrap();
    assert_eq!(
        window.cget("background"),
        Some(StyleValue::Color(superhero.color(SemanticColor::Background)))
    );
}

#[test]
fn test_keyword_widget_on_custom_dark_scheme() {
    let style = style();
    style
        .scheme_create(
            "test",
            SchemeMode::Dark,
            [("background", "#000000"), ("foreground", "#ffffff")],
        )
        .unwrap();
    style.theme_use("test").unwrap();

    let button = Button::new(&style, "primary-button").unwrap();
    assert_eq!(button.ttkstyle(), "Primary.TButton");
    assert!(style.is_realized("Primary.TButton"));

    let scheme = style.scheme_get("test").unwrap();
    assert_eq!(
        style.lookup("Primary.TButton", "foreground", WidgetState::NONE),
        Some(StyleValue::Color(scheme.get_foreground(SemanticColor::Primary)))
    );
}

#[test]
fn test_keywords_ignore_case() {
    let style = style();
    style.theme_use("flatly").unwrap();

    let button = Button::new(&style, "Primary").unwrap();
    assert_eq!(button.ttkstyle(), "Primary.TButton");
    assert_eq!(button.bootstyle(), "primary");
    assert!(style.is_realized("Primary.TButton"));

    let outline = Button::new(&style, "PRIMARY-OUTLINE-BUTTON").unwrap();
    assert_eq!(outline.ttkstyle(), "Primary.Outline.TButton");
    assert!(style.is_realized("Primary.Outline.TButton"));

    // dotted and bare class names are still native
    let native = Button::new(&style, "TButton").unwrap();
    assert_eq!(native.ttkstyle(), "TButton");
    assert!(!style.is_realized("TButton"));
}

#[test]
fn test_every_widget_restyles_on_theme_change() {
    let style = style();
    style.theme_use("cosmo").unwrap();

    let button = Button::new(&style, "warning").unwrap();
    let check = Checkbutton::new(&style, "info").unwrap();
    let switch = Switch::new(&style, "success").unwrap();
    let scrollbar = Scrollbar::with_orient(&style, "", Orient::Horizontal).unwrap();
    assert_eq!(switch.ttkstyle(), "Success.TSwitch");
    assert_eq!(scrollbar.ttkstyle(), "Horizontal.TScrollbar");

    style.theme_use("minty").unwrap();
    let mut realized = style.realized_styles();
    realized.sort();
    assert_eq!(
        realized,
        [
            "Horizontal.TScrollbar",
            "Info.TCheckbutton",
            "Success.TSwitch",
            "Warning.TButton"
        ]
    );
    assert_eq!(style.bus().subscriber_count(THEME_CHANGED), 4);

    drop((button, check, switch, scrollbar));
    assert_eq!(style.bus().subscriber_count(THEME_CHANGED), 0);
}

#[test]
fn test_clones_share_styling() {
    let style = style();
    style.theme_use("flatly").unwrap();
    let button = Button::new(&style, "").unwrap();
    let other = button.clone();
    drop(button);
    assert_eq!(style.bus().subscriber_count(THEME_CHANGED), 1);

    other.set_bootstyle("secondary-link").unwrap();
    assert_eq!(other.ttkstyle(), "Secondary.Link.TButton");
    let info = style.scheme_get("flatly").unwrap().color(SemanticColor::Info);
    assert_eq!(
        style.lookup("Secondary.Link.TButton", "foreground", WidgetState::HOVER),
        Some(StyleValue::Color(info))
    );
}

#[test]
fn test_combobox_styles_its_list() {
    let style = style();
    style.theme_use("superhero").unwrap();
    let combo = Combobox::new(&style, "danger").unwrap();
    assert_eq!(combo.ttkstyle(), "Danger.TCombobox");
    assert!(style.is_realized("Danger.ComboboxPopdownFrame"));

    let danger = style.scheme_get("superhero").unwrap().color(SemanticColor::Danger);
    style.with_db(|db| {
        assert_eq!(
            db.option_get("*TCombobox*Listbox.selectBackground"),
            Some(&StyleValue::Color(danger))
        );
    });
}

#[test]
fn test_orientation_is_part_of_the_name() {
    let style = style();
    style.theme_use("flatly").unwrap();
    let bar = Progressbar::new(&style, "success").unwrap();
    assert_eq!(bar.ttkstyle(), "Success.Horizontal.TProgressbar");
    assert!(style.element("Success.Horizontal.Progressbar.pbar").is_some());

    let vertical = Scrollbar::new(&style, "").unwrap();
    assert_eq!(vertical.orient(), Some(Orient::Vertical));
    assert!(style.element("Vertical.Scrollbar.thumb").is_some());
}

#[test]
fn test_bootstyle_engine_widgets() {
    let style = style();
    style.theme_use("bootstyle").unwrap();
    let button = Button::new(&style, "primary-outline").unwrap();
    let check = Checkbutton::new(&style, "primary").unwrap();
    assert!(style.is_realized(&button.ttkstyle()));
    // no checkbutton builder in this engine
    assert!(!style.is_realized(&check.ttkstyle()));
    assert_eq!(style.asset_count(), 0);
}

proptest! {
    #[test]
    fn prop_keyword_display_round_trips(
        color in proptest::option::of(0usize..8),
        variant in proptest::option::of(0usize..2),
    ) {
        let colors = ["primary", "secondary", "success", "info", "warning", "danger", "light", "dark"];
        let variants = ["outline", "link"];
        let keyword: Vec<&str> = color
            .map(|c| colors[c])
            .into_iter()
            .chain(variant.map(|v| variants[v]))
            .collect();
        let keyword = keyword.join("-");

        let parsed = StyleKeyword::parse(&keyword).unwrap();
        prop_assert_eq!(parsed.to_string(), keyword.clone());
        prop_assert_eq!(StyleKeyword::parse(&parsed.to_string()).unwrap(), parsed);
    }
}
