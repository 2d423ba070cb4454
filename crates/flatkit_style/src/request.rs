//! Style requests
//!
//! A [`StyleRequest`] is what a widget sends when it needs its style
//! realized: the native style name it is going to use plus the typed pieces
//! of its style keyword. The [`HandlerKey`] of a request selects the builder
//! of the current engine.

use crate::db::StyleValue;
use crate::error::{Result, StyleError};
use flatkit_theme::SemanticColor;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Widget classes that can be styled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetClass {
    /// The application window, styled natively
    Window,
    Button,
    Checkbutton,
    Radiobutton,
    Switch,
    Toolbutton,
    Menubutton,
    Label,
    Frame,
    Labelframe,
    Entry,
    Spinbox,
    Combobox,
    /// The drop-down list of a combobox
    Popdown,
    Scrollbar,
    Scale,
    Progressbar,
    Separator,
    Sizegrip,
    Panedwindow,
    Notebook,
    Treeview,
}

impl WidgetClass {
    pub const ALL: [WidgetClass; 22] = [
        WidgetClass::Window,
        WidgetClass::Button,
        WidgetClass::Checkbutton,
        WidgetClass::Radiobutton,
        WidgetClass::Switch,
        WidgetClass::Toolbutton,
        WidgetClass::Menubutton,
        WidgetClass::Label,
        WidgetClass::Frame,
        WidgetClass::Labelframe,
        WidgetClass::Entry,
        WidgetClass::Spinbox,
        WidgetClass::Combobox,
        WidgetClass::Popdown,
        WidgetClass::Scrollbar,
        WidgetClass::Scale,
        WidgetClass::Progressbar,
        WidgetClass::Separator,
        WidgetClass::Sizegrip,
        WidgetClass::Panedwindow,
        WidgetClass::Notebook,
        WidgetClass::Treeview,
    ];

    /// Keyword token of the class
    pub fn token(self) -> &'static str {
        match self {
            WidgetClass::Window => "tk",
            WidgetClass::Button => "button",
            WidgetClass::Checkbutton => "checkbutton",
            WidgetClass::Radiobutton => "radiobutton",
            WidgetClass::Switch => "switch",
            WidgetClass::Toolbutton => "toolbutton",
            WidgetClass::Menubutton => "menubutton",
            WidgetClass::Label => "label",
            WidgetClass::Frame => "frame",
            WidgetClass::Labelframe => "labelframe",
            WidgetClass::Entry => "entry",
            WidgetClass::Spinbox => "spinbox",
            WidgetClass::Combobox => "combobox",
            WidgetClass::Popdown => "popdown",
            WidgetClass::Scrollbar => "scrollbar",
            WidgetClass::Scale => "scale",
            WidgetClass::Progressbar => "progressbar",
            WidgetClass::Separator => "separator",
            WidgetClass::Sizegrip => "sizegrip",
            WidgetClass::Panedwindow => "panedwindow",
            WidgetClass::Notebook => "notebook",
            WidgetClass::Treeview => "treeview",
        }
    }

    /// Class name of the native style, the last segment of a style name
    pub fn native_name(self) -> &'static str {
        match self {
            WidgetClass::Window => "Tk",
            WidgetClass::Button => "TButton",
            WidgetClass::Checkbutton => "TCheckbutton",
            WidgetClass::Radiobutton => "TRadiobutton",
            WidgetClass::Switch => "TSwitch",
            WidgetClass::Toolbutton => "Toolbutton",
            WidgetClass::Menubutton => "TMenubutton",
            WidgetClass::Label => "TLabel",
            WidgetClass::Frame => "TFrame",
            WidgetClass::Labelframe => "TLabelframe",
            WidgetClass::Entry => "TEntry",
            WidgetClass::Spinbox => "TSpinbox",
            WidgetClass::Combobox => "TCombobox",
            WidgetClass::Popdown => "ComboboxPopdownFrame",
            WidgetClass::Scrollbar => "TScrollbar",
            WidgetClass::Scale => "TScale",
            WidgetClass::Progressbar => "TProgressbar",
            WidgetClass::Separator => "TSeparator",
            WidgetClass::Sizegrip => "TSizegrip",
            WidgetClass::Panedwindow => "TPanedwindow",
            WidgetClass::Notebook => "TNotebook",
            WidgetClass::Treeview => "Treeview",
        }
    }

    /// Whether the class is drawn by the style engine rather than natively
    pub fn is_themed(self) -> bool {
        self != WidgetClass::Window
    }

    /// Whether style names of the class carry an orientation segment
    pub fn is_orientable(self) -> bool {
        matches!(
            self,
            WidgetClass::Scrollbar
                | WidgetClass::Scale
                | WidgetClass::Progressbar
                | WidgetClass::Separator
                | WidgetClass::Panedwindow
        )
    }

    /// Classes whose styles are realized alongside this one
    pub fn hybrid_styles(self) -> &'static [WidgetClass] {
        match self {
            WidgetClass::Combobox => &[WidgetClass::Popdown],
            _ => &[],
        }
    }
}

impl FromStr for WidgetClass {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        WidgetClass::ALL
            .into_iter()
            .find(|c| c.token() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for WidgetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Style variant of a widget class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetVariant {
    Outline,
    Link,
}

impl WidgetVariant {
    pub const ALL: [WidgetVariant; 2] = [WidgetVariant::Outline, WidgetVariant::Link];

    pub fn token(self) -> &'static str {
        match self {
            WidgetVariant::Outline => "outline",
            WidgetVariant::Link => "link",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WidgetVariant::Outline => "Outline",
            WidgetVariant::Link => "Link",
        }
    }
}

impl FromStr for WidgetVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        WidgetVariant::ALL
            .into_iter()
            .find(|v| v.token() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for WidgetVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Widget orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orient {
    Horizontal,
    #[default]
    Vertical,
}

impl Orient {
    pub fn as_str(self) -> &'static str {
        match self {
            Orient::Horizontal => "horizontal",
            Orient::Vertical => "vertical",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Orient::Horizontal => "Horizontal",
            Orient::Vertical => "Vertical",
        }
    }
}

impl FromStr for Orient {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Orient::Horizontal),
            "vertical" => Ok(Orient::Vertical),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Orient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the builder of an engine: `[tk-][variant-]class`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerKey {
    /// Natively drawn widget
    pub native: bool,
    pub variant: Option<WidgetVariant>,
    pub class: WidgetClass,
}

impl HandlerKey {
    pub fn new(class: WidgetClass) -> Self {
        Self {
            native: !class.is_themed(),
            variant: None,
            class,
        }
    }

    pub fn with_variant(mut self, variant: WidgetVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Parse a handler keyword such as `outline-button` or `tk-tk`
    pub fn parse(keyword: &str) -> Result<Self> {
        let invalid = |token: &str| StyleError::InvalidKeyword {
            keyword: keyword.to_string(),
            token: token.to_string(),
        };

        let mut tokens: Vec<&str> = keyword.split('-').collect();
        let class_token = tokens.pop().unwrap_or_default();
        let class: WidgetClass = class_token.parse().map_err(|t: String| invalid(&t))?;

        let mut native = false;
        let mut variant = None;
        let mut rest = tokens.into_iter();
        match rest.next() {
            Some("tk") => {
                native = true;
                if let Some(token) = rest.next() {
                    variant = Some(token.parse().map_err(|t: String| invalid(&t))?);
                }
            }
            Some(token) => variant = Some(token.parse().map_err(|t: String| invalid(&t))?),
            None => {}
        }
        if let Some(extra) = rest.next() {
            return Err(invalid(extra));
        }

        Ok(Self {
            native: native || !class.is_themed(),
            variant,
            class,
        })
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.native {
            f.write_str("tk-")?;
        }
        if let Some(variant) = self.variant {
            write!(f, "{variant}-")?;
        }
        write!(f, "{}", self.class)
    }
}

/// Capitalize the first letter of a keyword token
fn title(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build a native style name such as `Primary.Outline.TButton`
///
/// The orientation segment is only added for orientable classes.
pub fn ttk_style_name(
    color: Option<SemanticColor>,
    variant: Option<WidgetVariant>,
    orient: Option<Orient>,
    class: WidgetClass,
) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(4);
    if let Some(color) = color {
        parts.push(title(color.name()));
    }
    if let Some(variant) = variant {
        parts.push(variant.title().to_string());
    }
    if let (true, Some(orient)) = (class.is_orientable(), orient) {
        parts.push(orient.title().to_string());
    }
    parts.push(class.native_name().to_string());
    parts.join(".")
}

/// Element name prefix for a style whose elements drop the `T` of the class
///
/// `Primary.TCheckbutton` becomes `Primary.Checkbutton`; a bare class name is
/// left alone.
pub fn element_prefix(ttkstyle: &str) -> String {
    match ttkstyle.rsplit_once('.') {
        Some((head, class)) if class.len() > 1 && class.starts_with('T') => {
            format!("{head}.{}", &class[1..])
        }
        _ => ttkstyle.to_string(),
    }
}

/// The widget side of a style request
///
/// Window builders configure the requesting widget directly.
pub trait WidgetHandle {
    fn widget_class(&self) -> WidgetClass;

    /// Set a native option of the widget
    fn set_option(&self, option: &str, value: StyleValue);

    /// Read a native option of the widget
    fn option(&self, option: &str) -> Option<StyleValue>;
}

/// A request to realize the style of one widget
#[derive(Clone)]
pub struct StyleRequest {
    /// Native style name to realize; empty for natively drawn widgets
    pub ttkstyle: String,
    pub color: Option<SemanticColor>,
    pub variant: Option<WidgetVariant>,
    pub class: WidgetClass,
    pub orient: Option<Orient>,
    /// Keyword the request was parsed from
    pub bootstyle: String,
    pub widget: Option<Rc<dyn WidgetHandle>>,
    /// Classes realized together with this one
    pub hybrid_styles: Vec<WidgetClass>,
}

impl StyleRequest {
    /// A request for `class` with its derived style name
    pub fn new(class: WidgetClass) -> Self {
        let ttkstyle = if class.is_themed() {
            class.native_name().to_string()
        } else {
            String::new()
        };
        Self {
            ttkstyle,
            color: None,
            variant: None,
            class,
            orient: None,
            bootstyle: String::new(),
            widget: None,
            hybrid_styles: class.hybrid_styles().to_vec(),
        }
    }

    pub fn color(mut self, color: SemanticColor) -> Self {
        self.color = Some(color);
        self.rename();
        self
    }

    pub fn variant(mut self, variant: WidgetVariant) -> Self {
        self.variant = Some(variant);
        self.rename();
        self
    }

    pub fn orient(mut self, orient: Orient) -> Self {
        self.orient = Some(orient);
        self.rename();
        self
    }

    pub fn widget(mut self, widget: Rc<dyn WidgetHandle>) -> Self {
        self.widget = Some(widget);
        self
    }

    pub fn is_native(&self) -> bool {
        self.ttkstyle.is_empty()
    }

    pub fn is_hybrid(&self) -> bool {
        !self.hybrid_styles.is_empty()
    }

    pub fn handler_key(&self) -> HandlerKey {
        HandlerKey {
            native: self.is_native(),
            variant: self.variant,
            class: self.class,
        }
    }

    /// The request for one of the hybrid sub-styles
    pub fn sub_request(&self, class: WidgetClass) -> StyleRequest {
        StyleRequest {
            ttkstyle: ttk_style_name(self.color, None, None, class),
            color: self.color,
            variant: None,
            class,
            orient: None,
            bootstyle: self.bootstyle.clone(),
            widget: self.widget.clone(),
            hybrid_styles: Vec::new(),
        }
    }

    fn rename(&mut self) {
        if self.class.is_themed() {
            self.ttkstyle = ttk_style_name(self.color, self.variant, self.orient, self.class);
        }
    }
}

impl fmt::Debug for StyleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleRequest")
            .field("ttkstyle", &self.ttkstyle)
            .field("color", &self.color)
            .field("variant", &self.variant)
            .field("class", &self.class)
            .field("orient", &self.orient)
            .field("bootstyle", &self.bootstyle)
            .field("widget", &self.widget.is_some())
            .field("hybrid_styles", &self.hybrid_styles)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_keywords() {
        assert_eq!(
            HandlerKey::parse("button").unwrap(),
            HandlerKey::new(WidgetClass::Button)
        );
        assert_eq!(
            HandlerKey::parse("outline-button").unwrap(),
            HandlerKey::new(WidgetClass::Button).with_variant(WidgetVariant::Outline)
        );
        let window = HandlerKey::parse("tk-tk").unwrap();
        assert!(window.native);
        assert_eq!(window.class, WidgetClass::Window);
        assert_eq!(window, HandlerKey::new(WidgetClass::Window));
        assert_eq!(window.to_string(), "tk-tk");
    }

    #[test]
    fn test_handler_keyword_typos_are_rejected() {
        for (keyword, token) in [
            ("buton", "buton"),
            ("outlined-button", "outlined"),
            ("tk-outline-link-button", "link"),
            ("", ""),
        ] {
            match HandlerKey::parse(keyword) {
                Err(StyleError::InvalidKeyword { token: t, .. }) => assert_eq!(t, token),
                other => panic!("{keyword:?} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn test_style_names() {
        let name = |c, v, o, k| ttk_style_name(c, v, o, k);
        assert_eq!(
            name(Some(SemanticColor::Primary), None, None, WidgetClass::Button),
            "Primary.TButton"
        );
        assert_eq!(
            name(
                Some(SemanticColor::Danger),
                Some(WidgetVariant::Outline),
                None,
                WidgetClass::Button
            ),
            "Danger.Outline.TButton"
        );
        assert_eq!(
            name(None, None, Some(Orient::Horizontal), WidgetClass::Scrollbar),
            "Horizontal.TScrollbar"
        );
        assert_eq!(
            name(None, None, Some(Orient::Horizontal), WidgetClass::Button),
            "TButton"
        );
        assert_eq!(name(None, None, None, WidgetClass::Treeview), "Treeview");
    }

    #[test]
    fn test_element_prefix() {
        assert_eq!(element_prefix("Primary.TCheckbutton"), "Primary.Checkbutton");
        assert_eq!(
            element_prefix("Info.Vertical.TScrollbar"),
            "Info.Vertical.Scrollbar"
        );
        assert_eq!(element_prefix("TCheckbutton"), "TCheckbutton");
    }

    #[test]
    fn test_request_naming() {
        let request = StyleRequest::new(WidgetClass::Scrollbar)
            .color(SemanticColor::Info)
            .orient(Orient::Vertical);
        assert_eq!(request.ttkstyle, "Info.Vertical.TScrollbar");
        assert!(!request.is_native());

        let window = StyleRequest::new(WidgetClass::Window);
        assert!(window.is_native());
        assert_eq!(window.handler_key().to_string(), "tk-tk");
    }

    #[test]
    fn test_combobox_is_hybrid() {
        let request = StyleRequest::new(WidgetClass::Combobox).color(SemanticColor::Success);
        assert!(request.is_hybrid());
        let popdown = request.sub_request(WidgetClass::Popdown);
        assert_eq!(popdown.ttkstyle, "Success.ComboboxPopdownFrame");
        assert_eq!(popdown.handler_key(), HandlerKey::new(WidgetClass::Popdown));
        assert!(!popdown.is_hybrid());
    }
}
