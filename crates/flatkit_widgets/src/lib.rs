//! flatkit widgets
//!
//! Widgets name their look with a style keyword such as `primary`,
//! `danger-outline` or `success-outline-toolbutton`. The keyword is parsed
//! into a [`StyleKeyword`], turned into a native style name and routed to
//! the [`Style`](flatkit_style::Style) registry, which builds the style for
//! the current theme. Widgets follow every later theme change on their own.
//!
//! # Example
//!
//! ```rust
//! use flatkit_style::{Style, StyleConfig};
//! use flatkit_widgets::{Button, Window};
//!
//! let style = Style::new(StyleConfig::default())?;
//! style.theme_use("superhero")?;
//!
//! let window = Window::new(&style)?;
//! let button = Button::new(&style, "primary-outline")?;
//! assert_eq!(button.ttkstyle(), "Primary.Outline.TButton");
//!
//! button.configure("bootstyle", "danger")?;
//! assert_eq!(button.ttkstyle(), "Danger.TButton");
//! assert!(window.cget("background").is_some());
//! # Ok::<(), flatkit_widgets::WidgetError>(())
//! ```

pub mod error;
pub mod keyword;
pub mod styling;
pub mod widgets;

pub use error::{Result, WidgetError};
pub use keyword::{is_native_name, Bootstyle, KeywordError, StyleKeyword};
pub use styling::Styling;
pub use widgets::{
    Button, Checkbutton, Combobox, Entry, Frame, Label, Labelframe, Menubutton, Notebook,
    Panedwindow, Progressbar, Radiobutton, Scale, Scrollbar, Separator, Sizegrip, Spinbox, Switch,
    Treeview, Window,
};
