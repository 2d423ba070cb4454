//! Theme-aware styling for widgets
//!
//! [`Styling`] is what a widget holds to take part in theming. It keeps the
//! widget's style keyword and options, asks the registry for the widget's
//! native style and asks again every time the theme changes.

use crate::error::{Result, WidgetError};
use crate::keyword::{Bootstyle, StyleKeyword};
use flatkit_core::Subscription;
use flatkit_style::{
    Orient, Style, StyleError, StyleRequest, StyleValue, WidgetClass, WidgetHandle,
    ROUTE_STYLE_HANDLER, THEME_CHANGED,
};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct State {
    bootstyle: Bootstyle,
    ttkstyle: String,
    options: IndexMap<String, StyleValue>,
}

/// Styling capability of one widget
///
/// Subscribed to `theme-changed` for as long as it lives.
pub struct Styling {
    class: WidgetClass,
    orient: Option<Orient>,
    style: Style,
    me: Weak<Styling>,
    state: RefCell<State>,
    subscription: Option<Subscription<StyleRequest, StyleError>>,
}

impl Styling {
    /// Style a widget of `class` with `bootstyle`
    ///
    /// The style is realized right away when a theme is in use, and on the
    /// first theme change otherwise.
    pub fn new(
        style: &Style,
        class: WidgetClass,
        bootstyle: &str,
        orient: Option<Orient>,
    ) -> Result<Rc<Self>> {
        let bootstyle = Bootstyle::parse(bootstyle)?;
        let styling = Rc::new_cyclic(|me: &Weak<Styling>| {
            let weak = me.clone();
            let subscription = style.bus().subscribe(THEME_CHANGED, move |_| {
                match weak.upgrade() {
                    Some(styling) => styling.apply(),
                    None => Ok(()),
                }
            });
            Styling {
                class,
                orient: orient.filter(|_| class.is_orientable()),
                style: style.clone(),
                me: me.clone(),
                state: RefCell::new(State {
                    bootstyle,
                    ..State::default()
                }),
                subscription: Some(subscription),
            }
        });
        styling.apply()?;
        Ok(styling)
    }

    pub fn class(&self) -> WidgetClass {
        self.class
    }

    pub fn orient(&self) -> Option<Orient> {
        self.orient
    }

    /// The style keyword or native style name in use
    pub fn bootstyle(&self) -> String {
        self.state.borrow().bootstyle.to_string()
    }

    /// Change the style keyword and route it
    ///
    /// The previous keyword and style name are kept when routing fails.
    pub fn set_bootstyle(&self, bootstyle: &str) -> Result<()> {
        let parsed = Bootstyle::parse(bootstyle)?;
        let (previous, previous_ttkstyle) = {
            let mut state = self.state.borrow_mut();
            (
                std::mem::replace(&mut state.bootstyle, parsed),
                state.ttkstyle.clone(),
            )
        };
        if let Err(err) = self.apply() {
            let mut state = self.state.borrow_mut();
            state.bootstyle = previous;
            state.ttkstyle = previous_ttkstyle;
            return Err(err.into());
        }
        Ok(())
    }

    /// Native style name the widget is drawn with
    pub fn ttkstyle(&self) -> String {
        self.state.borrow().ttkstyle.clone()
    }

    /// Set a widget option
    ///
    /// `bootstyle` and `style` change the widget's style and route it again.
    pub fn configure(&self, option: &str, value: impl Into<StyleValue>) -> Result<()> {
        let value = value.into();
        match option {
            "bootstyle" | "style" => {
                let text = value.as_text().ok_or_else(|| WidgetError::InvalidOption {
                    option: option.to_string(),
                    value: value.to_string(),
                })?;
                self.set_bootstyle(text)
            }
            _ => {
                self.set_option(option, value);
                Ok(())
            }
        }
    }

    /// Read a widget option
    pub fn cget(&self, option: &str) -> Option<StyleValue> {
        match option {
            "bootstyle" => Some(StyleValue::Text(self.bootstyle())),
            "style" => Some(StyleValue::Text(self.ttkstyle())),
            _ => self.option(option),
        }
    }

    /// Resolve the native style name and route the request
    fn apply(&self) -> std::result::Result<(), StyleError> {
        let keyword: StyleKeyword = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            match &state.bootstyle {
                Bootstyle::Native(name) => {
                    state.ttkstyle = name.clone();
                    return Ok(());
                }
                Bootstyle::Keyword(keyword) => {
                    let keyword = *keyword;
                    state.ttkstyle = keyword.ttk_style_name(self.class, self.orient);
                    keyword
                }
            }
        };

        if self.style.theme_current().is_none() {
            tracing::trace!(class = %self.class, "no theme in use, styling deferred");
            return Ok(());
        }
        let mut request = keyword.request(self.class, self.orient);
        if let Some(me) = self.me.upgrade() {
            request = request.widget(me);
        }
        tracing::trace!(class = %self.class, style = %request.ttkstyle, "routing style");
        self.style.bus().dispatch(ROUTE_STYLE_HANDLER, Some(&request))
    }
}

impl WidgetHandle for Styling {
    fn widget_class(&self) -> WidgetClass {
        self.class
    }

    fn set_option(&self, option: &str, value: StyleValue) {
        self.state
            .borrow_mut()
            .options
            .insert(option.to_string(), value);
    }

    fn option(&self, option: &str) -> Option<StyleValue> {
        self.state.borrow().options.get(option).cloned()
    }
}

impl Drop for Styling {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl fmt::Debug for Styling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Styling")
            .field("class", &self.class)
            .field("orient", &self.orient)
            .field("bootstyle", &state.bootstyle)
            .field("ttkstyle", &state.ttkstyle)
            .finish()
    }
}
