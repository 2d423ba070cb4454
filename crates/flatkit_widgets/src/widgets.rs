//! Themed widget wrappers
//!
//! Each wrapper owns a [`Styling`] and dereferences to it, so
//! `button.configure("bootstyle", "danger")` and `button.ttkstyle()` work on
//! every widget. Dropping the last handle of a widget stops its theme
//! updates.

use crate::error::Result;
use crate::styling::Styling;
use flatkit_style::{Orient, Style, WidgetClass};
use std::ops::Deref;
use std::rc::Rc;

macro_rules! styled_widget {
    ($(#[$meta:meta])* $name:ident => $class:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            styling: Rc<Styling>,
        }

        impl $name {
            pub fn new(style: &Style, bootstyle: &str) -> Result<Self> {
                Ok(Self {
                    styling: Styling::new(style, $class, bootstyle, None)?,
                })
            }

            pub fn styling(&self) -> &Rc<Styling> {
                &self.styling
            }
        }

        impl Deref for $name {
            type Target = Styling;

            fn deref(&self) -> &Styling {
                &self.styling
            }
        }
    };
    ($(#[$meta:meta])* $name:ident => $class:expr, orient = $orient:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            styling: Rc<Styling>,
        }

        impl $name {
            pub fn new(style: &Style, bootstyle: &str) -> Result<Self> {
                Self::with_orient(style, bootstyle, $orient)
            }

            pub fn with_orient(style: &Style, bootstyle: &str, orient: Orient) -> Result<Self> {
                Ok(Self {
                    styling: Styling::new(style, $class, bootstyle, Some(orient))?,
                })
            }

            pub fn styling(&self) -> &Rc<Styling> {
                &self.styling
            }
        }

        impl Deref for $name {
            type Target = Styling;

            fn deref(&self) -> &Styling {
                &self.styling
            }
        }
    };
}

styled_widget!(Button => WidgetClass::Button);
styled_widget!(Checkbutton => WidgetClass::Checkbutton);
styled_widget!(Radiobutton => WidgetClass::Radiobutton);
styled_widget!(
    /// A checkbutton drawn as a sliding switch
    Switch => WidgetClass::Switch
);
styled_widget!(Menubutton => WidgetClass::Menubutton);
styled_widget!(Label => WidgetClass::Label);
styled_widget!(Frame => WidgetClass::Frame);
styled_widget!(Labelframe => WidgetClass::Labelframe);
styled_widget!(Entry => WidgetClass::Entry);
styled_widget!(Spinbox => WidgetClass::Spinbox);
styled_widget!(
    /// Entry with a drop-down list; its list is styled along with it
    Combobox => WidgetClass::Combobox
);
styled_widget!(Sizegrip => WidgetClass::Sizegrip);
styled_widget!(Notebook => WidgetClass::Notebook);
styled_widget!(Treeview => WidgetClass::Treeview);
styled_widget!(Scrollbar => WidgetClass::Scrollbar, orient = Orient::Vertical);
styled_widget!(Progressbar => WidgetClass::Progressbar, orient = Orient::Horizontal);
styled_widget!(Scale => WidgetClass::Scale, orient = Orient::Horizontal);
styled_widget!(Separator => WidgetClass::Separator, orient = Orient::Horizontal);
styled_widget!(Panedwindow => WidgetClass::Panedwindow, orient = Orient::Vertical);

/// The application window
///
/// Drawn natively; themes set its background directly.
#[derive(Clone, Debug)]
pub struct Window {
    styling: Rc<Styling>,
}

impl Window {
    pub fn new(style: &Style) -> Result<Self> {
        Ok(Self {
            styling: Styling::new(style, WidgetClass::Window, "", None)?,
        })
    }

    pub fn styling(&self) -> &Rc<Styling> {
        &self.styling
    }
}

impl Deref for Window {
    type Target = Styling;

    fn deref(&self) -> &Styling {
        &self.styling
    }
}
