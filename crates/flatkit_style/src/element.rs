//! Image elements and layout trees
//!
//! An *element* is a named piece of widget chrome. Image elements pick one
//! of several images depending on the widget state: the state map is scanned
//! in order and the first matching spec wins, so specific specs such as
//! `"pressed !disabled"` must come before general ones such as `"disabled"`.
//!
//! A *layout* arranges elements into a tree. Each node packs against one
//! side of its parcel, optionally expands, and sticks to some of its edges.

use crate::db::StyleDb;
use crate::error::Result;
use flatkit_core::{StateSpec, WidgetState};
use flatkit_paint::ImageHandle;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Edges of its parcel an element stretches to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sticky {
    bits: u8,
}

impl Sticky {
    pub const NONE: Sticky = Sticky { bits: 0 };
    pub const N: Sticky = Sticky { bits: 1 };
    pub const S: Sticky = Sticky { bits: 2 };
    pub const E: Sticky = Sticky { bits: 4 };
    pub const W: Sticky = Sticky { bits: 8 };
    pub const NS: Sticky = Sticky { bits: 1 | 2 };
    pub const EW: Sticky = Sticky { bits: 4 | 8 };
    pub const NSEW: Sticky = Sticky { bits: 1 | 2 | 4 | 8 };

    pub const fn contains(&self, other: Sticky) -> bool {
        self.bits & other.bits == other.bits
    }
}

impl fmt::Display for Sticky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, c) in [(Self::N, 'n'), (Self::S, 's'), (Self::E, 'e'), (Self::W, 'w')] {
            if self.contains(flag) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Side of the parcel a layout node is packed against
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }
}

/// Per-side pixel amounts, used for element borders and padding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Edges {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Edges {
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(v: u32) -> Self {
        Self::new(v, v, v, v)
    }

    /// `horizontal` on the left and right, `vertical` on the top and bottom
    pub const fn symmetric(horizontal: u32, vertical: u32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }
}

impl From<u32> for Edges {
    fn from(v: u32) -> Self {
        Edges::uniform(v)
    }
}

impl From<(u32, u32)> for Edges {
    fn from((horizontal, vertical): (u32, u32)) -> Self {
        Edges::symmetric(horizontal, vertical)
    }
}

impl FromStr for Edges {
    type Err = std::num::ParseIntError;

    /// One to four space separated values: `left [top [right [bottom]]]`,
    /// missing values repeat the opposite side
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(str::parse)
            .collect::<std::result::Result<SmallVec<[u32; 4]>, _>>()?;
        Ok(match values.as_slice() {
            [] => Edges::default(),
            [v] => Edges::uniform(*v),
            [h, v] => Edges::symmetric(*h, *v),
            [l, t, r] => Edges::new(*l, *t, *r, *t),
            [l, t, r, b, ..] => Edges::new(*l, *t, *r, *b),
        })
    }
}

impl fmt::Display for Edges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.left, self.top, self.right, self.bottom)
    }
}

/// An element drawn with state-dependent images
#[derive(Clone, Debug)]
pub struct ImageElement {
    /// Image used when no state spec matches
    pub image: ImageHandle,
    /// Ordered state map, first match wins
    pub states: Vec<(StateSpec, ImageHandle)>,
    pub sticky: Sticky,
    /// Border that is not stretched when the image is resized
    pub border: Edges,
    pub padding: Edges,
    /// Minimum width, defaults to the image width
    pub width: Option<u32>,
    /// Minimum height, defaults to the image height
    pub height: Option<u32>,
}

impl ImageElement {
    /// The image shown in `state`
    pub fn image_for(&self, state: WidgetState) -> &ImageHandle {
        self.states
            .iter()
            .find(|(spec, _)| spec.matches(state))
            .map(|(_, image)| image)
            .unwrap_or(&self.image)
    }

    /// Every image of the element, the default image first
    pub fn images(&self) -> impl Iterator<Item = &ImageHandle> {
        std::iter::once(&self.image).chain(self.states.iter().map(|(_, image)| image))
    }
}

/// Builder for an [`ImageElement`]
pub struct ElementImageBuilder {
    name: String,
    image: ImageHandle,
    states: Vec<(String, ImageHandle)>,
    sticky: Sticky,
    border: Edges,
    padding: Edges,
    width: Option<u32>,
    height: Option<u32>,
}

impl ElementImageBuilder {
    pub fn new(name: impl Into<String>, image: ImageHandle) -> Self {
        Self {
            name: name.into(),
            image,
            states: Vec::new(),
            sticky: Sticky::NONE,
            border: Edges::default(),
            padding: Edges::default(),
            width: None,
            height: None,
        }
    }

    pub fn sticky(mut self, sticky: Sticky) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn border(mut self, border: impl Into<Edges>) -> Self {
        self.border = border.into();
        self
    }

    pub fn padding(mut self, padding: impl Into<Edges>) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Append a state map entry
    pub fn map(mut self, state: &str, image: ImageHandle) -> Self {
        self.states.push((state.to_string(), image));
        self
    }

    /// Parse the state map and create the element in the current theme
    pub fn build(self, db: &mut StyleDb) -> Result<()> {
        let states = self
            .states
            .into_iter()
            .map(|(spec, image)| -> Result<(StateSpec, ImageHandle)> {
                Ok((spec.parse()?, image))
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::trace!(element = %self.name, states = states.len(), "creating image element");
        db.element_create(
            &self.name,
            ImageElement {
                image: self.image,
                states,
                sticky: self.sticky,
                border: self.border,
                padding: self.padding,
                width: self.width,
                height: self.height,
            },
        )
    }
}

/// A node of a layout tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementLayout {
    pub element: String,
    pub side: Option<Side>,
    pub sticky: Option<Sticky>,
    pub expand: bool,
    pub children: Vec<ElementLayout>,
}

impl ElementLayout {
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            side: None,
            sticky: None,
            expand: false,
            children: Vec::new(),
        }
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn sticky(mut self, sticky: Sticky) -> Self {
        self.sticky = Some(sticky);
        self
    }

    pub fn expand(mut self) -> Self {
        self.expand = true;
        self
    }

    pub fn child(mut self, child: ElementLayout) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first iteration over this node and its descendants
    pub fn walk(&self) -> Box<dyn Iterator<Item = &ElementLayout> + '_> {
        Box::new(std::iter::once(self).chain(self.children.iter().flat_map(|c| c.walk())))
    }
}

/// Commits a layout tree for one style
pub struct ElementLayoutBuilder {
    style: String,
}

impl ElementLayoutBuilder {
    pub fn new(style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
        }
    }

    pub fn build(self, db: &mut StyleDb, root: ElementLayout) -> Result<()> {
        tracing::trace!(style = %self.style, element = %root.element, "setting layout");
        db.layout(&self.style, vec![root])
    }
}
