//! Color schemes

use crate::shades::Shades;
use flatkit_core::{ColorError, Rgb};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Default for every color left out of a scheme definition
pub const DEFAULT_COLOR: Rgb = Rgb::from_hex(0xdddddd);

/// Default for an omitted foreground
pub const DEFAULT_FOREGROUND: Rgb = Rgb::from_hex(0x111111);

/// Scheme-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemeError {
    /// Not one of the ten semantic color names
    #[error("{0:?} is not a scheme color")]
    UnknownColor(String),

    /// Neither `light` nor `dark`
    #[error("{0:?} is not a scheme mode, expected \"light\" or \"dark\"")]
    UnknownMode(String),

    /// A color value that is not a hex color
    #[error("invalid value for color {color}: {source}")]
    InvalidHex {
        color: SemanticColor,
        #[source]
        source: ColorError,
    },

    /// A scheme definition that could not be deserialized
    #[error("invalid scheme definition: {0}")]
    Parse(String),

    /// A scheme file that could not be read
    #[error("failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },
}

/// Light or dark scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeMode {
    #[default]
    Light,
    Dark,
}

impl SchemeMode {
    pub fn is_dark(self) -> bool {
        self == SchemeMode::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchemeMode::Light => "light",
            SchemeMode::Dark => "dark",
        }
    }
}

impl FromStr for SchemeMode {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(SchemeMode::Light),
            "dark" => Ok(SchemeMode::Dark),
            other => Err(SchemeError::UnknownMode(other.to_string())),
        }
    }
}

impl Display for SchemeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ten colors every scheme defines
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SemanticColor {
    Primary,
    Secondary,
    Success,
    Info,
    Warning,
    Danger,
    Light,
    Dark,
    Background,
    Foreground,
}

impl SemanticColor {
    pub const ALL: [SemanticColor; 10] = [
        SemanticColor::Primary,
        SemanticColor::Secondary,
        SemanticColor::Success,
        SemanticColor::Info,
        SemanticColor::Warning,
        SemanticColor::Danger,
        SemanticColor::Light,
        SemanticColor::Dark,
        SemanticColor::Background,
        SemanticColor::Foreground,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SemanticColor::Primary => "primary",
            SemanticColor::Secondary => "secondary",
            SemanticColor::Success => "success",
            SemanticColor::Info => "info",
            SemanticColor::Warning => "warning",
            SemanticColor::Danger => "danger",
            SemanticColor::Light => "light",
            SemanticColor::Dark => "dark",
            SemanticColor::Background => "background",
            SemanticColor::Foreground => "foreground",
        }
    }

    /// Accent colors are the ones a widget style keyword can name
    pub fn is_accent(self) -> bool {
        !matches!(self, SemanticColor::Background | SemanticColor::Foreground)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for SemanticColor {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticColor::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| SchemeError::UnknownColor(s.to_string()))
    }
}

impl Display for SemanticColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named, mode-tagged palette
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorScheme {
    name: String,
    mode: SchemeMode,
    colors: [Rgb; 10],
}

impl ColorScheme {
    /// Create a scheme from `(color name, hex value)` pairs
    ///
    /// Colors that are not given take their defaults.
    pub fn new<'a, I>(name: &str, mode: SchemeMode, colors: I) -> Result<Self, SchemeError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut builder = Self::builder(name, mode);
        for (key, value) in colors {
            builder = builder.hex(key.parse()?, value)?;
        }
        Ok(builder.build())
    }

    pub fn builder(name: &str, mode: SchemeMode) -> SchemeBuilder {
        SchemeBuilder {
            name: name.to_string(),
            mode,
            colors: [None; 10],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> SchemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    pub fn color(&self, color: SemanticColor) -> Rgb {
        self.colors[color.index()]
    }

    /// Look up a color by name
    ///
    /// Returns `None` for the reserved keys `name` and `mode` and for any
    /// other name that is not a scheme color.
    pub fn get_color(&self, name: &str) -> Option<Rgb> {
        name.parse::<SemanticColor>().ok().map(|c| self.color(c))
    }

    /// The foreground that reads well on `color`
    pub fn get_foreground(&self, color: SemanticColor) -> Rgb {
        match color {
            SemanticColor::Light => self.color(SemanticColor::Dark),
            SemanticColor::Dark => self.color(SemanticColor::Light),
            SemanticColor::Background => self.color(SemanticColor::Foreground),
            _ if self.is_dark() => self.color(SemanticColor::Foreground),
            _ => self.color(SemanticColor::Background),
        }
    }

    /// The tint/shade ramp of `color`, computed on every call
    pub fn get_shades(&self, color: SemanticColor) -> Shades {
        Shades::from_color(self.color(color))
    }

    /// The tint/shade ramp of a color given by name
    pub fn get_shades_named(&self, name: &str) -> Result<Shades, SchemeError> {
        Ok(self.get_shades(name.parse()?))
    }

    /// Iterate `(color, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (SemanticColor, Rgb)> + '_ {
        SemanticColor::ALL.into_iter().map(|c| (c, self.color(c)))
    }
}

/// Builder for [`ColorScheme`]
#[derive(Clone, Debug)]
pub struct SchemeBuilder {
    name: String,
    mode: SchemeMode,
    colors: [Option<Rgb>; 10],
}

impl SchemeBuilder {
    pub fn color(mut self, color: SemanticColor, value: Rgb) -> Self {
        self.colors[color.index()] = Some(value);
        self
    }

    /// Set a color from a `#rgb` or `#rrggbb` string
    pub fn hex(self, color: SemanticColor, value: &str) -> Result<Self, SchemeError> {
        let parsed = value
            .parse()
            .map_err(|source| SchemeError::InvalidHex { color, source })?;
        Ok(self.color(color, parsed))
    }

    pub fn build(self) -> ColorScheme {
        let mut colors = [DEFAULT_COLOR; 10];
        for (slot, value) in colors.iter_mut().zip(self.colors) {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if self.colors[SemanticColor::Foreground.index()].is_none() {
            colors[SemanticColor::Foreground.index()] = DEFAULT_FOREGROUND;
        }
        ColorScheme {
            name: self.name,
            mode: self.mode,
            colors,
        }
    }
}
