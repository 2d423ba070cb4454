//! Hex RGB colors

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing colors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The string is not `#rgb` or `#rrggbb`
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// An opaque RGB color with 8-bit channels
///
/// Parsed from `#rgb` or `#rrggbb` strings and always printed as lowercase
/// `#rrggbb`, which is the form style options are stored in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a 0xRRGGBB value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Scale every channel by `factor`
    ///
    /// Each channel is clamped to `[0, 255]` and truncated, so a factor of
    /// `1.0` returns the color unchanged.
    pub fn scale(self, factor: f64) -> Self {
        let channel = |c: u8| (c as f64 * factor).clamp(0.0, 255.0) as u8;
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
        }
    }

    /// Convert to `[r, g, b, a]`
    pub const fn to_rgba8(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::InvalidHex(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17)
                };
                Ok(Self::new(
                    nibble(0).map_err(|_| invalid())?,
                    nibble(1).map_err(|_| invalid())?,
                    nibble(2).map_err(|_| invalid())?,
                ))
            }
            6 => u32::from_str_radix(digits, 16)
                .map(Self::from_hex)
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_long_and_short_hex() {
        assert_eq!("#2780e3".parse::<Rgb>(), Ok(Rgb::new(0x27, 0x80, 0xe3)));
        assert_eq!("#FFF".parse::<Rgb>(), Ok(Rgb::WHITE));
        assert_eq!("#ddd".parse::<Rgb>(), Ok(Rgb::new(0xdd, 0xdd, 0xdd)));
    }

    #[test]
    fn test_rejects_malformed_hex() {
        for bad in ["", "#", "fff", "#ffff", "#gggggg", "#12345", "#+12345"] {
            assert_eq!(
                bad.parse::<Rgb>(),
                Err(ColorError::InvalidHex(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_display_is_lowercase_long_form() {
        let color: Rgb = "#ABC".parse().unwrap();
        assert_eq!(color.to_string(), "#aabbcc");
    }

    #[test]
    fn test_scale_clamps_to_channel_range() {
        let color = Rgb::new(200, 100, 0);
        assert_eq!(color.scale(1.4), Rgb::new(255, 140, 0));
        assert_eq!(color.scale(0.6), Rgb::new(120, 60, 0));
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        let back: Rgb = serde_json::from_str("\"#0a0b0c\"").unwrap();
        assert_eq!(back, Rgb::new(10, 11, 12));
    }

    proptest! {
        #[test]
        fn prop_unit_scale_is_identity(r: u8, g: u8, b: u8) {
            let color = Rgb::new(r, g, b);
            prop_assert_eq!(color.scale(1.0), color);
        }

        #[test]
        fn prop_display_round_trips(r: u8, g: u8, b: u8) {
            let color = Rgb::new(r, g, b);
            prop_assert_eq!(color.to_string().parse::<Rgb>(), Ok(color));
        }
    }
}
