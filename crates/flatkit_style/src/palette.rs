//! State colors derived from a scheme
//!
//! Every builder colors its states the same way: hover and pressed states
//! move toward white on light schemes and toward black on dark ones, and
//! everything disabled is drawn from the ramp of the `light` color.

use flatkit_core::Rgb;
use flatkit_theme::{ColorScheme, SemanticColor, Shades};

/// Shade ramps and state colors for one accent color
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub dark: bool,
    /// Ramp of the accent color
    pub shades: Shades,
    /// Ramp of the scheme's `light` color
    pub light: Shades,
    /// Ramp of the scheme's `background` color
    pub bg: Shades,
    /// Text color on the accent color
    pub on_color: Rgb,
}

impl Palette {
    pub fn new(scheme: &ColorScheme, color: SemanticColor) -> Self {
        Self {
            dark: scheme.is_dark(),
            shades: scheme.get_shades(color),
            light: scheme.get_shades(SemanticColor::Light),
            bg: scheme.get_shades(SemanticColor::Background),
            on_color: scheme.get_foreground(color),
        }
    }

    pub fn base(&self) -> Rgb {
        self.shades.base
    }

    pub fn hover(&self) -> Rgb {
        if self.dark {
            self.shades.d1
        } else {
            self.shades.l1
        }
    }

    pub fn pressed(&self) -> Rgb {
        if self.dark {
            self.shades.d2
        } else {
            self.shades.l2
        }
    }

    /// Disabled outlines and text
    pub fn disabled(&self) -> Rgb {
        if self.dark {
            self.light.d4
        } else {
            self.light.d2
        }
    }

    /// Hover fill of outline styles and unchecked indicators
    pub fn off_hover(&self) -> Rgb {
        if self.dark {
            self.bg.l1
        } else {
            self.light.base
        }
    }

    /// Pressed fill of outline styles and unchecked indicators
    pub fn off_pressed(&self) -> Rgb {
        if self.dark {
            self.bg.l2
        } else {
            self.light.d1
        }
    }

    /// Outline of unchecked indicators
    pub fn off_outline(&self) -> Rgb {
        self.light.d3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatkit_theme::SchemePreset;

    #[test]
    fn test_light_scheme_states() {
        let scheme = SchemePreset::Flatly.scheme();
        let p = Palette::new(&scheme, SemanticColor::Primary);
        let shades = scheme.get_shades(SemanticColor::Primary);
        let light = scheme.get_shades(SemanticColor::Light);

        assert_eq!(p.base(), scheme.color(SemanticColor::Primary));
        assert_eq!(p.hover(), shades.l1);
        assert_eq!(p.pressed(), shades.l2);
        assert_eq!(p.disabled(), light.d2);
        assert_eq!(p.off_hover(), light.base);
        assert_eq!(p.off_pressed(), light.d1);
        assert_eq!(p.on_color, scheme.color(SemanticColor::Background));
    }

    #[test]
    fn test_dark_scheme_states() {
        let scheme = SchemePreset::Superhero.scheme();
        let p = Palette::new(&scheme, SemanticColor::Danger);
        let shades = scheme.get_shades(SemanticColor::Danger);
        let bg = scheme.get_shades(SemanticColor::Background);

        assert_eq!(p.hover(), shades.d1);
        assert_eq!(p.pressed(), shades.d2);
        assert_eq!(p.disabled(), scheme.get_shades(SemanticColor::Light).d4);
        assert_eq!(p.off_hover(), bg.l1);
        assert_eq!(p.off_pressed(), bg.l2);
        assert_eq!(p.on_color, scheme.color(SemanticColor::Foreground));
    }
}
