//! Tint/shade ramps

use flatkit_core::Rgb;
use std::ops::Index;

/// Luminosity factors of the ramp, lightest first; index 4 is the base color
pub const SHADE_FACTORS: [f64; 9] = [1.4, 1.3, 1.2, 1.1, 1.0, 0.9, 0.8, 0.7, 0.6];

/// Nine step ramp around a base color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shades {
    pub l4: Rgb,
    pub l3: Rgb,
    pub l2: Rgb,
    pub l1: Rgb,
    pub base: Rgb,
    pub d1: Rgb,
    pub d2: Rgb,
    pub d3: Rgb,
    pub d4: Rgb,
}

impl Shades {
    /// Compute the ramp by scaling each channel of `color`
    pub fn from_color(color: Rgb) -> Self {
        let [l4, l3, l2, l1, base, d1, d2, d3, d4] = SHADE_FACTORS.map(|f| color.scale(f));
        Self {
            l4,
            l3,
            l2,
            l1,
            base,
            d1,
            d2,
            d3,
            d4,
        }
    }

    pub fn to_array(&self) -> [Rgb; 9] {
        [
            self.l4, self.l3, self.l2, self.l1, self.base, self.d1, self.d2, self.d3, self.d4,
        ]
    }
}

impl Index<usize> for Shades {
    type Output = Rgb;

    fn index(&self, index: usize) -> &Rgb {
        match index {
            0 => &self.l4,
            1 => &self.l3,
            2 => &self.l2,
            3 => &self.l1,
            4 => &self.base,
            5 => &self.d1,
            6 => &self.d2,
            7 => &self.d3,
            8 => &self.d4,
            _ => panic!("shade index {index} out of range 0..9"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_ramp() {
        let shades = Shades::from_color(Rgb::from_hex(0x2c3e50));
        assert_eq!(shades.base, Rgb::from_hex(0x2c3e50));
        assert_eq!(shades.l4, Rgb::new(61, 86, 112));
        assert_eq!(shades.d4, Rgb::new(26, 37, 48));
    }

    #[test]
    fn test_bright_channels_saturate() {
        let shades = Shades::from_color(Rgb::WHITE);
        assert_eq!(shades.l4, Rgb::WHITE);
        assert_eq!(shades.l1, Rgb::WHITE);
        assert_eq!(shades.d1, Rgb::new(229, 229, 229));
    }

    #[test]
    fn test_index_matches_fields() {
        let shades = Shades::from_color(Rgb::new(100, 150, 200));
        for (i, shade) in shades.to_array().iter().enumerate() {
            assert_eq!(&shades[i], shade);
        }
    }

    proptest! {
        #[test]
        fn prop_base_is_the_input(r: u8, g: u8, b: u8) {
            let color = Rgb::new(r, g, b);
            prop_assert_eq!(Shades::from_color(color).base, color);
        }

        #[test]
        fn prop_ramp_is_monotonic(r: u8, g: u8, b: u8) {
            let ramp = Shades::from_color(Rgb::new(r, g, b)).to_array();
            for pair in ramp.windows(2) {
                prop_assert!(pair[0].r >= pair[1].r);
                prop_assert!(pair[0].g >= pair[1].g);
                prop_assert!(pair[0].b >= pair[1].b);
            }
        }

        #[test]
        fn prop_each_shade_matches_its_factor(r: u8, g: u8, b: u8, i in 0usize..9) {
            let shade = Shades::from_color(Rgb::new(r, g, b))[i];
            let expected = |c: u8| (c as f64 * SHADE_FACTORS[i]).clamp(0.0, 255.0) as u8;
            prop_assert_eq!(shade, Rgb::new(expected(r), expected(g), expected(b)));
        }
    }
}
