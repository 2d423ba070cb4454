//! Size scaling

use flatkit_paint::Bounds;

/// Pixels per point of the reference display the artwork was sized for
#[cfg(target_os = "macos")]
pub const BASELINE: f64 = 1.000492368291482;

/// Pixels per point of the reference display the artwork was sized for
#[cfg(not(target_os = "macos"))]
pub const BASELINE: f64 = 2.000984736582964;

/// Scales artwork sizes to the display
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    factor: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

impl Scale {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Scale for a display reporting `pixels_per_point`
    pub fn from_tk_scaling(pixels_per_point: f64) -> Self {
        Self::new(pixels_per_point / BASELINE)
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Scale one size, rounding up
    pub fn ss(&self, v: f64) -> i64 {
        (v * self.factor).ceil() as i64
    }

    /// Scale a non-negative size, at least one pixel
    pub fn px(&self, v: u32) -> u32 {
        self.ss(v.into()).max(1) as u32
    }

    /// Scale a coordinate for drawing
    pub fn coord(&self, v: u32) -> f32 {
        self.ss(v.into()) as f32
    }

    pub fn size(&self, width: u32, height: u32) -> (u32, u32) {
        (self.px(width), self.px(height))
    }

    pub fn bounds(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Bounds {
        Bounds::new(self.coord(x0), self.coord(y0), self.coord(x1), self.coord(y1))
    }

    pub fn points(&self, points: &[(u32, u32)]) -> Vec<(f32, f32)> {
        points
            .iter()
            .map(|&(x, y)| (self.coord(x), self.coord(y)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_scale_is_identity() {
        let scale = Scale::default();
        assert_eq!(scale.px(790), 790);
        assert_eq!(scale.size(800, 400), (800, 400));
        assert_eq!(scale.bounds(10, 10, 790, 390), Bounds::new(10.0, 10.0, 790.0, 390.0));
    }

    #[test]
    fn test_sizes_round_up() {
        let scale = Scale::new(1.5);
        assert_eq!(scale.px(3), 5);
        assert_eq!(scale.ss(-16.8), -25);
        assert_eq!(Scale::new(0.01).px(10), 1);
    }

    #[test]
    fn test_baseline_display_is_unit_scale() {
        let scale = Scale::from_tk_scaling(BASELINE);
        assert_eq!(scale.factor(), 1.0);
        assert_eq!(Scale::from_tk_scaling(BASELINE * 2.0).px(16), 32);
    }
}
