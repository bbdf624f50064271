//! Color mapping: depth heatmaps and two-way marker palettes.

use bathyscope_core::{Axis, HeatmapOptions, Marker};
use glam::Vec3;

/// Ranges narrower than this are treated as a single plane.
pub const MIN_RANGE: f32 = 1.0e-6;

/// Converts an HSL color (all components in 0..1) to linear RGB.
#[must_use]
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    if s == 0.0 {
        return Vec3::splat(l);
    }

    let hi = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let lo = 2.0 * l - hi;

    Vec3::new(
        hue_channel(lo, hi, h + 1.0 / 3.0),
        hue_channel(lo, hi, h),
        hue_channel(lo, hi, h - 1.0 / 3.0),
    )
}

fn hue_channel(lo: f32, hi: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        lo + (hi - lo) * 6.0 * t
    } else if t < 0.5 {
        hi
    } else if t < 2.0 / 3.0 {
        lo + (hi - lo) * 6.0 * (2.0 / 3.0 - t)
    } else {
        lo
    }
}

/// Converts a `0xRRGGBB` literal to an RGB vector.
#[must_use]
pub fn hex_color(hex: u32) -> Vec3 {
    let channel = |shift: u32| f32::from(((hex >> shift) & 0xff) as u8) / 255.0;
    Vec3::new(channel(16), channel(8), channel(0))
}

/// Linear hue interpolation between two anchor hues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueRamp {
    /// Hue at `t = 0`.
    pub start_hue: f32,
    /// Hue at `t = 1`.
    pub end_hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Default for HueRamp {
    /// Blue at the minimum, red at the maximum.
    fn default() -> Self {
        Self {
            start_hue: 0.66,
            end_hue: 0.0,
            saturation: 1.0,
            lightness: 0.5,
        }
    }
}

impl HueRamp {
    /// Samples the ramp at a given value (0 to 1).
    #[must_use]
    pub fn sample(&self, t: f32) -> Vec3 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let hue = self.start_hue + (self.end_hue - self.start_hue) * t;
        hsl_to_rgb(hue, self.saturation, self.lightness)
    }
}

/// Observed min/max of one scalar channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarRange {
    pub min: f32,
    pub max: f32,
}

impl ScalarRange {
    /// Scans `values`, ignoring non-finite entries.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |range: Option<Self>, v| {
                Some(match range {
                    Some(r) => Self {
                        min: r.min.min(v),
                        max: r.max.max(v),
                    },
                    None => Self { min: v, max: v },
                })
            })
    }

    /// Returns true when every value lies on one plane.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.max - self.min < MIN_RANGE
    }

    /// Normalized position of `value` in the range.
    ///
    /// Degenerate ranges and non-finite values map to 0.
    #[must_use]
    pub fn normalize(&self, value: f32) -> f32 {
        if self.is_degenerate() || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Per-entry heatmap colors together with the range that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapColors {
    /// `None` if no entry had a finite value on the axis.
    pub range: Option<ScalarRange>,
    /// One RGB triple per input entry, in input order.
    pub colors: Vec<Vec3>,
}

/// Maps positions to colors along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Heatmap {
    pub axis: Axis,
    pub ramp: HueRamp,
}

impl Heatmap {
    /// Builds a heatmap from configuration.
    #[must_use]
    pub fn from_options(options: &HeatmapOptions) -> Self {
        Self {
            axis: options.axis,
            ramp: HueRamp {
                start_hue: options.start_hue,
                end_hue: options.end_hue,
                saturation: options.saturation,
                lightness: options.lightness,
            },
        }
    }

    /// Colors every position. The range is taken over the whole slice first.
    #[must_use]
    pub fn colorize(&self, positions: &[Vec3]) -> HeatmapColors {
        let range = ScalarRange::from_values(positions.iter().map(|&p| self.axis.component(p)));
        let colors = positions
            .iter()
            .map(|&p| {
                let t = range.map_or(0.0, |r| r.normalize(self.axis.component(p)));
                self.ramp.sample(t)
            })
            .collect();
        HeatmapColors { range, colors }
    }
}

/// Normal/debug color pair for marker-colored datasets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPalette {
    pub normal: Vec3,
    pub debug: Vec3,
}

impl MarkerPalette {
    /// Green markers, magenta for debug rows.
    pub const TRACK: Self = Self {
        normal: Vec3::new(0.0, 1.0, 0.0),
        debug: Vec3::new(1.0, 0.0, 1.0),
    };

    /// Blue markers, orange for debug rows.
    pub const POINTS: Self = Self {
        normal: Vec3::new(0.0, 128.0 / 255.0, 1.0),
        debug: Vec3::new(1.0, 165.0 / 255.0, 0.0),
    };

    /// Color for one marker.
    #[must_use]
    pub fn color(&self, marker: Marker) -> Vec3 {
        match marker {
            Marker::Normal => self.normal,
            Marker::Debug => self.debug,
        }
    }

    /// Colors for a marker sequence, in order.
    #[must_use]
    pub fn colors(&self, markers: &[Marker]) -> Vec<Vec3> {
        markers.iter().map(|&m| self.color(m)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1.0e-3
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(approx(hsl_to_rgb(0.0, 1.0, 0.5), Vec3::new(1.0, 0.0, 0.0)));
        assert!(approx(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), Vec3::new(0.0, 1.0, 0.0)));
        assert!(approx(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), Vec3::new(0.0, 0.0, 1.0)));
        assert!(approx(hsl_to_rgb(0.3, 0.0, 0.25), Vec3::splat(0.25)));
    }

    #[test]
    fn test_ramp_endpoints() {
        let ramp = HueRamp::default();
        let cold = ramp.sample(0.0);
        let hot = ramp.sample(1.0);
        assert!(cold.z > 0.99 && cold.x < 0.01, "cold end should be blue, got {cold}");
        assert!(approx(hot, Vec3::new(1.0, 0.0, 0.0)), "hot end should be red, got {hot}");
        assert_eq!(ramp.sample(-3.0), cold);
        assert_eq!(ramp.sample(f32::NAN), cold);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color(0xff0000), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(hex_color(0x0080ff), MarkerPalette::POINTS.normal);
        assert_eq!(hex_color(0xffa500), MarkerPalette::POINTS.debug);
        assert_eq!(hex_color(0xff00ff), MarkerPalette::TRACK.debug);
    }

    #[test]
    fn test_degenerate_range_has_no_nan() {
        let positions = vec![Vec3::new(0.0, 0.0, 2.0); 5];
        let heat = Heatmap::default().colorize(&positions);
        assert!(heat.range.unwrap().is_degenerate());
        assert_eq!(heat.colors.len(), 5);
        for c in &heat.colors {
            assert!(c.is_finite());
            assert_eq!(*c, heat.colors[0]);
        }
    }

    #[test]
    fn test_empty_input() {
        let heat = Heatmap::default().colorize(&[]);
        assert!(heat.range.is_none());
        assert!(heat.colors.is_empty());
    }

    #[test]
    fn test_nan_entries_are_colored_as_minimum() {
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, f32::NAN),
            Vec3::new(0.0, 0.0, 10.0),
        ];
        let heat = Heatmap::default().colorize(&positions);
        let range = heat.range.unwrap();
        assert_eq!((range.min, range.max), (0.0, 10.0));
        assert_eq!(heat.colors[1], heat.colors[0]);
        assert!(heat.colors.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_axis_selection() {
        let positions = [Vec3::new(0.0, 5.0, 1.0), Vec3::new(0.0, -5.0, 1.0)];
        let heatmap = Heatmap {
            axis: Axis::Y,
            ..Heatmap::default()
        };
        let heat = heatmap.colorize(&positions);
        assert!(approx(heat.colors[0], heatmap.ramp.sample(1.0)));
        assert!(approx(heat.colors[1], heatmap.ramp.sample(0.0)));
    }

    #[test]
    fn test_marker_palette() {
        let colors = MarkerPalette::TRACK.colors(&[Marker::Normal, Marker::Debug]);
        assert_eq!(colors, vec![Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 1.0)]);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_monotonic(
            values in prop::collection::vec(-1.0e4f32..1.0e4, 2..64),
            i in 0usize..64,
            j in 0usize..64,
        ) {
            let range = ScalarRange::from_values(values.iter().copied()).unwrap();
            prop_assume!(!range.is_degenerate());
            let (a, b) = (values[i % values.len()], values[j % values.len()]);
            prop_assume!(a < b);
            let (ta, tb) = (range.normalize(a), range.normalize(b));
            prop_assert!(ta <= tb);
            if b - a > (range.max - range.min) * 1.0e-4 {
                prop_assert!(ta < tb, "t({a}) = {ta} not below t({b}) = {tb}");
            }
        }

        #[test]
        fn prop_colors_are_finite(values in prop::collection::vec(-1.0e4f32..1.0e4, 0..32)) {
            let positions: Vec<Vec3> = values.iter().map(|&z| Vec3::new(0.0, 0.0, z)).collect();
            let heat = Heatmap::default().colorize(&positions);
            prop_assert_eq!(heat.colors.len(), positions.len());
            prop_assert!(heat.colors.iter().all(|c| c.is_finite()));
        }
    }
}
