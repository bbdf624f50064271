//! View preparation for bathyscope.
//!
//! This crate turns normalized geometry into what a renderer needs:
//! - Camera auto-framing from a bounding sphere
//! - Depth heatmap colors via hue interpolation
//! - Normal/debug marker palettes

// Graphics code intentionally uses casts for colors
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]

pub mod camera;
pub mod color_maps;

pub use camera::{BoundingSphere, Camera, Framing, FAR_MARGIN, MIN_RADIUS, VIEW_AXIS};
pub use color_maps::{
    hex_color, hsl_to_rgb, Heatmap, HeatmapColors, HueRamp, MarkerPalette, ScalarRange, MIN_RANGE,
};
