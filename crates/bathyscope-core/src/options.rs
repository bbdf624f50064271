//! Configuration options for bathyscope.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bounds::Axis;
use crate::dataset::DatasetKind;
use crate::error::Result;
use crate::record::ParsePolicy;

/// Global configuration options.
///
/// Every field has a default, so a JSON config only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Multiplier applied to every ingested z value.
    pub depth_magnification: f32,

    /// Field delimiter of the input text.
    pub delimiter: char,

    /// How non-numeric fields are handled.
    pub parse_policy: ParsePolicy,

    /// Default source paths, one per dataset kind.
    pub sources: DefaultSources,

    /// Heatmap color mapping.
    pub heatmap: HeatmapOptions,

    /// Camera parameters used for auto-framing.
    pub camera: CameraOptions,

    /// Whether overlay loads frame the camera when no mesh is loaded.
    pub frame_overlays_without_mesh: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            depth_magnification: 10.0,
            delimiter: ',',
            parse_policy: ParsePolicy::SkipMalformed,
            sources: DefaultSources::default(),
            heatmap: HeatmapOptions::default(),
            camera: CameraOptions::default(),
            frame_overlays_without_mesh: true,
        }
    }
}

impl Options {
    /// Parses options from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes options to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Well-known relative paths loaded on startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSources {
    pub triangles: String,
    pub track: String,
    pub points: String,
}

impl Default for DefaultSources {
    fn default() -> Self {
        Self {
            triangles: "triangles.csv".to_string(),
            track: "track.csv".to_string(),
            points: "points.csv".to_string(),
        }
    }
}

impl DefaultSources {
    /// Path for a dataset kind.
    #[must_use]
    pub fn path(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Triangles => &self.triangles,
            DatasetKind::Track => &self.track,
            DatasetKind::Points => &self.points,
        }
    }
}

/// Heatmap settings: which axis drives the color and the hue ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapOptions {
    pub axis: Axis,
    /// Hue (0..1) at the minimum of the axis.
    pub start_hue: f32,
    /// Hue (0..1) at the maximum of the axis.
    pub end_hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            axis: Axis::Z,
            start_hue: 0.66,
            end_hue: 0.0,
            saturation: 1.0,
            lightness: 0.5,
        }
    }
}

/// Perspective camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Viewport width / height.
    pub aspect_ratio: f32,
    /// Preferred near clipping plane.
    pub near: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            aspect_ratio: 2.0,
            near: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.depth_magnification, 10.0);
        assert_eq!(options.delimiter, ',');
        assert_eq!(options.sources.path(DatasetKind::Track), "track.csv");
        assert_eq!(options.heatmap.axis, Axis::Z);
    }

    #[test]
    fn test_partial_json_overrides() {
        let options = Options::from_json_str(
            r#"{ "depth_magnification": 4.0, "sources": { "points": "data/p.csv" },
                 "parse_policy": "lenient", "heatmap": { "axis": "y" } }"#,
        )
        .unwrap();
        assert_eq!(options.depth_magnification, 4.0);
        assert_eq!(options.parse_policy, ParsePolicy::Lenient);
        assert_eq!(options.sources.points, "data/p.csv");
        assert_eq!(options.sources.triangles, "triangles.csv");
        assert_eq!(options.heatmap.axis, Axis::Y);
        assert_eq!(options.heatmap.start_hue, 0.66);
    }

    #[test]
    fn test_json_round_trip() {
        let options = Options::default();
        let json = options.to_json_string().unwrap();
        assert_eq!(Options::from_json_str(&json).unwrap(), options);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Options::from_json_str("{ not json").is_err());
    }
}
