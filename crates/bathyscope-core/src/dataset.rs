//! Dataset kinds and per-point markers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three kinds of dataset bathyscope can load.
///
/// Each kind owns one slot in the scene and has its own column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// Triangulated depth surface: `id, x1, y1, z1, x2, y2, z2, x3, y3, z3`.
    Triangles,
    /// Ordered track: `id, x, y, z, flag`.
    Track,
    /// Unordered points: `x, y, z, flag`.
    Points,
}

impl DatasetKind {
    /// All kinds, in startup load order.
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Triangles,
        DatasetKind::Track,
        DatasetKind::Points,
    ];

    /// Minimum number of fields a record must carry for this kind.
    #[must_use]
    pub fn min_fields(self) -> usize {
        match self {
            DatasetKind::Triangles => 10,
            DatasetKind::Track => 5,
            DatasetKind::Points => 4,
        }
    }

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::Triangles => "triangles",
            DatasetKind::Track => "track",
            DatasetKind::Points => "points",
        }
    }

    /// Index into fixed per-kind tables.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            DatasetKind::Triangles => 0,
            DatasetKind::Track => 1,
            DatasetKind::Points => 2,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Two-way color selector carried by track and point records.
///
/// Only the sign of the source flag survives ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Marker {
    /// Flag was zero or positive.
    #[default]
    Normal,
    /// Flag was negative; the record marks something that went wrong upstream.
    Debug,
}

impl Marker {
    /// Classifies a raw flag value. NaN is treated as normal.
    #[must_use]
    pub fn from_flag(flag: f32) -> Self {
        if flag < 0.0 {
            Marker::Debug
        } else {
            Marker::Normal
        }
    }

    /// Returns true for [`Marker::Debug`].
    #[must_use]
    pub fn is_debug(self) -> bool {
        self == Marker::Debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_from_flag() {
        assert_eq!(Marker::from_flag(1.0), Marker::Normal);
        assert_eq!(Marker::from_flag(0.0), Marker::Normal);
        assert_eq!(Marker::from_flag(-0.5), Marker::Debug);
        assert_eq!(Marker::from_flag(-1234.0), Marker::Debug);
        assert_eq!(Marker::from_flag(f32::NAN), Marker::Normal);
    }

    #[test]
    fn test_min_fields() {
        assert_eq!(DatasetKind::Triangles.min_fields(), 10);
        assert_eq!(DatasetKind::Track.min_fields(), 5);
        assert_eq!(DatasetKind::Points.min_fields(), 4);
    }

    #[test]
    fn test_kind_indices_are_distinct() {
        let mut seen = [false; 3];
        for kind in DatasetKind::ALL {
            assert!(!seen[kind.index()]);
            seen[kind.index()] = true;
        }
    }
}
