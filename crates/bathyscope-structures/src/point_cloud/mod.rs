//! Point cloud structure.

use bathyscope_core::quantity::Quantity;
use bathyscope_core::structure::{HasQuantities, Structure};
use bathyscope_core::{BathyscopeError, DatasetKind, Marker, RawRecord, Result};
use bathyscope_render::{Heatmap, MarkerPalette};
use glam::{Mat4, Vec3};

use crate::heatmap::{find_heatmap, replace_quantity, HeatmapQuantity, HEATMAP_QUANTITY};

/// A point cloud structure. Points are unconnected markers.
pub struct PointCloud {
    name: String,
    points: Vec<Vec3>,
    markers: Vec<Marker>,
    enabled: bool,
    transform: Mat4,
    quantities: Vec<Box<dyn Quantity>>,
    palette: MarkerPalette,
    point_radius: f32,
}

impl PointCloud {
    /// Creates a new point cloud with one marker per point.
    pub fn new(name: impl Into<String>, points: Vec<Vec3>, markers: Vec<Marker>) -> Result<Self> {
        if points.len() != markers.len() {
            return Err(BathyscopeError::SizeMismatch {
                expected: points.len(),
                actual: markers.len(),
            });
        }
        Ok(Self::with_markers(name.into(), points, markers))
    }

    fn with_markers(name: String, points: Vec<Vec3>, markers: Vec<Marker>) -> Self {
        Self {
            name,
            points,
            markers,
            enabled: true,
            transform: Mat4::IDENTITY,
            quantities: Vec::new(),
            palette: MarkerPalette::POINTS,
            point_radius: 0.3,
        }
    }

    /// Builds a point cloud from `x, y, z, flag` records.
    pub fn from_records(
        name: impl Into<String>,
        records: &[RawRecord],
        depth_magnification: f32,
    ) -> Self {
        let (points, markers) = records
            .iter()
            .map(|r| {
                (
                    Vec3::new(r.field(0), r.field(1), r.field(2) * depth_magnification),
                    Marker::from_flag(r.field(3)),
                )
            })
            .unzip();
        Self::with_markers(name.into(), points, markers)
    }

    /// Returns the number of points.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Returns the raw points.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Points as a flat `x, y, z, ...` buffer.
    #[must_use]
    pub fn points_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    /// Returns the per-point markers.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Number of points flagged as debug.
    #[must_use]
    pub fn num_debug(&self) -> usize {
        self.markers.iter().filter(|m| m.is_debug()).count()
    }

    /// Per-point marker colors.
    #[must_use]
    pub fn marker_colors(&self) -> Vec<Vec3> {
        self.palette.colors(&self.markers)
    }

    /// Gets the marker palette.
    #[must_use]
    pub fn palette(&self) -> MarkerPalette {
        self.palette
    }

    /// Sets the marker palette.
    pub fn set_palette(&mut self, palette: MarkerPalette) -> &mut Self {
        self.palette = palette;
        self
    }

    /// Gets the point radius.
    #[must_use]
    pub fn point_radius(&self) -> f32 {
        self.point_radius
    }

    /// Sets the point radius.
    pub fn set_point_radius(&mut self, radius: f32) -> &mut Self {
        self.point_radius = radius;
        self
    }

    /// Computes depth heatmap colors over all points (disabled by default).
    pub fn apply_heatmap(&mut self, heatmap: &Heatmap) -> &mut Self {
        let quantity = HeatmapQuantity::new(
            HEATMAP_QUANTITY,
            self.name.clone(),
            heatmap.colorize(&self.points),
        );
        replace_quantity(&mut self.quantities, Box::new(quantity));
        self
    }

    /// Returns the heatmap quantity, if computed.
    #[must_use]
    pub fn heatmap(&self) -> Option<&HeatmapQuantity> {
        find_heatmap(&self.quantities)
    }
}

impl Structure for PointCloud {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DatasetKind {
        DatasetKind::Points
    }

    fn positions(&self) -> &[Vec3] {
        &self.points
    }

    fn transform(&self) -> Mat4 {
        self.transform
    }

    fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl HasQuantities for PointCloud {
    fn get_quantity_mut(&mut self, name: &str) -> Option<&mut Box<dyn Quantity>> {
        self.quantities.iter_mut().find(|q| q.name() == name)
    }

    fn quantities(&self) -> &[Box<dyn Quantity>] {
        &self.quantities
    }
}
