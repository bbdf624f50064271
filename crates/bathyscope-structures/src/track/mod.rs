//! Track structure: ordered points joined by a polyline.

use bathyscope_core::quantity::Quantity;
use bathyscope_core::structure::{HasQuantities, Structure};
use bathyscope_core::{BathyscopeError, DatasetKind, Marker, RawRecord, Result};
use bathyscope_render::{hex_color, Heatmap, MarkerPalette};
use glam::{Mat4, Vec3};

use crate::heatmap::{find_heatmap, replace_quantity, HeatmapQuantity, HEATMAP_QUANTITY};

/// An ordered track (nodes connected consecutively).
///
/// Nodes keep their raw coordinates; the placement transform moves them into
/// the scene frame.
pub struct Track {
    name: String,

    // Geometry
    nodes: Vec<Vec3>,
    markers: Vec<Marker>,
    edges: Vec<[u32; 2]>,

    // Common structure fields
    enabled: bool,
    transform: Mat4,
    quantities: Vec<Box<dyn Quantity>>,

    // Visualization parameters
    palette: MarkerPalette,
    line_color: Vec3,
    marker_radius: f32,
}

impl Track {
    /// Creates a track from nodes in arrival order and their markers.
    ///
    /// Fails with [`BathyscopeError::SizeMismatch`] unless there is one
    /// marker per node.
    pub fn new(name: impl Into<String>, nodes: Vec<Vec3>, markers: Vec<Marker>) -> Result<Self> {
        if nodes.len() != markers.len() {
            return Err(BathyscopeError::SizeMismatch {
                expected: nodes.len(),
                actual: markers.len(),
            });
        }
        Ok(Self::with_markers(name.into(), nodes, markers))
    }

    fn with_markers(name: String, nodes: Vec<Vec3>, markers: Vec<Marker>) -> Self {
        let n = nodes.len();
        let edges = (0..n.saturating_sub(1))
            .map(|i| [i as u32, (i + 1) as u32])
            .collect();

        Self {
            name,
            nodes,
            markers,
            edges,
            enabled: true,
            transform: Mat4::IDENTITY,
            quantities: Vec::new(),
            palette: MarkerPalette::TRACK,
            line_color: hex_color(0xff0000),
            marker_radius: 0.5,
        }
    }

    /// Builds a track from `id, x, y, z, flag` records.
    pub fn from_records(
        name: impl Into<String>,
        records: &[RawRecord],
        depth_magnification: f32,
    ) -> Self {
        let (nodes, markers) = records
            .iter()
            .map(|r| {
                (
                    Vec3::new(r.field(1), r.field(2), r.field(3) * depth_magnification),
                    Marker::from_flag(r.field(4)),
                )
            })
            .unzip();
        Self::with_markers(name.into(), nodes, markers)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the raw node positions, in arrival order.
    #[must_use]
    pub fn nodes(&self) -> &[Vec3] {
        &self.nodes
    }

    /// Nodes as a flat `x, y, z, ...` buffer.
    #[must_use]
    pub fn nodes_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.nodes)
    }

    /// Returns the edges (consecutive node pairs).
    #[must_use]
    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    /// Returns the per-node markers.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Number of nodes flagged as debug.
    #[must_use]
    pub fn num_debug(&self) -> usize {
        self.markers.iter().filter(|m| m.is_debug()).count()
    }

    /// Per-node marker colors.
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

    /// Gets the polyline color.
    #[must_use]
    pub fn line_color(&self) -> Vec3 {
        self.line_color
    }

    /// Sets the polyline color.
    pub fn set_line_color(&mut self, color: Vec3) -> &mut Self {
        self.line_color = color;
        self
    }

    /// Gets the marker sphere radius.
    #[must_use]
    pub fn marker_radius(&self) -> f32 {
        self.marker_radius
    }

    /// Sets the marker sphere radius.
    pub fn set_marker_radius(&mut self, radius: f32) -> &mut Self {
        self.marker_radius = radius;
        self
    }

    /// Computes depth heatmap colors over all nodes (disabled by default).
    pub fn apply_heatmap(&mut self, heatmap: &Heatmap) -> &mut Self {
        let quantity =
            HeatmapQuantity::new(HEATMAP_QUANTITY, self.name.clone(), heatmap.colorize(&self.nodes));
        replace_quantity(&mut self.quantities, Box::new(quantity));
        self
    }

    /// Returns the heatmap quantity, if computed.
    #[must_use]
    pub fn heatmap(&self) -> Option<&HeatmapQuantity> {
        find_heatmap(&self.quantities)
    }
}

impl Structure for Track {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DatasetKind {
        DatasetKind::Track
    }

    fn positions(&self) -> &[Vec3] {
        &self.nodes
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

impl HasQuantities for Track {
    fn get_quantity_mut(&mut self, name: &str) -> Option<&mut Box<dyn Quantity>> {
        self.quantities.iter_mut().find(|q| q.name() == name)
    }

    fn quantities(&self) -> &[Box<dyn Quantity>] {
        &self.quantities
    }
}
