//! Triangle mesh structure.
//!
//! Vertices are stored as a triangle soup: three consecutive vertices per
//! triangle, in record order and corner order.

mod geometry;

use bathyscope_core::quantity::Quantity;
use bathyscope_core::structure::{HasQuantities, Structure};
use bathyscope_core::DatasetKind;
use bathyscope_render::{hex_color, Heatmap};
use glam::{Mat4, Vec3};

use crate::heatmap::{find_heatmap, replace_quantity, HeatmapQuantity, HEATMAP_QUANTITY};

/// How a triangle mesh is shown. Both modes read the same buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Wireframe triangles in the outline color.
    #[default]
    Outline,
    /// Filled triangles with per-vertex heatmap colors.
    Heatmap,
}

/// A triangulated depth surface.
pub struct TriangleMesh {
    name: String,
    vertices: Vec<Vec3>,
    shift: Vec3,
    enabled: bool,
    transform: Mat4,
    quantities: Vec<Box<dyn Quantity>>,
    display_mode: DisplayMode,
    outline_color: Vec3,
}

impl TriangleMesh {
    /// Creates a mesh from whole triangles.
    pub fn from_triangles(name: impl Into<String>, triangles: &[[Vec3; 3]]) -> Self {
        let vertices = triangles.iter().flatten().copied().collect();
        Self {
            name: name.into(),
            vertices,
            shift: Vec3::ZERO,
            enabled: true,
            transform: Mat4::IDENTITY,
            quantities: Vec::new(),
            display_mode: DisplayMode::Outline,
            outline_color: hex_color(0xccaa88),
        }
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Returns the number of vertices (three per triangle).
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the vertices in corner order.
    #[must_use]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Positions as a flat `x, y, z, x, y, z, ...` buffer.
    #[must_use]
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Returns triangle `index`.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Option<[Vec3; 3]> {
        let start = index.checked_mul(3)?;
        let end = start.checked_add(3)?;
        let corners = self.vertices.get(start..end)?;
        Some([corners[0], corners[1], corners[2]])
    }

    /// Vertex indices of each triangle.
    #[must_use]
    pub fn triangle_indices(&self) -> Vec<[u32; 3]> {
        (0..self.num_triangles() as u32)
            .map(|t| [3 * t, 3 * t + 1, 3 * t + 2])
            .collect()
    }

    /// Translation that was subtracted by [`TriangleMesh::center`].
    #[must_use]
    pub fn shift(&self) -> Vec3 {
        self.shift
    }

    /// Gets the outline color.
    #[must_use]
    pub fn outline_color(&self) -> Vec3 {
        self.outline_color
    }

    /// Sets the outline color.
    pub fn set_outline_color(&mut self, color: Vec3) -> &mut Self {
        self.outline_color = color;
        self
    }

    /// Computes depth heatmap colors over all vertices.
    ///
    /// Must run after the vertex buffer is final: the color range is global.
    pub fn apply_heatmap(&mut self, heatmap: &Heatmap) -> &mut Self {
        let heat = heatmap.colorize(&self.vertices);
        match heat.range {
            Some(range) if range.is_degenerate() => {
                log::debug!("{}: flat along {:?}, heatmap uses one color", self.name, heatmap.axis);
            }
            None => log::debug!("{}: no finite values for heatmap", self.name),
            Some(_) => {}
        }
        let mut quantity = HeatmapQuantity::new(HEATMAP_QUANTITY, self.name.clone(), heat);
        quantity.set_enabled(self.display_mode == DisplayMode::Heatmap);
        replace_quantity(&mut self.quantities, Box::new(quantity));
        self
    }

    /// Returns the heatmap quantity, if computed.
    #[must_use]
    pub fn heatmap(&self) -> Option<&HeatmapQuantity> {
        find_heatmap(&self.quantities)
    }

    /// Per-vertex heatmap colors, if computed.
    #[must_use]
    pub fn colors(&self) -> Option<&[Vec3]> {
        self.heatmap().map(HeatmapQuantity::colors)
    }

    /// Returns the current display mode.
    #[must_use]
    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Switches between outline and heatmap display without touching the data.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
        if let Some(q) = self.get_quantity_mut(HEATMAP_QUANTITY) {
            q.set_enabled(mode == DisplayMode::Heatmap);
        }
    }

    /// Whether the outline representation is currently shown.
    #[must_use]
    pub fn outline_visible(&self) -> bool {
        self.enabled && self.display_mode == DisplayMode::Outline
    }

    /// Whether the heatmap representation is currently shown.
    #[must_use]
    pub fn heatmap_visible(&self) -> bool {
        self.enabled && self.heatmap().is_some_and(Quantity::is_enabled)
    }
}

impl Structure for TriangleMesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DatasetKind {
        DatasetKind::Triangles
    }

    fn positions(&self) -> &[Vec3] {
        &self.vertices
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

impl HasQuantities for TriangleMesh {
    fn get_quantity_mut(&mut self, name: &str) -> Option<&mut Box<dyn Quantity>> {
        self.quantities.iter_mut().find(|q| q.name() == name)
    }

    fn quantities(&self) -> &[Box<dyn Quantity>] {
        &self.quantities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> [Vec3; 3] {
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    /// Test basic triangle soup layout.
    #[test]
    fn test_from_triangles_layout() {
        let second = [Vec3::splat(2.0), Vec3::splat(3.0), Vec3::splat(4.0)];
        let mesh = TriangleMesh::from_triangles("tri", &[unit_triangle(), second]);

        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.num_vertices(), 6);
        assert_eq!(mesh.positions_flat().len(), 18);
        assert_eq!(mesh.positions_flat()[9..12], [2.0, 2.0, 2.0]);
        assert_eq!(mesh.triangle(1), Some(second));
        assert_eq!(mesh.triangle(2), None);
        assert_eq!(mesh.triangle(usize::MAX / 3), None);
        assert_eq!(mesh.triangle(usize::MAX), None);
        assert_eq!(mesh.triangle_indices(), vec![[0, 1, 2], [3, 4, 5]]);
    }

    /// Test that toggling display mode only flips visibility.
    #[test]
    fn test_display_mode_toggle() {
        let mut mesh = TriangleMesh::from_triangles("tri", &[unit_triangle()]);
        mesh.apply_heatmap(&Heatmap::default());
        let colors_before = mesh.colors().unwrap().to_vec();

        assert!(mesh.outline_visible());
        assert!(!mesh.heatmap_visible());

        mesh.set_display_mode(DisplayMode::Heatmap);
        assert!(!mesh.outline_visible());
        assert!(mesh.heatmap_visible());
        assert_eq!(mesh.colors().unwrap(), colors_before.as_slice());

        mesh.set_display_mode(DisplayMode::Outline);
        assert!(mesh.outline_visible());
        assert!(!mesh.heatmap_visible());
    }

    /// Test that a heatmap computed in heatmap mode starts enabled.
    #[test]
    fn test_heatmap_follows_mode() {
        let mut mesh = TriangleMesh::from_triangles("tri", &[unit_triangle()]);
        mesh.set_display_mode(DisplayMode::Heatmap);
        assert!(!mesh.heatmap_visible());
        mesh.apply_heatmap(&Heatmap::default());
        assert!(mesh.heatmap_visible());
        assert_eq!(mesh.num_quantities(), 1);
    }

    /// Test bounding box through the structure trait.
    #[test]
    fn test_bounding_box() {
        let mesh = TriangleMesh::from_triangles("tri", &[unit_triangle()]);
        let bb = mesh.bounding_box().unwrap();
        assert_eq!(bb.min, Vec3::ZERO);
        assert_eq!(bb.max, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(mesh.kind(), DatasetKind::Triangles);
    }

    #[test]
    fn test_hidden_mesh_shows_nothing() {
        let mut mesh = TriangleMesh::from_triangles("tri", &[unit_triangle()]);
        mesh.apply_heatmap(&Heatmap::default());
        mesh.set_enabled(false);
        assert!(!mesh.outline_visible());
        mesh.set_display_mode(DisplayMode::Heatmap);
        assert!(!mesh.heatmap_visible());
    }
}
