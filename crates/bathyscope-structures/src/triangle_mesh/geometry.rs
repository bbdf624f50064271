//! Building and normalizing triangle mesh geometry.

use bathyscope_core::{center_in_place, RawRecord};
use glam::Vec3;

use super::TriangleMesh;

impl TriangleMesh {
    /// Builds a mesh from triangle records.
    ///
    /// Fields 1..=9 hold three `(x, y, z)` corners; field 0 is an identifier
    /// and ignored. Every z is multiplied by `depth_magnification`.
    pub fn from_records(
        name: impl Into<String>,
        records: &[RawRecord],
        depth_magnification: f32,
    ) -> Self {
        let triangles: Vec<[Vec3; 3]> = records
            .iter()
            .map(|r| {
                let corner = |base: usize| {
                    Vec3::new(
                        r.field(base),
                        r.field(base + 1),
                        r.field(base + 2) * depth_magnification,
                    )
                };
                [corner(1), corner(4), corner(7)]
            })
            .collect();
        Self::from_triangles(name, &triangles)
    }

    /// Moves the mesh so its bounding box is centered at the origin.
    ///
    /// Returns the applied shift, which is also kept on the mesh. An empty
    /// mesh is left untouched and yields `None`.
    pub fn center(&mut self) -> Option<Vec3> {
        let shift = center_in_place(&mut self.vertices)?;
        self.shift += shift;
        Some(shift)
    }

    /// Edges of every triangle as line segments, for wireframe display.
    #[must_use]
    pub fn outline_segments(&self) -> Vec<[Vec3; 2]> {
        self.vertices
            .chunks_exact(3)
            .flat_map(|t| [[t[0], t[1]], [t[1], t[2]], [t[2], t[0]]])
            .collect()
    }
}
