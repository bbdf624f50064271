//! Axis-aligned bounding boxes.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
    /// Depth axis (default).
    #[default]
    Z,
}

impl Axis {
    /// Picks this axis' component out of `v`.
    #[must_use]
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// Min/max corner pair over a set of positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Creates a box from its corners.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Computes the box over `points`.
    ///
    /// Components that are NaN are skipped per axis. Returns `None` when no
    /// point contributes a finite component on every axis.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for &p in points {
            // Non-finite components never widen the box.
            for i in 0..3 {
                if p[i].is_finite() {
                    min[i] = min[i].min(p[i]);
                    max[i] = max[i].max(p[i]);
                }
            }
        }

        (min.cmple(max).all()).then_some(Self { min, max })
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths of the box.
    #[must_use]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the box diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f32 {
        self.extent().length()
    }

    /// The eight corners of the box.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
        ]
    }

    /// World-space box of this box after `transform`.
    #[must_use]
    pub fn transformed(&self, transform: Mat4) -> Self {
        let mut world_min = Vec3::splat(f32::MAX);
        let mut world_max = Vec3::splat(f32::MIN);
        for corner in self.corners() {
            let corner = transform.transform_point3(corner);
            world_min = world_min.min(corner);
            world_max = world_max.max(corner);
        }
        Self::new(world_min, world_max)
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Returns true if `p` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}
