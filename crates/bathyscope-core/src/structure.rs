//! Structure trait.
//!
//! A [`Structure`] is one loaded dataset in the scene: a triangle mesh, a
//! track, or a point cloud.

use glam::{Mat4, Vec3};

use crate::bounds::BoundingBox;
use crate::dataset::DatasetKind;
use crate::quantity::Quantity;

/// A geometric object that can be displayed.
///
/// Each structure has:
/// - A name
/// - A placement transform into the shared scene frame
/// - Visibility state
pub trait Structure: Send + Sync {
    /// Returns the name of this structure.
    fn name(&self) -> &str;

    /// Returns the dataset kind this structure was built from.
    fn kind(&self) -> DatasetKind;

    /// Returns the positions in local (pre-transform) coordinates.
    fn positions(&self) -> &[Vec3];

    /// Returns the current placement transform.
    fn transform(&self) -> Mat4;

    /// Sets the placement transform.
    fn set_transform(&mut self, transform: Mat4);

    /// Returns whether this structure is currently visible.
    fn is_enabled(&self) -> bool;

    /// Sets the visibility of this structure.
    fn set_enabled(&mut self, enabled: bool);

    /// Axis-aligned bounding box in world coordinates.
    ///
    /// Returns `None` if the structure has no spatial extent.
    fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.positions()).map(|bb| bb.transformed(self.transform()))
    }

    /// Positions after the placement transform.
    fn world_positions(&self) -> Vec<Vec3> {
        let transform = self.transform();
        self.positions()
            .iter()
            .map(|&p| transform.transform_point3(p))
            .collect()
    }
}

/// A structure that can have quantities attached to it.
pub trait HasQuantities: Structure {
    /// Gets a mutable quantity by name.
    fn get_quantity_mut(&mut self, name: &str) -> Option<&mut Box<dyn Quantity>>;

    /// Returns all quantities attached to this structure.
    fn quantities(&self) -> &[Box<dyn Quantity>];

    /// Returns the number of quantities attached.
    fn num_quantities(&self) -> usize {
        self.quantities().len()
    }
}
