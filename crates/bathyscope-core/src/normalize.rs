//! Spatial normalization: shift a position set so its bounding box is
//! centered at the origin.

use glam::Vec3;

use crate::bounds::BoundingBox;

/// Translates `positions` in place so their bounding box is centered at the
/// origin and returns the applied shift (the old box center).
///
/// Returns `None` and leaves the positions untouched when no bounding box
/// exists (empty input or every component non-finite on some axis).
pub fn center_in_place(positions: &mut [Vec3]) -> Option<Vec3> {
    let bb = BoundingBox::from_points(positions.iter())?;
    let shift = bb.center();
    for p in positions.iter_mut() {
        *p -= shift;
    }
    log::debug!("centered {} positions, shift = {shift}", positions.len());
    Some(shift)
}
