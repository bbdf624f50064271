//! Quantity trait.
//!
//! A [`Quantity`] is per-element data attached to a structure, such as the
//! heatmap colors derived from a mesh's depth values.

use std::any::Any;

/// Data associated with a structure that can be displayed.
pub trait Quantity: Any + Send + Sync {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the name of this quantity.
    fn name(&self) -> &str;

    /// Returns the name of the parent structure.
    fn structure_name(&self) -> &str;

    /// Returns whether this quantity is currently shown.
    fn is_enabled(&self) -> bool;

    /// Sets the enabled state of this quantity.
    fn set_enabled(&mut self, enabled: bool);

    /// Returns the number of data elements.
    fn data_size(&self) -> usize;
}
