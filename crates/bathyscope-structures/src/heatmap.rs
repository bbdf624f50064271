//! Heatmap color quantity shared by all structures.

use bathyscope_core::quantity::Quantity;
use bathyscope_render::{HeatmapColors, ScalarRange};
use glam::Vec3;

/// Name under which structures store their depth heatmap.
pub const HEATMAP_QUANTITY: &str = "depth heatmap";

/// Per-element colors derived from one coordinate axis.
pub struct HeatmapQuantity {
    name: String,
    structure_name: String,
    colors: Vec<Vec3>,
    range: Option<ScalarRange>,
    enabled: bool,
}

impl HeatmapQuantity {
    /// Creates a new heatmap quantity from mapped colors.
    pub fn new(
        name: impl Into<String>,
        structure_name: impl Into<String>,
        heat: HeatmapColors,
    ) -> Self {
        Self {
            name: name.into(),
            structure_name: structure_name.into(),
            colors: heat.colors,
            range: heat.range,
            enabled: false,
        }
    }

    /// One RGB triple per element.
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Colors as a flat `r, g, b, r, g, b, ...` buffer.
    pub fn colors_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Observed range of the mapped axis.
    pub fn range(&self) -> Option<ScalarRange> {
        self.range
    }
}

impl Quantity for HeatmapQuantity {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn structure_name(&self) -> &str {
        &self.structure_name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn data_size(&self) -> usize {
        self.colors.len()
    }
}

/// Inserts `quantity`, replacing any quantity with the same name.
pub(crate) fn replace_quantity(quantities: &mut Vec<Box<dyn Quantity>>, quantity: Box<dyn Quantity>) {
    quantities.retain(|q| q.name() != quantity.name());
    quantities.push(quantity);
}

/// Finds the heatmap among a structure's quantities.
pub(crate) fn find_heatmap(quantities: &[Box<dyn Quantity>]) -> Option<&HeatmapQuantity> {
    quantities
        .iter()
        .find(|q| q.name() == HEATMAP_QUANTITY)
        .and_then(|q| q.as_any().downcast_ref::<HeatmapQuantity>())
}
