//! Shared coordinate frame for all loaded datasets.

use glam::{Mat4, Vec3};

/// Centering shift taken from the most recent triangle dataset.
///
/// Track and point overlays are placed at `-shift` so they land in the same
/// frame as the centered mesh. Before any triangle dataset is committed the
/// shift is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Alignment {
    shift: Vec3,
    generation: u64,
}

impl Alignment {
    /// Creates an identity alignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current centering shift.
    #[must_use]
    pub fn shift(&self) -> Vec3 {
        self.shift
    }

    /// How many times the shift has been replaced.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the shift.
    pub fn set_shift(&mut self, shift: Vec3) {
        self.shift = shift;
        self.generation += 1;
    }

    /// Placement transform for an overlay dataset.
    #[must_use]
    pub fn placement(&self) -> Mat4 {
        Mat4::from_translation(-self.shift)
    }

    /// Maps a raw (uncentered) position into the shared frame.
    #[must_use]
    pub fn apply(&self, raw: Vec3) -> Vec3 {
        raw - self.shift
    }
}
