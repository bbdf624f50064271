//! bathyscope: loads depth surfaces, tracks, and point clouds from delimited
//! text and keeps them in one centered, camera-framed scene.
//!
//! # Quick Start
//!
//! ```no_run
//! use bathyscope::*;
//! use pollster::FutureExt;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let mut scene = Coordinator::new(Options::default());
//!     for (kind, result) in scene.load_defaults("data").block_on() {
//!         if let Ok(outcome) = result {
//!             println!("{kind}: {:?}", outcome.report());
//!         }
//!     }
//!
//!     scene.set_display_mode(DisplayMode::Heatmap)?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Every load runs the same pipeline, parameterized by [`DatasetKind`]:
//!
//! - text is split into numeric records by [`RecordParser`]
//! - records are built into a [`TriangleMesh`], [`Track`], or [`PointCloud`]
//! - triangle meshes are centered; the shift becomes the scene [`Alignment`]
//! - heatmap colors are computed over the final positions
//! - the [`Coordinator`] commits the dataset and frames the [`Camera`]
//!
//! Loads are split into `begin_load`, `prepare`, and `commit` so that a slow
//! load never overwrites a newer one.

// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod coordinator;
mod pipeline;
mod source;

pub use coordinator::{Coordinator, LoadOutcome};
pub use pipeline::{
    fetch_and_prepare, prepare, LoadReport, LoadTicket, PreparedDataset, PreparedLoad,
};
pub use source::{FileSource, InlineSource, TextSource};

// Re-export core types
pub use bathyscope_core::{
    error::{BathyscopeError, Result},
    options::Options,
    quantity::Quantity,
    structure::{HasQuantities, Structure},
    Alignment, Axis, BoundingBox, DatasetKind, Marker, Mat4, ParsePolicy, ParseReport, RawRecord,
    RecordParser, RejectReason, RejectedLine, Vec3,
};

// Re-export render types
pub use bathyscope_render::{BoundingSphere, Camera, Framing, Heatmap, MarkerPalette};

// Re-export structures
pub use bathyscope_structures::{DisplayMode, HeatmapQuantity, PointCloud, Track, TriangleMesh};

/// Initializes `env_logger` from `RUST_LOG`. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
