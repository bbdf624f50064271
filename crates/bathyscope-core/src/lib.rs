//! Core abstractions for bathyscope.
//!
//! This crate provides the fundamental types used throughout bathyscope:
//! - [`RecordParser`] for turning delimited text into numeric records
//! - [`BoundingBox`] and [`center_in_place`] for spatial normalization
//! - [`Alignment`] for keeping overlays in the mesh's frame
//! - [`Structure`] and [`Quantity`] traits for loaded datasets
//! - Configuration [`Options`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod alignment;
pub mod bounds;
pub mod dataset;
pub mod error;
pub mod normalize;
pub mod options;
pub mod quantity;
pub mod record;
pub mod structure;

pub use alignment::Alignment;
pub use bounds::{Axis, BoundingBox};
pub use dataset::{DatasetKind, Marker};
pub use error::{BathyscopeError, Result};
pub use normalize::center_in_place;
pub use options::{CameraOptions, DefaultSources, HeatmapOptions, Options};
pub use quantity::Quantity;
pub use record::{ParsePolicy, ParseReport, RawRecord, RecordParser, RejectReason, RejectedLine};
pub use structure::{HasQuantities, Structure};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec3};
