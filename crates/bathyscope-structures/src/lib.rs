//! Structure implementations for bathyscope.
//!
//! This crate provides the concrete datasets built from parsed records:
//! - Triangle meshes (centered depth surfaces)
//! - Tracks (ordered points joined by a polyline)
//! - Point clouds (unconnected markers)

// Graphics code intentionally uses casts for indices, colors, and coordinates
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

pub mod heatmap;
pub mod point_cloud;
pub mod track;
pub mod triangle_mesh;

pub use heatmap::{HeatmapQuantity, HEATMAP_QUANTITY};
pub use point_cloud::PointCloud;
pub use track::Track;
pub use triangle_mesh::{DisplayMode, TriangleMesh};
