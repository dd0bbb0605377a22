//! contour-rs: a scalar-field contouring engine for triangulated meshes.
//!
//! Given per-vertex scalar samples and a list of iso-values, the engine
//! produces polylines tracing each iso-value and a re-triangulated surface
//! partitioned into colored bands between consecutive iso-values, plus
//! smooth shading normals welded across band seams.
//!
//! # Quick Start
//!
//! ```
//! use contour::*;
//!
//! fn main() -> Result<()> {
//!     // A two-triangle unit square with a left-to-right scalar ramp.
//!     let mesh = MeshBuffer::new(
//!         vec![
//!             0.0, 0.0, 0.0, //
//!             1.0, 0.0, 0.0, //
//!             1.0, 1.0, 0.0, //
//!             0.0, 1.0, 0.0,
//!         ],
//!         Some(vec![0, 1, 2, 0, 2, 3]),
//!     )?;
//!     let scalars = [0.0, 1.0, 1.0, 0.0];
//!
//!     // Color through a built-in preset, discretized once.
//!     let registry = PresetRegistry::new();
//!     let lut = LookupTable::build_default(registry.get("viridis").unwrap())?;
//!
//!     // Iso-lines at two levels, filled bands between three.
//!     let lines = extract_iso_lines(&mesh, &scalars, &[0.3, 0.6], &lut, None)?;
//!     let mut bands = generate_iso_bands(&mesh, &scalars, &[0.25, 0.5, 0.75], &lut, None)?;
//!     smooth_band_normals(&mut bands, DEFAULT_WELD_EPSILON)?;
//!
//!     assert!(lines.segment_count() > 0);
//!     assert!(!bands.is_empty());
//!     Ok(())
//! }
//! ```
//!
//! # Pipeline
//!
//! - A [`ColorMapPreset`] (built-in, or parsed from a collaborator's JSON
//!   document) is discretized into a [`LookupTable`].
//! - [`extract_iso_lines`] walks every triangle per iso-value and emits
//!   interpolated edge-crossing segments, grouped per iso-value with one
//!   color each.
//! - [`generate_iso_bands`] classifies every triangle against the full
//!   iso-value list and emits per-band-colored sub-polygons, fan-triangulated
//!   with duplicated seam vertices.
//! - [`smooth_band_normals`] recomputes smooth vertex normals over the band
//!   geometry and welds the normals of coincident seam duplicates.
//!
//! All passes are synchronous, deterministic, and carry no state between
//! calls; re-invoking after a parameter change recomputes from scratch.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod iso_bands;
pub mod iso_lines;
pub mod range;

// Re-export core types
pub use contour_core::{
    ColorMapPreset, ContourError, ControlPoint, LookupTable, PresetRegistry, Result,
    DEFAULT_LUT_SIZE, NAN_GRAY,
};

// Re-export mesh types
pub use contour_mesh::{
    weld_coincident_normals, Attribute, AttributeData, MeshBuffer, WeldStats,
    DEFAULT_WELD_EPSILON, FALLBACK_NORMAL,
};

pub use iso_bands::{generate_iso_bands, smooth_band_normals, IsoBands};
pub use iso_lines::{extract_iso_lines, march_triangle, EdgeCut, IsoLines};
pub use range::ScalarRange;

// Re-export glam types for convenience
pub use glam::Vec3;
