//! Core types for contour-rs.
//!
//! This crate provides the pieces of the contouring engine that depend on
//! nothing else:
//! - [`ContourError`] and the crate-wide [`Result`] alias
//! - [`ColorMapPreset`] control-point color maps and their normalization
//! - [`LookupTable`] discretized color tables
//! - [`PresetRegistry`] with the built-in named presets

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod colormap;
pub mod error;
pub mod lut;
pub mod presets;

pub use colormap::{ColorMapPreset, ControlPoint, NAN_GRAY};
pub use error::{ContourError, Result};
pub use lut::{LookupTable, DEFAULT_LUT_SIZE};
pub use presets::PresetRegistry;

// Re-export glam types for convenience
pub use glam::Vec3;
