//! Mesh buffers for contour-rs.
//!
//! [`MeshBuffer`] is the typed-array container the contouring passes consume:
//! flat positions, optional triangle indices, and named per-vertex attributes
//! with a tagged element type. [`normals`] derives face and smooth vertex
//! normals from it and welds the normals of coincident vertices.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod attribute;
pub mod buffer;
pub mod normals;

pub use attribute::{Attribute, AttributeData};
pub use buffer::MeshBuffer;
pub use normals::{
    face_normals, smooth_vertex_normals, weld_coincident_normals, WeldStats,
    DEFAULT_WELD_EPSILON, FALLBACK_NORMAL,
};
