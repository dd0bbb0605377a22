//! Face/vertex normal computation and coincident-vertex welding.
//!
//! Band generation emits duplicate vertices along band seams (adjacent bands
//! need different colors at the same position), so a plain per-vertex normal
//! pass leaves a visible shading crease there. Welding buckets vertices by
//! quantized position and unifies the normals in each bucket without touching
//! topology: the vertices stay distinct entries, only their normals agree.

#![allow(clippy::cast_possible_truncation)]

use std::collections::HashMap;

use glam::Vec3;

use contour_core::error::{ContourError, Result};

use crate::buffer::MeshBuffer;

/// Quantization step used to weld coincident vertices.
pub const DEFAULT_WELD_EPSILON: f32 = 1e-6;

/// Substitute for a zero-length normal.
pub const FALLBACK_NORMAL: Vec3 = Vec3::Z;

/// Counters reported by a welding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeldStats {
    /// Number of distinct position buckets.
    pub buckets: usize,
    /// Number of vertices whose normal was replaced by a bucket average.
    pub welded_vertices: usize,
}

fn read_vec3(flat: &[f32], index: usize) -> Vec3 {
    let i = index * 3;
    Vec3::new(flat[i], flat[i + 1], flat[i + 2])
}

fn write_vec3(flat: &mut [f32], index: usize, v: Vec3) {
    let i = index * 3;
    flat[i] = v.x;
    flat[i + 1] = v.y;
    flat[i + 2] = v.z;
}

fn check_triangle_arrays(positions: &[f32], indices: &[u32]) -> Result<usize> {
    if positions.len() % 3 != 0 {
        return Err(ContourError::AttributeSizeMismatch {
            name: "position".to_string(),
            expected: 3,
            actual: positions.len(),
        });
    }
    let vertex_count = positions.len() / 3;
    if indices.len() % 3 != 0 {
        return Err(ContourError::AttributeSizeMismatch {
            name: "index".to_string(),
            expected: 3,
            actual: indices.len(),
        });
    }
    for &i in indices {
        if i as usize >= vertex_count {
            return Err(ContourError::IndexOutOfRange {
                kind: "vertex",
                index: i as usize,
                bound: vertex_count,
            });
        }
    }
    Ok(vertex_count)
}

/// Computes one unit normal per triangle via the cross product of two edges.
///
/// Degenerate triangles (zero area) get a zero normal at this layer; the
/// per-vertex pass substitutes [`FALLBACK_NORMAL`] where nothing accumulates.
pub fn face_normals(positions: &[f32], indices: &[u32]) -> Result<Vec<Vec3>> {
    check_triangle_arrays(positions, indices)?;

    let mut normals = Vec::with_capacity(indices.len() / 3);
    for tri in indices.chunks_exact(3) {
        let p0 = read_vec3(positions, tri[0] as usize);
        let p1 = read_vec3(positions, tri[1] as usize);
        let p2 = read_vec3(positions, tri[2] as usize);
        normals.push((p1 - p0).cross(p2 - p0).normalize_or_zero());
    }
    Ok(normals)
}

/// Computes smooth per-vertex normals.
///
/// Each vertex accumulates the unit normals of its incident triangles, the
/// sum is divided by the incidence count and re-normalized. A vertex with no
/// incident triangles, or whose contributions cancel to a zero-length vector,
/// falls back to [`FALLBACK_NORMAL`].
///
/// Returns a flat `3 * vertex_count` array ready to store as an attribute.
pub fn smooth_vertex_normals(positions: &[f32], indices: &[u32]) -> Result<Vec<f32>> {
    let vertex_count = check_triangle_arrays(positions, indices)?;

    let mut sums = vec![Vec3::ZERO; vertex_count];
    let mut counts = vec![0u32; vertex_count];

    for tri in indices.chunks_exact(3) {
        let p0 = read_vec3(positions, tri[0] as usize);
        let p1 = read_vec3(positions, tri[1] as usize);
        let p2 = read_vec3(positions, tri[2] as usize);
        let n = (p1 - p0).cross(p2 - p0).normalize_or_zero();

        for &vi in tri {
            sums[vi as usize] += n;
            counts[vi as usize] += 1;
        }
    }

    let mut out = Vec::with_capacity(vertex_count * 3);
    for (sum, count) in sums.iter().zip(&counts) {
        #[allow(clippy::cast_precision_loss)]
        let averaged = if *count > 0 { *sum / *count as f32 } else { Vec3::ZERO };
        let mut n = averaged.normalize_or_zero();
        if n == Vec3::ZERO {
            n = FALLBACK_NORMAL;
        }
        out.extend_from_slice(&n.to_array());
    }
    Ok(out)
}

/// Welds the normals of spatially coincident vertices.
///
/// Positions are quantized to `epsilon` and hashed into buckets keyed by the
/// quantized integer tuple. Every vertex in a bucket with more than one
/// member gets the bucket's averaged, re-normalized normal. Topology is left
/// untouched.
pub fn weld_coincident_normals(
    positions: &[f32],
    normals: &mut [f32],
    epsilon: f32,
) -> Result<WeldStats> {
    if positions.len() != normals.len() || positions.len() % 3 != 0 {
        return Err(ContourError::AttributeSizeMismatch {
            name: "normal".to_string(),
            expected: positions.len(),
            actual: normals.len(),
        });
    }
    let vertex_count = positions.len() / 3;
    let inv_eps = f64::from(epsilon).recip();

    let quantize = |v: f32| (f64::from(v) * inv_eps).round() as i64;

    let mut buckets: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::with_capacity(vertex_count);
    for i in 0..vertex_count {
        let p = read_vec3(positions, i);
        let key = (quantize(p.x), quantize(p.y), quantize(p.z));
        buckets.entry(key).or_default().push(i);
    }

    let mut welded_vertices = 0;
    for members in buckets.values() {
        if members.len() < 2 {
            continue;
        }
        let sum: Vec3 = members.iter().map(|&i| read_vec3(normals, i)).sum();
        #[allow(clippy::cast_precision_loss)]
        let mut averaged = (sum / members.len() as f32).normalize_or_zero();
        if averaged == Vec3::ZERO {
            averaged = FALLBACK_NORMAL;
        }
        for &i in members {
            write_vec3(normals, i, averaged);
        }
        welded_vertices += members.len();
    }

    let stats = WeldStats {
        buckets: buckets.len(),
        welded_vertices,
    };
    log::debug!(
        "normal weld: {} vertices in {} buckets, {} welded",
        vertex_count,
        stats.buckets,
        stats.welded_vertices
    );
    Ok(stats)
}

impl MeshBuffer {
    /// Computes one unit normal per triangle of this mesh.
    pub fn face_normals(&self) -> Result<Vec<Vec3>> {
        if self.vertex_count() == 0 {
            return Err(ContourError::MissingGeometry("mesh has no positions"));
        }
        face_normals(self.positions(), &self.triangle_indices())
    }

    /// Computes smooth per-vertex normals for this mesh.
    pub fn smooth_vertex_normals(&self) -> Result<Vec<f32>> {
        if self.vertex_count() == 0 {
            return Err(ContourError::MissingGeometry("mesh has no positions"));
        }
        smooth_vertex_normals(self.positions(), &self.triangle_indices())
    }
}
