//! Iso-line extraction over triangulated meshes ("marching triangles").
//!
//! For each requested iso-value, every triangle is classified against the
//! value; a triangle whose samples bracket it contributes exactly one line
//! segment, interpolated along the two crossing edges. Segments are grouped
//! per iso-value and are not stitched into connected polylines — that
//! responsibility, if needed, belongs to a consumer.

use glam::Vec3;

use contour_core::error::{ContourError, Result};
use contour_core::LookupTable;
use contour_mesh::MeshBuffer;

use crate::range::ScalarRange;

/// One edge crossing: the edge's vertex ids and the interpolation fraction
/// from `v0` toward `v1` at which the iso-value is met.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCut {
    /// Edge start vertex id.
    pub v0: u32,
    /// Edge end vertex id.
    pub v1: u32,
    /// Fraction in [0, 1] along `v0 -> v1`.
    pub t: f32,
}

impl EdgeCut {
    /// Interpolates a per-vertex quantity at this cut.
    #[must_use]
    pub fn lerp(&self, values: &[Vec3]) -> Vec3 {
        values[self.v0 as usize].lerp(values[self.v1 as usize], self.t)
    }
}

/// Iso-line geometry handed back to the caller.
///
/// `positions` holds pairs of consecutive points, one pair per drawn segment;
/// `colors` holds one RGB triple per requested iso-value (also for iso-values
/// that produced no segments, keeping the color/iso pairing unambiguous).
#[derive(Debug, Clone, Default)]
pub struct IsoLines {
    /// Flat endpoint positions, `6 * segment_count` floats.
    pub positions: Vec<f32>,
    /// Flat RGB colors, one triple per iso-value.
    pub colors: Vec<f32>,
    /// Number of segments generated for each iso-value, in iso-value order.
    pub segments_per_iso: Vec<usize>,
}

impl IsoLines {
    /// Returns the total number of line segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.positions.len() / 6
    }
}

/// Classifies one triangle against an iso-value.
///
/// A vertex whose sample equals the iso-value counts as above it (`>=`), so a
/// vertex-touching crossing yields one segment rather than two. Triangles
/// entirely above or below, and triangles carrying a non-finite sample,
/// produce no segment.
///
/// Returns the two edge cuts whose endpoint samples bracket the iso-value.
///
/// # Panics
/// Panics if a vertex id in `tri` is out of bounds for `scalars`.
#[must_use]
pub fn march_triangle(tri: [u32; 3], scalars: &[f32], iso: f32) -> Option<[EdgeCut; 2]> {
    let s = [
        scalars[tri[0] as usize],
        scalars[tri[1] as usize],
        scalars[tri[2] as usize],
    ];
    if s.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let above = [s[0] >= iso, s[1] >= iso, s[2] >= iso];
    if above == [true; 3] || above == [false; 3] {
        return None;
    }

    let mut cuts = [EdgeCut { v0: 0, v1: 0, t: 0.0 }; 2];
    let mut found = 0;
    for (i, j) in [(0, 1), (1, 2), (2, 0)] {
        if above[i] != above[j] {
            // Samples differ in classification, so the denominator is nonzero.
            let t = (iso - s[i]) / (s[j] - s[i]);
            cuts[found] = EdgeCut {
                v0: tri[i],
                v1: tri[j],
                t,
            };
            found += 1;
        }
    }
    debug_assert_eq!(found, 2);
    Some(cuts)
}

/// Extracts iso-line segments for a list of iso-values.
///
/// Segments are grouped per iso-value in the order the caller supplied the
/// values; each iso-value is painted uniformly with the lookup-table color at
/// its normalized position. When `range` is `None`, the observed min/max of
/// the scalar array is used.
pub fn extract_iso_lines(
    mesh: &MeshBuffer,
    scalars: &[f32],
    iso_values: &[f32],
    lut: &LookupTable,
    range: Option<ScalarRange>,
) -> Result<IsoLines> {
    if mesh.vertex_count() == 0 {
        return Err(ContourError::MissingGeometry("mesh has no positions"));
    }
    if scalars.len() != mesh.vertex_count() {
        return Err(ContourError::AttributeSizeMismatch {
            name: "scalar".to_string(),
            expected: mesh.vertex_count(),
            actual: scalars.len(),
        });
    }

    let range = range.unwrap_or_else(|| ScalarRange::from_samples(scalars));
    let positions = mesh.positions_vec3();
    let indices = mesh.triangle_indices();

    let mut out = IsoLines::default();
    for &iso in iso_values {
        let color = lut.sample(range.normalized(iso));
        out.colors.extend_from_slice(&color.to_array());

        let mut segments = 0;
        for tri in indices.chunks_exact(3) {
            let Some(cuts) = march_triangle([tri[0], tri[1], tri[2]], scalars, iso) else {
                continue;
            };
            for cut in cuts {
                let p = cut.lerp(positions);
                out.positions.extend_from_slice(&p.to_array());
            }
            segments += 1;
        }
        out.segments_per_iso.push(segments);
    }

    log::debug!(
        "iso-lines: {} iso-values over {} triangles, {} segments",
        iso_values.len(),
        mesh.triangle_count(),
        out.segment_count()
    );
    Ok(out)
}
