//! Filled iso-band generation.
//!
//! Every triangle is classified against the ascending iso-value list and cut
//! into sub-polygons, one per band the triangle spans. Cuts run between the
//! two edges whose endpoint samples bracket the iso-value; the sub-polygons
//! (triangles, quads, and one pentagon where the cut sequence passes the
//! middle vertex) are fan-triangulated into the output with fresh vertices.
//! Output vertices are intentionally not shared across polygons: adjacent
//! bands carry different colors at the seam, so the seam vertices must be
//! duplicated. Seamless smooth shading across those duplicates is restored
//! afterwards by [`smooth_band_normals`].

#![allow(clippy::cast_possible_truncation)]

use glam::Vec3;

use contour_core::error::{ContourError, Result};
use contour_core::LookupTable;
use contour_mesh::{normals, MeshBuffer, WeldStats};

use crate::range::ScalarRange;

/// Re-triangulated band geometry handed back to the caller.
///
/// All arrays are per emitted vertex (3 floats each for positions, colors,
/// and normals); `indices` is a plain triangle list into them.
#[derive(Debug, Clone, Default)]
pub struct IsoBands {
    /// Flat vertex positions.
    pub positions: Vec<f32>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
    /// Flat per-vertex RGB colors.
    pub colors: Vec<f32>,
    /// Flat per-vertex normals.
    pub normals: Vec<f32>,
}

impl IsoBands {
    /// Returns the number of emitted vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns the number of emitted triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// One triangle corner with the data interpolated along cut edges.
#[derive(Debug, Clone, Copy)]
struct Corner {
    position: Vec3,
    scalar: f32,
    normal: Vec3,
}

impl Corner {
    fn as_vertex(&self) -> (Vec3, Vec3) {
        (self.position, self.normal)
    }
}

/// One iso-value crossing through a triangle, built fresh per triangle.
///
/// `span` always lies on the (lo, hi) edge; `side` lies on (lo, mid) when the
/// iso-value is below the middle sample and on (mid, hi) otherwise.
#[derive(Debug, Clone, Copy)]
struct BandCut {
    iso: f32,
    above_mid: bool,
    side: (Vec3, Vec3),
    span: (Vec3, Vec3),
}

/// Sorts three corners ascending by scalar, tracking whether the permutation
/// reversed the triangle's winding.
fn sort_by_scalar(mut c: [Corner; 3]) -> ([Corner; 3], bool) {
    let mut reversed = false;
    if c[0].scalar > c[1].scalar {
        c.swap(0, 1);
        reversed = !reversed;
    }
    if c[1].scalar > c[2].scalar {
        c.swap(1, 2);
        reversed = !reversed;
    }
    if c[0].scalar > c[1].scalar {
        c.swap(0, 1);
        reversed = !reversed;
    }
    (c, reversed)
}

/// Interpolates position and normal along an edge at the iso-value.
fn cut_edge(a: &Corner, b: &Corner, iso: f32) -> (Vec3, Vec3) {
    let span = b.scalar - a.scalar;
    let t = if span > 0.0 { (iso - a.scalar) / span } else { 0.0 };
    let normal = a.normal.lerp(b.normal, t).normalize_or_zero();
    (a.position.lerp(b.position, t), normal)
}

/// Appends one polygon, fan-triangulated from its first vertex.
///
/// Each call emits fresh output vertices; `reversed` flips the vertex order
/// so output triangles keep the input triangle's front-face orientation.
fn emit_polygon(out: &mut IsoBands, verts: &[(Vec3, Vec3)], color: Vec3, reversed: bool) {
    let base = (out.positions.len() / 3) as u32;

    let mut push = |&(position, normal): &(Vec3, Vec3)| {
        out.positions.extend_from_slice(&position.to_array());
        out.normals.extend_from_slice(&normal.to_array());
        out.colors.extend_from_slice(&color.to_array());
    };
    if reversed {
        verts.iter().rev().for_each(&mut push);
    } else {
        verts.iter().for_each(&mut push);
    }

    for i in 1..verts.len() as u32 - 1 {
        out.indices.extend_from_slice(&[base, base + i, base + i + 1]);
    }
}

/// Generates filled, per-band-colored geometry for a list of iso-values.
///
/// The iso-value list may arrive in any order; a working copy is sorted
/// ascending (duplicates are kept and yield zero-width bands). Each emitted
/// sub-polygon is colored by the lookup table sampled at the normalized value
/// bounding its lower edge, and dropped when that value falls outside the
/// caller's `[min, max]` — callers restrict visible bands this way without
/// re-running classification. When `range` is `None`, the observed min/max of
/// the scalar array is used.
///
/// Interpolated shading normals come from the mesh's `"normal"` attribute
/// when present, otherwise from freshly computed smooth vertex normals.
pub fn generate_iso_bands(
    mesh: &MeshBuffer,
    scalars: &[f32],
    iso_values: &[f32],
    lut: &LookupTable,
    range: Option<ScalarRange>,
) -> Result<IsoBands> {
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

    let vertex_normals: Vec<Vec3> = if mesh.attribute("normal").is_some() {
        mesh.vec3_attribute("normal")?.to_vec()
    } else {
        let flat = mesh.smooth_vertex_normals()?;
        flat.chunks_exact(3)
            .map(|n| Vec3::new(n[0], n[1], n[2]))
            .collect()
    };

    let range = range.unwrap_or_else(|| ScalarRange::from_samples(scalars));
    let mut isos: Vec<f32> = iso_values.iter().copied().filter(|v| v.is_finite()).collect();
    isos.sort_by(f32::total_cmp);

    let positions = mesh.positions_vec3();
    let mut out = IsoBands {
        positions: Vec::with_capacity(mesh.triangle_count() * 9),
        indices: Vec::with_capacity(mesh.triangle_count() * 3),
        colors: Vec::with_capacity(mesh.triangle_count() * 9),
        normals: Vec::with_capacity(mesh.triangle_count() * 9),
    };
    let band_color = |value: f32| lut.sample(range.normalized(value));

    for tri in mesh.triangles() {
        let corners = [
            corner(positions, &vertex_normals, scalars, tri[0]),
            corner(positions, &vertex_normals, scalars, tri[1]),
            corner(positions, &vertex_normals, scalars, tri[2]),
        ];
        if corners.iter().any(|c| !c.scalar.is_finite()) {
            continue;
        }
        let ([lo, mid, hi], reversed) = sort_by_scalar(corners);

        // Walk the ascending iso-values through this triangle's scalar span.
        // Values at or below the low corner advance the floor (the value that
        // colors the lowest sub-region); values at or above the high corner
        // cannot intersect and end the scan.
        let mut floor_value = range.min;
        let mut cuts: Vec<BandCut> = Vec::new();
        for &iso in &isos {
            if iso <= lo.scalar {
                floor_value = iso;
                continue;
            }
            if iso >= hi.scalar {
                break;
            }
            let above_mid = iso >= mid.scalar;
            let side = if above_mid {
                cut_edge(&mid, &hi, iso)
            } else {
                cut_edge(&lo, &mid, iso)
            };
            cuts.push(BandCut {
                iso,
                above_mid,
                side,
                span: cut_edge(&lo, &hi, iso),
            });
        }

        if cuts.is_empty() {
            // The whole triangle lies inside a single band.
            if range.contains(floor_value) {
                emit_polygon(
                    &mut out,
                    &[lo.as_vertex(), mid.as_vertex(), hi.as_vertex()],
                    band_color(floor_value),
                    reversed,
                );
            }
            continue;
        }

        // Lowest sub-region: triangle at the low corner, or a quad spanning
        // both lower corners when the first cut already passed the middle.
        let first = cuts[0];
        if range.contains(floor_value) {
            let color = band_color(floor_value);
            if first.above_mid {
                emit_polygon(
                    &mut out,
                    &[lo.as_vertex(), mid.as_vertex(), first.side, first.span],
                    color,
                    reversed,
                );
            } else {
                emit_polygon(
                    &mut out,
                    &[lo.as_vertex(), first.side, first.span],
                    color,
                    reversed,
                );
            }
        }

        // Bands between consecutive cuts: quads, except the one band whose
        // cuts straddle the middle vertex, which picks it up as a pentagon.
        for pair in cuts.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if !range.contains(prev.iso) {
                continue;
            }
            let color = band_color(prev.iso);
            if prev.above_mid == next.above_mid {
                emit_polygon(
                    &mut out,
                    &[prev.side, next.side, next.span, prev.span],
                    color,
                    reversed,
                );
            } else {
                emit_polygon(
                    &mut out,
                    &[prev.side, mid.as_vertex(), next.side, next.span, prev.span],
                    color,
                    reversed,
                );
            }
        }

        // Highest sub-region: closes the triangle at the high corner.
        let last = cuts[cuts.len() - 1];
        if range.contains(last.iso) {
            let color = band_color(last.iso);
            if last.above_mid {
                emit_polygon(
                    &mut out,
                    &[last.side, hi.as_vertex(), last.span],
                    color,
                    reversed,
                );
            } else {
                emit_polygon(
                    &mut out,
                    &[last.side, mid.as_vertex(), hi.as_vertex(), last.span],
                    color,
                    reversed,
                );
            }
        }
    }

    log::debug!(
        "iso-bands: {} iso-values over {} triangles, {} vertices / {} triangles out",
        isos.len(),
        mesh.triangle_count(),
        out.vertex_count(),
        out.triangle_count()
    );
    Ok(out)
}

fn corner(positions: &[Vec3], normals: &[Vec3], scalars: &[f32], id: u32) -> Corner {
    let i = id as usize;
    Corner {
        position: positions[i],
        scalar: scalars[i],
        normal: normals[i],
    }
}

/// Recomputes the band geometry's normals for smooth shading.
///
/// Smooth per-vertex normals are derived from the emitted triangles, then the
/// normals of spatially coincident vertices (the duplicates along band seams)
/// are welded so shading reads as one continuous surface.
pub fn smooth_band_normals(bands: &mut IsoBands, epsilon: f32) -> Result<WeldStats> {
    bands.normals = normals::smooth_vertex_normals(&bands.positions, &bands.indices)?;
    normals::weld_coincident_normals(&bands.positions, &mut bands.normals, epsilon)
}
