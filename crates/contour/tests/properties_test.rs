//! Property tests for the contouring engine.

use contour::*;
use proptest::prelude::*;

fn grayscale_lut() -> LookupTable {
    let registry = PresetRegistry::new();
    LookupTable::build_default(registry.get("grayscale").unwrap()).unwrap()
}

fn triangle_area(p0: Vec3, p1: Vec3, p2: Vec3) -> f32 {
    (p1 - p0).cross(p2 - p0).length() * 0.5
}

fn band_area(bands: &IsoBands) -> f32 {
    let mut area = 0.0;
    for tri in bands.indices.chunks_exact(3) {
        let p = |i: u32| {
            let i = i as usize * 3;
            Vec3::new(
                bands.positions[i],
                bands.positions[i + 1],
                bands.positions[i + 2],
            )
        };
        area += triangle_area(p(tri[0]), p(tri[1]), p(tri[2]));
    }
    area
}

proptest! {
    /// The emitted sub-polygons of one triangle partition it: their areas sum
    /// to the original triangle's area.
    #[test]
    fn prop_band_areas_partition_triangle(
        coords in prop::array::uniform9(-10.0f32..10.0),
        scalars in prop::array::uniform3(0.0f32..1.0),
        isos in prop::collection::vec(0.0f32..1.0, 0..6),
    ) {
        let mesh = MeshBuffer::new(coords.to_vec(), None).unwrap();
        let p0 = Vec3::new(coords[0], coords[1], coords[2]);
        let p1 = Vec3::new(coords[3], coords[4], coords[5]);
        let p2 = Vec3::new(coords[6], coords[7], coords[8]);
        let area = triangle_area(p0, p1, p2);

        // A range wide enough that no band is clipped away.
        let range = Some(ScalarRange::new(-1.0, 2.0));
        let bands =
            generate_iso_bands(&mesh, &scalars, &isos, &grayscale_lut(), range).unwrap();

        let sum = band_area(&bands);
        prop_assert!(
            (sum - area).abs() <= 1e-3 * (area + 1.0),
            "area {} split into {}",
            area,
            sum
        );
    }

    /// `normalize` is idempotent and pins non-degenerate presets to [0, 1].
    #[test]
    fn prop_normalize_idempotent(
        mut raw in prop::collection::vec(
            (-1000.0f32..1000.0, 0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0),
            2..8,
        ),
    ) {
        raw.sort_by(|a, b| a.0.total_cmp(&b.0));
        let points = raw
            .iter()
            .map(|&(value, r, g, b)| ControlPoint {
                value,
                color: Vec3::new(r, g, b),
            })
            .collect();
        let preset = ColorMapPreset::new("random", points).unwrap();

        let once = preset.normalize();
        let twice = once.normalize();
        for (a, b) in once.points().iter().zip(twice.points()) {
            prop_assert_eq!(a.value, b.value);
            prop_assert_eq!(a.color, b.color);
        }

        if preset.max_value() > preset.min_value() {
            prop_assert_eq!(once.min_value(), 0.0);
            prop_assert_eq!(once.max_value(), 1.0);
        }
    }

    /// Table sampling honors the nearest-grid-point rounding contract: the
    /// sampled color equals the exact color at the rounded grid position.
    #[test]
    fn prop_lut_sample_is_nearest_grid_color(
        raw in prop::collection::vec(
            (0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0),
            2..6,
        ),
        t in 0.0f32..1.0,
        n in 16usize..512,
    ) {
        let mut raw = raw;
        raw.sort_by(|a, b| a.0.total_cmp(&b.0));
        let points = raw
            .iter()
            .map(|&(value, r, g, b)| ControlPoint {
                value,
                color: Vec3::new(r, g, b),
            })
            .collect();
        let preset = ColorMapPreset::new("random", points).unwrap();

        let table = LookupTable::build(&preset, n).unwrap();
        let idx = (t * (n - 1) as f32).round() as usize;
        let grid_t = idx as f32 / (n - 1) as f32;
        let expected = preset.normalize().value_to_color(grid_t).unwrap();
        prop_assert_eq!(table.sample(t), expected);
    }

    /// After welding, coincident duplicates share one normal while isolated
    /// vertices keep theirs.
    #[test]
    fn prop_weld_unifies_exact_duplicates(
        counts in prop::collection::vec(1usize..4, 1..6),
        raw_normals in prop::collection::vec(prop::array::uniform3(-1.0f32..1.0), 18),
    ) {
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut group_ranges = Vec::new();
        let mut next = 0usize;
        for (i, &count) in counts.iter().enumerate() {
            let start = next;
            for _ in 0..count {
                // Groups spaced far apart so only true duplicates bucket together.
                positions.extend_from_slice(&[i as f32 * 10.0, 0.0, 0.0]);
                normals.extend_from_slice(&raw_normals[next % raw_normals.len()]);
                next += 1;
            }
            group_ranges.push(start..next);
        }

        let before = normals.clone();
        weld_coincident_normals(&positions, &mut normals, DEFAULT_WELD_EPSILON).unwrap();

        for range in group_ranges {
            let count = range.len();
            let first = Vec3::new(
                normals[range.start * 3],
                normals[range.start * 3 + 1],
                normals[range.start * 3 + 2],
            );
            for v in range.clone() {
                let n = Vec3::new(normals[v * 3], normals[v * 3 + 1], normals[v * 3 + 2]);
                if count > 1 {
                    prop_assert!((n - first).length() < 1e-6, "unwelded duplicate");
                } else {
                    let old = Vec3::new(before[v * 3], before[v * 3 + 1], before[v * 3 + 2]);
                    prop_assert_eq!(n, old);
                }
            }
        }
    }
}
