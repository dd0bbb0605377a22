//! Discretized color lookup tables.
//!
//! A [`LookupTable`] is a fixed-size, uniformly sampled discretization of a
//! [`ColorMapPreset`](crate::colormap::ColorMapPreset). Sampling it is a
//! cheap O(1) nearest-entry pick, used wherever colors are needed repeatedly
//! for normalized scalars instead of re-walking the preset's control points.

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use glam::Vec3;

use crate::colormap::{ColorMapPreset, NAN_GRAY};
use crate::error::Result;

/// Default number of table entries.
pub const DEFAULT_LUT_SIZE: usize = 256;

/// A fixed-size color table sampled uniformly over [0, 1]; immutable once built.
#[derive(Debug, Clone)]
pub struct LookupTable {
    colors: Vec<Vec3>,
}

impl LookupTable {
    /// Builds a table of `n` entries from a preset.
    ///
    /// The preset is normalized first, then sampled at `n` evenly spaced
    /// values from 0 to 1 inclusive. `n` is clamped below at 2 so that both
    /// ends of the map are represented.
    pub fn build(preset: &ColorMapPreset, n: usize) -> Result<Self> {
        let n = n.max(2);
        let normalized = preset.normalize();

        let mut colors = Vec::with_capacity(n);
        for i in 0..n {
            let t = i as f32 / (n - 1) as f32;
            colors.push(normalized.value_to_color(t)?);
        }
        Ok(Self { colors })
    }

    /// Builds a table with [`DEFAULT_LUT_SIZE`] entries.
    pub fn build_default(preset: &ColorMapPreset) -> Result<Self> {
        Self::build(preset, DEFAULT_LUT_SIZE)
    }

    /// Samples the table at a normalized value.
    ///
    /// Picks the nearest entry by rounding `value * (len - 1)`, with the
    /// index clamped to bounds. NaN maps to the fixed neutral gray.
    #[must_use]
    pub fn sample(&self, value: f32) -> Vec3 {
        if value.is_nan() {
            return NAN_GRAY;
        }
        let scaled = value * (self.colors.len() - 1) as f32;
        let idx = (scaled.round().max(0.0) as usize).min(self.colors.len() - 1);
        self.colors[idx]
    }

    /// Returns the number of table entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the table has no entries. Never true for built tables.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the table entries.
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::ControlPoint;

    fn two_point_preset() -> ColorMapPreset {
        ColorMapPreset::new(
            "red-green",
            vec![
                ControlPoint {
                    value: 0.0,
                    color: Vec3::new(1.0, 0.0, 0.0),
                },
                ControlPoint {
                    value: 1.0,
                    color: Vec3::new(0.0, 1.0, 0.0),
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_build_covers_both_ends() {
        let table = LookupTable::build(&two_point_preset(), 5).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.sample(0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(table.sample(1.0), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_build_normalizes_unnormalized_presets() {
        let preset =
            ColorMapPreset::from_flat("shifted", &[10.0, 1.0, 0.0, 0.0, 20.0, 0.0, 1.0, 0.0])
                .unwrap();
        let table = LookupTable::build_default(&preset).unwrap();
        assert_eq!(table.sample(0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(table.sample(1.0), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_sample_rounds_to_nearest_entry() {
        let table = LookupTable::build(&two_point_preset(), 3).unwrap();
        // Entries at t = 0.0, 0.5, 1.0; value 0.6 rounds to the middle entry.
        let mid = table.colors()[1];
        assert_eq!(table.sample(0.6), mid);
        assert_eq!(table.sample(0.4), mid);
    }

    #[test]
    fn test_sample_clamps_out_of_bound_values() {
        let table = LookupTable::build(&two_point_preset(), 4).unwrap();
        assert_eq!(table.sample(-2.0), table.colors()[0]);
        assert_eq!(table.sample(3.0), table.colors()[3]);
    }

    #[test]
    fn test_sample_nan_is_neutral_gray() {
        let table = LookupTable::build_default(&two_point_preset()).unwrap();
        assert_eq!(table.sample(f32::NAN), NAN_GRAY);
    }

    #[test]
    fn test_sample_converges_to_value_to_color() {
        // On a sufficiently fine table, nearest-entry sampling approaches the
        // exact piecewise-linear interpolation.
        let preset = two_point_preset();
        let table = LookupTable::build(&preset, 4096).unwrap();
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            let exact = preset.value_to_color(t).unwrap();
            let approx = table.sample(t);
            assert!(
                (exact - approx).length() < 1e-3,
                "diverged at t={t}: {exact:?} vs {approx:?}"
            );
        }
    }
}
