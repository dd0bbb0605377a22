//! Color-map presets: ordered scalar/RGB control points.
//!
//! A preset is a piecewise-linear color map described by control points
//! `(value, r, g, b)` with non-decreasing values. Collaborators hand presets
//! over either as flat `[value, r, g, b, ...]` slices or as JSON documents of
//! the form `{ "Name": ..., "RGBPoints": [...], "NanColor": [r, g, b] }`.

use glam::Vec3;
use serde::Deserialize;

use crate::error::{ContourError, Result};

/// Fallback color for NaN samples when a preset configures no NaN color.
pub const NAN_GRAY: Vec3 = Vec3::new(0.5, 0.5, 0.5);

/// A single control point: a scalar value and the color assigned to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Scalar value this control point anchors.
    pub value: f32,
    /// RGB color at this value, each component in [0, 1].
    pub color: Vec3,
}

/// An ordered list of control points defining a piecewise-linear color map.
#[derive(Debug, Clone)]
pub struct ColorMapPreset {
    name: String,
    points: Vec<ControlPoint>,
    nan_color: Option<Vec3>,
}

/// Raw preset document shape, as produced by preset collections.
#[derive(Deserialize)]
struct RawPreset {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "RGBPoints")]
    rgb_points: Vec<f32>,
    #[serde(rename = "NanColor", default)]
    nan_color: Option<[f32; 3]>,
}

impl ColorMapPreset {
    /// Creates a preset from explicit control points.
    ///
    /// Returns [`ContourError::InvalidPreset`] if fewer than 2 control points
    /// are supplied.
    pub fn new(name: impl Into<String>, points: Vec<ControlPoint>) -> Result<Self> {
        let preset = Self {
            name: name.into(),
            points,
            nan_color: None,
        };
        preset.validate()?;
        Ok(preset)
    }

    /// Creates a preset from a flat `[value, r, g, b, ...]` slice.
    ///
    /// The slice length must be a multiple of 4 and describe at least 2
    /// control points.
    pub fn from_flat(name: impl Into<String>, flat: &[f32]) -> Result<Self> {
        let name = name.into();
        if flat.len() % 4 != 0 {
            return Err(ContourError::InvalidPreset {
                name,
                points: flat.len() / 4,
            });
        }
        let points = flat
            .chunks_exact(4)
            .map(|q| ControlPoint {
                value: q[0],
                color: Vec3::new(q[1], q[2], q[3]),
            })
            .collect();
        Self::new(name, points)
    }

    /// Parses a preset from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawPreset = serde_json::from_str(json)?;
        let mut preset = Self::from_flat(raw.name, &raw.rgb_points)?;
        preset.nan_color = raw.nan_color.map(Vec3::from_array);
        Ok(preset)
    }

    /// Sets the color substituted for NaN values.
    #[must_use]
    pub fn with_nan_color(mut self, color: Vec3) -> Self {
        self.nan_color = Some(color);
        self
    }

    /// Returns the preset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the control points.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Returns the configured NaN color, if any.
    pub fn nan_color(&self) -> Option<Vec3> {
        self.nan_color
    }

    /// Returns the smallest control-point value.
    pub fn min_value(&self) -> f32 {
        self.points.first().map_or(f32::NAN, |p| p.value)
    }

    /// Returns the largest control-point value.
    pub fn max_value(&self) -> f32 {
        self.points.last().map_or(f32::NAN, |p| p.value)
    }

    fn validate(&self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(ContourError::InvalidPreset {
                name: self.name.clone(),
                points: self.points.len(),
            });
        }
        Ok(())
    }

    /// Rescales all control-point values into [0, 1].
    ///
    /// A preset whose values already span exactly [0, 1] comes back unchanged,
    /// as does a degenerate preset where every control point carries the same
    /// value (a constant scalar field is legitimate data, not an error).
    /// Applying `normalize` twice yields the same preset as applying it once.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let min = self.min_value();
        let max = self.max_value();
        let span = max - min;
        if span == 0.0 || !span.is_finite() {
            return self.clone();
        }

        let points = self
            .points
            .iter()
            .map(|p| ControlPoint {
                value: (p.value - min) / span,
                color: p.color,
            })
            .collect();
        Self {
            name: self.name.clone(),
            points,
            nan_color: self.nan_color,
        }
    }

    /// Maps a normalized value in [0, 1] to an interpolated RGB color.
    ///
    /// NaN maps to the configured NaN color, or [`NAN_GRAY`] when none is set.
    /// Values outside the control-point span clamp to the first/last color.
    /// Control points are assumed few (tens at most), so the bracketing pair
    /// is located by linear scan.
    ///
    /// Returns [`ContourError::ValueOutOfRange`] for non-NaN values outside
    /// [0, 1] and [`ContourError::InvalidPreset`] for presets with fewer than
    /// 2 control points.
    pub fn value_to_color(&self, value: f32) -> Result<Vec3> {
        self.validate()?;

        if value.is_nan() {
            return Ok(self.nan_color.unwrap_or(NAN_GRAY));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ContourError::ValueOutOfRange { value });
        }

        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if value <= first.value {
            return Ok(first.color);
        }
        if value >= last.value {
            return Ok(last.color);
        }

        for pair in self.points.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if value <= hi.value {
                let span = hi.value - lo.value;
                let frac = if span > 0.0 { (value - lo.value) / span } else { 0.0 };
                return Ok(lo.color.lerp(hi.color, frac));
            }
        }

        // Unreachable: value < last.value guarantees a bracketing pair above.
        Ok(last.color)
    }
}
