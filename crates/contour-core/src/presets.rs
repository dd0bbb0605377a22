//! Built-in color-map presets and the preset registry.
//!
//! Host UIs pick presets by name; the registry ships the common defaults and
//! accepts collaborator-supplied presets (e.g. parsed from JSON documents).

use std::collections::HashMap;

use glam::Vec3;

use crate::colormap::{ColorMapPreset, ControlPoint};

/// Registry for managing color-map presets by name.
#[derive(Default)]
pub struct PresetRegistry {
    presets: HashMap<String, ColorMapPreset>,
}

impl PresetRegistry {
    /// Creates a new registry populated with the default presets.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(evenly_spaced(
            "viridis",
            &[
                Vec3::new(0.267, 0.004, 0.329),
                Vec3::new(0.282, 0.140, 0.457),
                Vec3::new(0.253, 0.265, 0.529),
                Vec3::new(0.206, 0.371, 0.553),
                Vec3::new(0.163, 0.471, 0.558),
                Vec3::new(0.127, 0.566, 0.550),
                Vec3::new(0.134, 0.658, 0.517),
                Vec3::new(0.266, 0.749, 0.440),
                Vec3::new(0.477, 0.821, 0.318),
                Vec3::new(0.741, 0.873, 0.150),
                Vec3::new(0.993, 0.906, 0.144),
            ],
        ));

        self.register(evenly_spaced(
            "blues",
            &[
                Vec3::new(0.969, 0.984, 1.000),
                Vec3::new(0.871, 0.922, 0.969),
                Vec3::new(0.776, 0.859, 0.937),
                Vec3::new(0.620, 0.792, 0.882),
                Vec3::new(0.419, 0.682, 0.839),
                Vec3::new(0.259, 0.573, 0.776),
                Vec3::new(0.129, 0.443, 0.710),
                Vec3::new(0.031, 0.318, 0.612),
                Vec3::new(0.031, 0.188, 0.420),
            ],
        ));

        self.register(evenly_spaced(
            "coolwarm",
            &[
                Vec3::new(0.230, 0.299, 0.754),
                Vec3::new(0.552, 0.690, 0.996),
                Vec3::new(0.866, 0.866, 0.866),
                Vec3::new(0.956, 0.604, 0.486),
                Vec3::new(0.706, 0.016, 0.150),
            ],
        ));

        self.register(evenly_spaced(
            "rainbow",
            &[
                Vec3::new(0.5, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
            ],
        ));

        self.register(evenly_spaced(
            "grayscale",
            &[Vec3::ZERO, Vec3::ONE],
        ));
    }

    /// Registers a preset, replacing any existing preset with the same name.
    pub fn register(&mut self, preset: ColorMapPreset) {
        self.presets.insert(preset.name().to_string(), preset);
    }

    /// Gets a preset by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColorMapPreset> {
        self.presets.get(name)
    }

    /// Returns all registered preset names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }
}

/// Builds a preset whose control points are evenly spaced over [0, 1].
#[allow(clippy::cast_precision_loss)]
fn evenly_spaced(name: &str, colors: &[Vec3]) -> ColorMapPreset {
    let n = colors.len().max(2);
    let points = colors
        .iter()
        .enumerate()
        .map(|(i, &color)| ControlPoint {
            value: i as f32 / (n - 1) as f32,
            color,
        })
        .collect();
    // Built-in tables all have at least 2 entries.
    ColorMapPreset::new(name, points).expect("built-in preset")
}
