use crate::locale::Locale;
use crate::scene::error::SettingsError;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User-tunable scene settings, optionally loaded from a YAML file. Every field
/// has a default, so a settings file only needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Resource, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SolarSystemSettings {
    /// Seeds orbit phases and surface textures. Random when unset.
    pub seed: Option<u64>,
    pub locale: Locale,
    /// Font file with CJK glyphs for the Chinese locale. Well-known system fonts
    /// are searched when unset.
    pub font: Option<PathBuf>,
    pub show_labels: bool,
    pub draw_orbits: bool,
    /// Gain applied to the central body's emissive color.
    pub sun_glow: f32,
    pub camera: CameraSettings,
    pub lighting: LightingSettings,
    pub starfield: StarfieldSettings,
}

impl Default for SolarSystemSettings {
    fn default() -> Self {
        Self {
            seed: None,
            locale: Locale::default(),
            font: None,
            show_labels: true,
            draw_orbits: true,
            sun_glow: 1.0,
            camera: CameraSettings::default(),
            lighting: LightingSettings::default(),
            starfield: StarfieldSettings::default(),
        }
    }
}

impl SolarSystemSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        debug!("Loading settings from {}", path.display());
        let data = std::fs::read_to_string(path)?;
        Self::from_yaml(&data)
    }

    pub fn from_yaml(data: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml::from_str(data)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CameraSettings {
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of pending camera motion applied each frame.
    pub damping: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            distance: 50.0,
            min_distance: 20.0,
            max_distance: 100.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            damping: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LightingSettings {
    /// sRGB components in `[0, 1]`.
    pub ambient_color: Vec3,
    pub ambient_brightness: f32,
    /// Point light at the origin, in lumens.
    pub sun_intensity: f32,
    pub sun_range: f32,
}

impl Default for LightingSettings {
    fn default() -> Self {
        let ambient = 0x44 as f32 / 255.0;
        Self {
            ambient_color: Vec3::splat(ambient),
            ambient_brightness: 300.0,
            sun_intensity: 5.0e6,
            sun_range: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StarfieldSettings {
    pub count: usize,
    /// Edge length of the cube, centered on the origin, the stars are scattered in.
    pub extent: f32,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            count: 5000,
            extent: 2000.0,
        }
    }
}
