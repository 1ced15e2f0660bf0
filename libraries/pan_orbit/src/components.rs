use bevy::prelude::*;

// The internal state of the pan-orbit controller
#[derive(Component, Reflect)]
#[reflect(Component)]
pub struct PanOrbitState {
    pub center: Vec3,
    pub radius: f32,
    pub upside_down: bool,
    pub pitch: f32,
    pub yaw: f32,
    /// Input not yet applied because of damping
    pub pending_pan: Vec2,
    pub pending_orbit: Vec2,
    pub pending_zoom: Vec2,
}

impl Default for PanOrbitState {
    fn default() -> Self {
        PanOrbitState {
            center: Vec3::ZERO,
            radius: 1.0,
            upside_down: false,
            pitch: 0.0,
            yaw: 0.0,
            pending_pan: Vec2::ZERO,
            pending_orbit: Vec2::ZERO,
            pending_zoom: Vec2::ZERO,
        }
    }
}

/// The configuration of the pan-orbit controller
#[derive(Component, Reflect)]
#[reflect(Component)]
#[require(PanOrbitState)]
pub struct PanOrbitCamera {
    /// World units per pixel of mouse motion
    pub pan_sensitivity: f32,
    /// Radians per pixel of mouse motion
    pub orbit_sensitivity: f32,
    /// Exponent per pixel of mouse motion
    pub zoom_sensitivity: f32,
    /// For devices with a notched scroll wheel, like desktop mice
    pub scroll_line_sensitivity: f32,
    /// For devices with smooth scrolling, like touchpads
    pub scroll_pixel_sensitivity: f32,
    /// Fraction of the pending motion applied each frame; 1 disables damping
    pub damping: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for PanOrbitCamera {
    fn default() -> Self {
        PanOrbitCamera {
            pan_sensitivity: 0.001,                 // 1000 pixels per world unit
            orbit_sensitivity: 0.1f32.to_radians(), // 0.1 degree per pixel
            zoom_sensitivity: 0.01,
            scroll_line_sensitivity: 16.0, // 1 "line" == 16 "pixels of motion"
            scroll_pixel_sensitivity: 1.0,
            damping: 1.0,
            min_radius: 0.0,
            max_radius: f32::INFINITY,
        }
    }
}
