use bevy::prelude::*;

pub mod components;
pub mod events;
mod systems;

pub use systems::{clamp_radius, damp};

pub struct PanOrbitCameraPlugin;

/// Camera control systems. Order it against whatever moves the scene the camera looks at.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PanOrbitSet;

impl Plugin for PanOrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::PanOrbitState>()
            .register_type::<components::PanOrbitCamera>()
            .add_systems(
                Update,
                systems::get_blocked_inputs
                    .pipe(systems::pan_orbit_camera)
                    .in_set(PanOrbitSet)
                    .run_if(
                        any_with_component::<components::PanOrbitState>
                            .and(resource_exists::<bevy_egui::EguiUserTextures>),
                    ),
            )
            .add_observer(systems::recenter_camera);
    }
}
