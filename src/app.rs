use crate::ui;
use bevy::core_pipeline::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;
use bevy::window::WindowResolution;
use bevy_inspector_egui::DefaultInspectorConfigPlugin;
use pan_orbit::components::{PanOrbitCamera, PanOrbitState};
use pan_orbit::{PanOrbitCameraPlugin, PanOrbitSet};
use solar_system::animation::AnimationSet;
use solar_system::scene::components::SceneCamera;
use solar_system::scene::SolarSystemSettings;
use starrynight::StarryNightPlugin;

#[derive(Default)]
pub(crate) struct AppSettings {
    pub(crate) resolution: WindowResolution,
    pub(crate) with_inspector: bool,
    pub(crate) scene: SolarSystemSettings,
}

pub fn get_app(settings: AppSettings) -> App {
    let mut app = App::new();
    let starfield = StarryNightPlugin {
        star_count: settings.scene.starfield.count,
        extent: settings.scene.starfield.extent,
        seed: settings.scene.seed,
    };
    app.add_plugins((
        DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bevy Orrery".to_string(),
                resolution: settings.resolution,
                ..default()
            }),
            ..default()
        }),
        DefaultInspectorConfigPlugin,
        PanOrbitCameraPlugin,
    ))
    // Must be in place before the solar system plugins read it.
    .insert_resource(settings.scene)
    .add_plugins((
        solar_system::SolarSystemPlugin,
        starfield,
        ui::UiPlugin {
            with_inspector: settings.with_inspector,
        },
    ))
    .insert_resource(ClearColor(Color::BLACK))
    .configure_sets(Update, PanOrbitSet.after(AnimationSet::Tick))
    .add_observer(on_add_scene_camera)
    .add_observer(debug_show_named_entities);
    app
}

fn debug_show_named_entities(trigger: Trigger<OnAdd, Name>, q: Query<&Name>) {
    let Ok(name) = q.get(trigger.entity()) else {
        return;
    };
    debug!("{entity}: {name}", entity = trigger.entity());
}

fn on_add_scene_camera(
    trigger: Trigger<OnAdd, SceneCamera>,
    settings: Res<SolarSystemSettings>,
    mut commands: Commands,
) {
    debug!("Add scene camera to {}", trigger.entity());
    let camera = &settings.camera;
    commands.entity(trigger.entity()).insert((
        PanOrbitCamera {
            damping: camera.damping,
            min_radius: camera.min_distance,
            max_radius: camera.max_distance,
            ..default()
        },
        PanOrbitState {
            radius: camera.distance,
            ..default()
        },
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        Bloom {
            intensity: 0.05,
            ..default()
        },
    ));
}
