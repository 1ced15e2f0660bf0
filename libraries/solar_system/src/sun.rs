use crate::scene::SolarSystemSettings;
use bevy::color::palettes::css;
use bevy::prelude::*;

pub struct SunPlugin;

impl Plugin for SunPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Sun>()
            .register_type::<Sunlight>()
            .add_systems(Startup, setup_lighting);
    }
}

/// Marks the central body.
#[derive(Debug, Copy, Clone, Default, Component, Reflect)]
#[reflect(Component)]
pub struct Sun;

#[derive(Debug, Copy, Clone, Default, Component, Reflect)]
#[reflect(Component)]
pub struct Sunlight;

fn setup_lighting(mut commands: Commands, settings: Res<SolarSystemSettings>) {
    let lighting = &settings.lighting;
    commands.insert_resource(AmbientLight {
        color: Color::srgb(
            lighting.ambient_color.x,
            lighting.ambient_color.y,
            lighting.ambient_color.z,
        ),
        brightness: lighting.ambient_brightness,
    });
    commands.spawn((
        Name::new("Sunlight"),
        Sunlight,
        PointLight {
            color: css::WHITE.into(),
            intensity: lighting.sun_intensity,
            range: lighting.sun_range,
            shadows_enabled: false,
            ..default()
        },
        Transform::default(),
    ));
    debug!(
        "Lighting: ambient {} at {}, sun {} lm",
        lighting.ambient_color, lighting.ambient_brightness, lighting.sun_intensity
    );
}
