use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod builder;
pub mod components;
mod error;
mod settings;

pub use builder::{build_scene, image_from_buffer, SceneAssets, SceneBody, SolarSystemScene};
pub use error::SettingsError;
pub use settings::{CameraSettings, LightingSettings, SolarSystemSettings, StarfieldSettings};

pub struct PlanetScenePlugin;

impl Plugin for PlanetScenePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::SceneCamera>()
            .register_type::<components::OrbitPath>()
            .init_resource::<SolarSystemSettings>()
            .init_resource::<SceneRng>()
            .add_systems(Startup, builder::spawn_solar_system);
    }
}

/// Random source for everything the scene builder randomizes.
#[derive(Resource, Deref, DerefMut)]
pub struct SceneRng(pub ChaCha8Rng);

impl FromWorld for SceneRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world
            .get_resource::<SolarSystemSettings>()
            .and_then(|settings| settings.seed);
        match seed {
            Some(seed) => {
                info!("Seeding scene with {seed}");
                Self(ChaCha8Rng::seed_from_u64(seed))
            }
            None => Self(ChaCha8Rng::from_rng(&mut rand::rng())),
        }
    }
}
