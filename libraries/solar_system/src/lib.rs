use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

pub mod animation;
pub mod body;
pub mod catalog;
pub mod label;
pub mod locale;
pub mod orbit;
pub mod picking;
pub mod scene;
pub mod sun;

/// Scene, animation and picking. Insert a [`scene::SolarSystemSettings`] resource
/// before adding the group to override the defaults.
pub struct SolarSystemPlugin;

impl PluginGroup for SolarSystemPlugin {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(scene::PlanetScenePlugin)
            .add(body::BodyPlugin)
            .add(orbit::OrbitPlugin)
            .add(label::LabelPlugin)
            .add(sun::SunPlugin)
            .add(animation::AnimationPlugin)
            .add(picking::PickingPlugin)
    }
}
