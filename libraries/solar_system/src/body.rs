use crate::catalog::BodyDescriptor;
use crate::locale::Locale;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

pub struct BodyPlugin;

impl Plugin for BodyPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BodyId>()
            .register_type::<PlanetaryBody>()
            .register_type::<BodyRadius>();
    }
}

/// Stable identity of a catalog entry. Display text lives in the [`Locale`] tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum BodyId {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl BodyId {
    /// Catalog order.
    pub const ALL: [Self; 10] = [
        Self::Sun,
        Self::Mercury,
        Self::Venus,
        Self::Earth,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
        Self::Pluto,
    ];

    /// Looks a body up by any of its localized display names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| {
            Locale::ALL
                .into_iter()
                .any(|locale| locale.body_name(*id) == name)
        })
    }

    pub const fn english_name(self) -> &'static str {
        Locale::English.body_name(self)
    }
}

#[derive(Debug, Copy, Clone, Component, Reflect)]
#[reflect(Component)]
#[require(BodyRadius)]
pub struct PlanetaryBody(pub BodyId);

#[derive(Debug, Copy, Clone, Default, Component, Reflect, Deref)]
#[reflect(Component)]
pub struct BodyRadius(pub f32);

pub fn spawn<'a>(
    commands: &'a mut Commands,
    descriptor: &BodyDescriptor,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    translation: Vec3,
) -> EntityCommands<'a> {
    let mut entity = commands.spawn((
        Name::new(descriptor.english_name),
        PlanetaryBody(descriptor.id),
        BodyRadius(descriptor.radius),
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(translation),
    ));
    if descriptor.is_central() {
        entity.insert(NotShadowCaster);
    }
    entity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_in_every_locale() {
        assert_eq!(BodyId::from_name("Earth"), Some(BodyId::Earth));
        assert_eq!(BodyId::from_name("地球"), Some(BodyId::Earth));
        assert_eq!(BodyId::from_name("冥王星"), Some(BodyId::Pluto));
        assert_eq!(BodyId::from_name("Vulcan"), None);
        assert_eq!(BodyId::from_name(""), None);
    }
}
