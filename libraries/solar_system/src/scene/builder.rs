use crate::body::{self, BodyId};
use crate::catalog::{catalog, BodyDescriptor};
use crate::orbit::{Orbit, OrbitState};
use crate::scene::components::{BodyLabel, OrbitPath, SceneCamera};
use crate::scene::{SceneRng, SolarSystemSettings};
use crate::sun::Sun;
use bevy::ecs::system::SystemParam;
use bevy::image::Image;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use procedural_texture::image::RgbaImage;
use procedural_texture::TextureSynthesizer;
use rand::Rng;

const SPHERE_SECTORS: u32 = 32;
const SPHERE_STACKS: u32 = 32;
const ORBIT_PATH_COLOR: Color = Color::srgb(0x44 as f32 / 255.0, 0x44 as f32 / 255.0, 0x44 as f32 / 255.0);
const SUN_EMISSIVE: LinearRgba = LinearRgba::rgb(0.5, 0.5, 0.0);

/// Everything the scene builder spawned, keyed by body.
#[derive(Debug, Clone, Resource)]
pub struct SolarSystemScene {
    pub bodies: Vec<SceneBody>,
    pub camera: Entity,
}

#[derive(Debug, Clone, Copy)]
pub struct SceneBody {
    pub id: BodyId,
    pub entity: Entity,
    pub label: Entity,
    pub orbit_path: Option<Entity>,
    pub orbit: Option<Orbit>,
}

impl SolarSystemScene {
    pub fn orbiting(&self) -> impl Iterator<Item = &SceneBody> {
        self.bodies.iter().filter(|body| body.orbit.is_some())
    }
}

#[derive(SystemParam)]
pub struct SceneAssets<'w> {
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    images: ResMut<'w, Assets<Image>>,
}

pub(super) fn spawn_solar_system(
    mut commands: Commands,
    mut assets: SceneAssets,
    mut rng: ResMut<SceneRng>,
    settings: Res<SolarSystemSettings>,
) {
    let scene = build_scene(
        &mut commands,
        &mut assets,
        catalog(),
        &mut rng.0,
        &settings,
    );
    info!(
        "Spawned {} bodies ({} orbiting)",
        scene.bodies.len(),
        scene.orbiting().count()
    );
    commands.insert_resource(scene);
}

pub fn build_scene<R: Rng>(
    commands: &mut Commands,
    assets: &mut SceneAssets,
    descriptors: &[BodyDescriptor],
    rng: &mut R,
    settings: &SolarSystemSettings,
) -> SolarSystemScene {
    let mut synth = TextureSynthesizer::new(rng);
    let orbit_material = assets.materials.add(StandardMaterial {
        base_color: ORBIT_PATH_COLOR,
        unlit: true,
        ..default()
    });

    let mut bodies = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let radius = descriptor.radius;
        let surface = assets
            .images
            .add(image_from_buffer(synth.surface(descriptor.color, descriptor.pattern)));
        let mesh = assets
            .meshes
            .add(Sphere::new(radius).mesh().uv(SPHERE_SECTORS, SPHERE_STACKS));
        let glow = descriptor.is_central().then_some(settings.sun_glow);
        let material = assets.materials.add(surface_material(surface, glow));

        let orbit = descriptor.orbit();
        let state = orbit.map(|_| OrbitState::random(synth.rng_mut()));
        let translation = match (orbit, state) {
            (Some(orbit), Some(state)) => orbit.position(state.angle),
            _ => Vec3::ZERO,
        };

        let mut entity = body::spawn(commands, descriptor, mesh, material, translation);
        if let (Some(orbit), Some(state)) = (orbit, state) {
            entity.insert((orbit, state));
        }
        if descriptor.is_central() {
            entity.insert(Sun);
        }
        let entity = entity.id();

        let label_texture = assets
            .images
            .add(image_from_buffer(synth.label(descriptor.english_name)));
        let label = commands
            .spawn((
                Name::new(format!("{} (Label)", descriptor.english_name)),
                BodyLabel,
                Mesh3d(assets.meshes.add(Rectangle::new(4.0 * radius, 2.0 * radius))),
                MeshMaterial3d(assets.materials.add(label_material(label_texture))),
                Transform::from_xyz(0.0, radius + 1.0, 0.0),
                NotShadowCaster,
            ))
            .set_parent(entity)
            .id();

        let orbit_path = orbit.map(|orbit| {
            commands
                .spawn((
                    Name::new(format!("{} (Orbit)", descriptor.english_name)),
                    OrbitPath,
                    Mesh3d(assets.meshes.add(orbit.path_mesh())),
                    MeshMaterial3d(orbit_material.clone()),
                    Transform::default(),
                    NotShadowCaster,
                ))
                .id()
        });

        debug!(
            "Spawned {} (r = {}, orbit = {}, {})",
            descriptor.english_name, radius, descriptor.orbit_radius, descriptor.pattern
        );
        bodies.push(SceneBody {
            id: descriptor.id,
            entity,
            label,
            orbit_path,
            orbit,
        });
    }

    let camera = commands
        .spawn((
            Name::new("Camera"),
            SceneCamera,
            Transform::from_xyz(0.0, 0.0, settings.camera.distance)
                .looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id();

    SolarSystemScene { bodies, camera }
}

pub fn image_from_buffer(buffer: RgbaImage) -> Image {
    let (width, height) = buffer.dimensions();
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        buffer.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

fn surface_material(texture: Handle<Image>, glow: Option<f32>) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: Some(texture),
        perceptual_roughness: 0.5,
        reflectance: 0.5,
        emissive: glow.map_or(LinearRgba::BLACK, |gain| SUN_EMISSIVE * gain),
        ..default()
    }
}

fn label_material(texture: Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: Some(texture),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyRadius, PlanetaryBody};
    use crate::scene::PlanetScenePlugin;
    use procedural_texture::{LABEL_HEIGHT, LABEL_WIDTH, SURFACE_SIZE};

    fn app(seed: u64) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .insert_resource(SolarSystemSettings {
                seed: Some(seed),
                ..default()
            })
            .add_plugins(PlanetScenePlugin);
        app.update();
        app
    }

    fn count<C: Component>(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<(), With<C>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn builds_every_body_label_and_orbit() {
        let mut app = app(1);
        assert_eq!(count::<PlanetaryBody>(&mut app), 10);
        assert_eq!(count::<BodyLabel>(&mut app), 10);
        assert_eq!(count::<OrbitPath>(&mut app), 9);
        assert_eq!(count::<OrbitState>(&mut app), 9);
        assert_eq!(count::<Sun>(&mut app), 1);
        assert_eq!(count::<SceneCamera>(&mut app), 1);

        let scene = app.world().resource::<SolarSystemScene>();
        assert_eq!(scene.bodies.len(), 10);
        assert_eq!(scene.orbiting().count(), 9);
        let sun = scene
            .bodies
            .iter()
            .find(|body| body.id == BodyId::Sun)
            .unwrap();
        assert!(sun.orbit.is_none() && sun.orbit_path.is_none());
    }

    #[test]
    fn bodies_start_on_their_orbits() {
        let mut app = app(2);
        let mut q = app
            .world_mut()
            .query::<(&PlanetaryBody, &BodyRadius, &Transform, Option<&Orbit>)>();
        for (body, radius, transform, orbit) in q.iter(app.world()) {
            let descriptor = crate::catalog::descriptor(body.0);
            assert_eq!(**radius, descriptor.radius);
            let distance = transform.translation.length();
            match orbit {
                Some(orbit) => {
                    assert_eq!(orbit.radius(), descriptor.orbit_radius);
                    assert!((distance - orbit.radius()).abs() < 1e-3);
                    assert_eq!(transform.translation.y, 0.0);
                }
                None => assert_eq!(distance, 0.0),
            }
        }
    }

    #[test]
    fn labels_sit_above_their_bodies() {
        let app = app(3);
        let scene = app.world().resource::<SolarSystemScene>().clone();
        for body in &scene.bodies {
            let world = app.world();
            let parent = world.get::<Parent>(body.label).unwrap();
            assert_eq!(parent.get(), body.entity);
            let radius = crate::catalog::descriptor(body.id).radius;
            let transform = world.get::<Transform>(body.label).unwrap();
            assert_eq!(transform.translation, Vec3::new(0.0, radius + 1.0, 0.0));
        }
    }

    #[test]
    fn textures_have_expected_sizes() {
        let app = app(4);
        let sizes: Vec<UVec2> = app
            .world()
            .resource::<Assets<Image>>()
            .iter()
            .map(|(_, image)| image.size())
            .collect();
        assert_eq!(sizes.len(), 20);
        let surfaces = sizes.iter().filter(|s| **s == UVec2::splat(SURFACE_SIZE)).count();
        let labels = sizes
            .iter()
            .filter(|s| **s == UVec2::new(LABEL_WIDTH, LABEL_HEIGHT))
            .count();
        assert_eq!((surfaces, labels), (10, 10));
    }

    #[test]
    fn same_seed_same_phases() {
        fn phases(app: &mut App) -> Vec<(BodyId, f32)> {
            let mut q = app.world_mut().query::<(&PlanetaryBody, &OrbitState)>();
            let mut phases: Vec<_> = q
                .iter(app.world())
                .map(|(body, state)| (body.0, state.angle))
                .collect();
            phases.sort_by_key(|(id, _)| *id as usize);
            phases
        }
        assert_eq!(phases(&mut app(9)), phases(&mut app(9)));
        assert_ne!(phases(&mut app(9)), phases(&mut app(10)));
    }

    #[test]
    fn camera_anchor_looks_at_the_origin() {
        let app = app(5);
        let camera = app.world().resource::<SolarSystemScene>().camera;
        let transform = app.world().get::<Transform>(camera).unwrap();
        assert_eq!(transform.translation, Vec3::new(0.0, 0.0, 50.0));
        assert!((*transform.forward() - Vec3::NEG_Z).length() < 1e-5);
    }
}
