use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Backdrop of point stars scattered uniformly in a cube around the origin.
#[derive(Debug, Clone)]
pub struct StarryNightPlugin {
    pub star_count: usize,
    /// Edge length of the cube.
    pub extent: f32,
    /// Random when unset.
    pub seed: Option<u64>,
}

impl Default for StarryNightPlugin {
    fn default() -> Self {
        Self {
            star_count: 5000,
            extent: 2000.0,
            seed: None,
        }
    }
}

impl Plugin for StarryNightPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<StarField>()
            .insert_resource(StarFieldConfig(self.clone()))
            .add_systems(Startup, spawn_stars);
    }
}

#[derive(Resource)]
struct StarFieldConfig(StarryNightPlugin);

#[derive(Debug, Copy, Clone, Default, Component, Reflect)]
#[reflect(Component)]
pub struct StarField;

/// `count` positions, each coordinate uniform in `[-extent / 2, extent / 2)`. Empty unless
/// `extent` is finite and positive.
pub fn star_positions(rng: &mut impl Rng, count: usize, extent: f32) -> Vec<[f32; 3]> {
    if !is_valid_extent(extent) {
        return Vec::new();
    }
    let half = extent / 2.0;
    (0..count)
        .map(|_| {
            [
                rng.random_range(-half..half),
                rng.random_range(-half..half),
                rng.random_range(-half..half),
            ]
        })
        .collect()
}

fn is_valid_extent(extent: f32) -> bool {
    extent.is_finite() && extent > 0.0
}

pub fn star_mesh(positions: Vec<[f32; 3]>) -> Mesh {
    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

fn spawn_stars(
    config: Res<StarFieldConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    let config = &config.0;
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };
    if !is_valid_extent(config.extent) || config.star_count == 0 {
        warn!("Empty star field (count {}, extent {})", config.star_count, config.extent);
        return;
    }
    let positions = star_positions(&mut rng, config.star_count, config.extent);
    debug!("Spawning {} stars", positions.len());

    commands.spawn((
        Name::new("Star Field"),
        StarField,
        Mesh3d(meshes.add(star_mesh(positions))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        NotShadowCaster,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_fill_the_cube() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let stars = star_positions(&mut rng, 5000, 2000.0);
        assert_eq!(stars.len(), 5000);
        assert!(stars
            .iter()
            .flatten()
            .all(|c| (-1000.0..1000.0).contains(c)));
        // Roughly half of the stars on each side of every axis plane.
        for axis in 0..3 {
            let positive = stars.iter().filter(|s| s[axis] > 0.0).count();
            assert!((2000..3000).contains(&positive), "axis {axis}: {positive}");
        }
    }

    #[test]
    fn same_seed_same_sky() {
        let a = star_positions(&mut ChaCha8Rng::seed_from_u64(5), 100, 10.0);
        let b = star_positions(&mut ChaCha8Rng::seed_from_u64(5), 100, 10.0);
        assert_eq!(a, b);
    }

    #[test]
    fn point_list_mesh() {
        let mesh = star_mesh(vec![[0.0; 3], [1.0, 2.0, 3.0]]);
        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::PointList);
        assert_eq!(mesh.count_vertices(), 2);
    }

    #[test]
    fn spawns_one_star_field() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_plugins(StarryNightPlugin {
                seed: Some(1),
                ..default()
            });
        app.update();
        let fields = app
            .world_mut()
            .query_filtered::<&Mesh3d, With<StarField>>()
            .iter(app.world())
            .count();
        assert_eq!(fields, 1);
    }

    #[test]
    fn non_finite_extent_yields_no_stars() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for extent in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN, 0.0, -4.0] {
            assert!(star_positions(&mut rng, 10, extent).is_empty(), "extent {extent}");
        }
    }

    #[test]
    fn non_finite_extent_skips_the_star_field() {
        for extent in [f32::INFINITY, f32::NAN] {
            let mut app = App::new();
            app.add_plugins(MinimalPlugins)
                .init_resource::<Assets<Mesh>>()
                .init_resource::<Assets<StandardMaterial>>()
                .add_plugins(StarryNightPlugin {
                    extent,
                    seed: Some(1),
                    ..default()
                });
            app.update();
            let fields = app
                .world_mut()
                .query_filtered::<(), With<StarField>>()
                .iter(app.world())
                .count();
            assert_eq!(fields, 0, "extent {extent}");
        }
    }
}
