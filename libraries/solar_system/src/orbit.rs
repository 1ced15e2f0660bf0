use crate::scene::components::OrbitPath;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use rand::Rng;
use std::f32::consts::TAU;

/// Angular step of a unit-radius orbit, per tick. Steps scale with `1 / sqrt(radius)`.
pub const ORBIT_STEP_SCALE: f32 = 0.02;
/// Self-rotation about the local Y axis, per tick.
pub const SPIN_STEP: f32 = 0.01;
pub const ORBIT_PATH_SEGMENTS: usize = 128;

pub struct OrbitPlugin;

impl Plugin for OrbitPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Orbit>()
            .register_type::<OrbitState>()
            .init_resource::<DrawOrbits>()
            .add_systems(Update, sync_orbit_path_visibility);
    }
}

/// Whether orbit paths are shown.
#[derive(Resource, Deref, DerefMut)]
pub struct DrawOrbits(pub bool);

impl FromWorld for DrawOrbits {
    fn from_world(world: &mut World) -> Self {
        Self(
            world
                .get_resource::<crate::scene::SolarSystemSettings>()
                .map_or(true, |settings| settings.draw_orbits),
        )
    }
}

/// Circular orbit in the y = 0 plane around the origin.
#[derive(Debug, Copy, Clone, PartialEq, Component, Reflect)]
#[reflect(Component)]
pub struct Orbit {
    radius: f32,
}

impl Orbit {
    pub fn new(radius: f32) -> Option<Self> {
        (radius.is_finite() && radius > 0.0).then_some(Self { radius })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn angular_step(&self) -> f32 {
        ORBIT_STEP_SCALE / self.radius.sqrt()
    }

    /// Advances the orbit by one tick. Frame-coupled: the step does not depend on elapsed time.
    #[inline]
    pub fn integrate(&self, state: OrbitState) -> OrbitStep {
        OrbitStep {
            state: OrbitState {
                angle: state.angle + self.angular_step(),
            },
            spin: SPIN_STEP,
        }
    }

    #[inline]
    pub fn position(&self, angle: f32) -> Vec3 {
        Vec3::new(angle.cos() * self.radius, 0.0, angle.sin() * self.radius)
    }

    pub fn path_mesh(&self) -> Mesh {
        let mut positions: Vec<[f32; 3]> = orbit_path_points(self.radius, ORBIT_PATH_SEGMENTS)
            .into_iter()
            .map(|point| point.to_array())
            .collect();
        if let Some(&first) = positions.first() {
            positions.push(first);
        }
        Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    }
}

/// `segments` points spaced uniformly around a circle of `radius` in the y = 0 plane.
pub fn orbit_path_points(radius: f32, segments: usize) -> Vec<Vec3> {
    (0..segments)
        .map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect()
}

/// Current orbital angle in radians. Never wrapped.
#[derive(Debug, Copy, Clone, Default, PartialEq, Component, Reflect)]
#[reflect(Component)]
pub struct OrbitState {
    pub angle: f32,
}

impl OrbitState {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            angle: rng.random_range(0.0..TAU),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitStep {
    pub state: OrbitState,
    pub spin: f32,
}

fn sync_orbit_path_visibility(
    draw_orbits: Res<DrawOrbits>,
    mut q: Query<&mut Visibility, With<OrbitPath>>,
) {
    let visibility = if **draw_orbits {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut v in &mut q {
        v.set_if_neq(visibility);
    }
}
