//! Pointer picking: casts a ray from the scene camera through the cursor and reports
//! the nearest body sphere it hits.

use crate::body::{BodyId, BodyRadius, PlanetaryBody};
use crate::scene::components::SceneCamera;
use bevy::prelude::*;
use bevy::render::camera::CameraUpdateSystem;
use bevy::window::{CursorLeft, CursorMoved, PrimaryWindow};

pub struct PickingPlugin;

impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoveredBody>().add_systems(
            PostUpdate,
            pick_hovered_body
                .after(TransformSystem::TransformPropagate)
                .after(CameraUpdateSystem),
        );
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub body: BodyId,
    pub entity: Entity,
    /// Ray parameter of the hit; the distance from the ray origin.
    pub distance: f32,
}

/// Body currently under the pointer, if any.
#[derive(Debug, Copy, Clone, Default, PartialEq, Resource, Deref)]
pub struct HoveredBody(pub Option<PickHit>);

#[derive(Debug, Copy, Clone)]
pub struct PickCandidate {
    pub body: BodyId,
    pub entity: Entity,
    pub center: Vec3,
    pub radius: f32,
}

/// Maps a cursor position in logical pixels (origin top-left) to normalized device
/// coordinates in [-1, 1], y up.
pub fn normalized_pointer(cursor: Vec2, viewport: Vec2) -> Option<Vec2> {
    if !viewport.is_finite() || viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        2.0 * cursor.x / viewport.x - 1.0,
        1.0 - 2.0 * cursor.y / viewport.y,
    ))
}

/// World-space ray through `ndc`. Depth is reverse-Z, so the near plane sits at z = 1.
pub fn ray_from_ndc(world_from_view: Mat4, clip_from_view: Mat4, ndc: Vec2) -> Option<Ray3d> {
    let world_from_clip = world_from_view * clip_from_view.inverse();
    let near = world_from_clip.project_point3(ndc.extend(1.0));
    let far = world_from_clip.project_point3(ndc.extend(f32::EPSILON));
    if !near.is_finite() || !far.is_finite() {
        return None;
    }
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Smallest non-negative ray parameter at which `ray` meets the sphere.
pub fn ray_sphere(ray: Ray3d, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(*ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let t0 = -b - sqrt_d;
    let t1 = -b + sqrt_d;
    if t0 >= 0.0 {
        Some(t0)
    } else if t1 >= 0.0 {
        Some(t1)
    } else {
        None
    }
}

pub fn resolve(ray: Ray3d, candidates: impl IntoIterator<Item = PickCandidate>) -> Option<PickHit> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            ray_sphere(ray, candidate.center, candidate.radius).map(|distance| PickHit {
                body: candidate.body,
                entity: candidate.entity,
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

fn pick_hovered_body(
    mut cursor_moved: EventReader<CursorMoved>,
    mut cursor_left: EventReader<CursorLeft>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform), With<SceneCamera>>,
    q_bodies: Query<(Entity, &PlanetaryBody, &BodyRadius, &GlobalTransform)>,
    mut hovered: ResMut<HoveredBody>,
) {
    if cursor_left.read().count() > 0 {
        hovered.set_if_neq(HoveredBody(None));
    }
    if cursor_moved.read().count() == 0 {
        return;
    }
    let Ok(window) = q_window.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        hovered.set_if_neq(HoveredBody(None));
        return;
    };
    let Some(ndc) = normalized_pointer(cursor, window.size()) else {
        return;
    };
    let Ok((camera, camera_transform)) = q_camera.get_single() else {
        return;
    };
    let Some(ray) = ray_from_ndc(camera_transform.compute_matrix(), camera.clip_from_view(), ndc)
    else {
        return;
    };

    let hit = resolve(
        ray,
        q_bodies
            .iter()
            .map(|(entity, body, radius, transform)| PickCandidate {
                body: body.0,
                entity,
                center: transform.translation(),
                radius: **radius,
            }),
    );
    if hovered.map(|h| h.body) != hit.map(|h| h.body) {
        debug!("Hovered body: {:?}", hit.map(|h| h.body));
    }
    hovered.set_if_neq(HoveredBody(hit));
}
