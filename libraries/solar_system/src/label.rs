use crate::body::PlanetaryBody;
use crate::scene::components::{BodyLabel, SceneCamera};
use crate::scene::SolarSystemSettings;
use bevy::prelude::*;

pub struct LabelPlugin;

impl Plugin for LabelPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BodyLabel>()
            .init_resource::<ShowLabels>()
            .add_systems(Update, sync_label_visibility)
            .add_systems(
                PostUpdate,
                face_camera.before(TransformSystem::TransformPropagate),
            );
    }
}

/// Whether name labels are shown.
#[derive(Resource, Deref, DerefMut)]
pub struct ShowLabels(pub bool);

impl FromWorld for ShowLabels {
    fn from_world(world: &mut World) -> Self {
        Self(
            world
                .get_resource::<SolarSystemSettings>()
                .map_or(true, |settings| settings.show_labels),
        )
    }
}

/// Keeps every label quad parallel to the camera's view plane. Bodies and the camera
/// are root entities, so their local transforms are their global ones.
fn face_camera(
    q_camera: Query<&Transform, (With<SceneCamera>, Without<BodyLabel>)>,
    q_bodies: Query<&Transform, (With<PlanetaryBody>, Without<BodyLabel>)>,
    mut q_labels: Query<(&mut Transform, &Parent), With<BodyLabel>>,
) {
    let Ok(camera) = q_camera.get_single() else {
        return;
    };
    for (mut transform, parent) in &mut q_labels {
        let Ok(body) = q_bodies.get(parent.get()) else {
            continue;
        };
        transform.rotation = body.rotation.inverse() * camera.rotation;
    }
}

fn sync_label_visibility(
    show_labels: Res<ShowLabels>,
    mut q: Query<&mut Visibility, With<BodyLabel>>,
) {
    let visibility = if **show_labels {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut v in &mut q {
        v.set_if_neq(visibility);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyId;
    use approx::assert_abs_diff_eq;

    #[test]
    fn labels_face_the_camera_from_a_spinning_body() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, LabelPlugin));

        let camera = Transform::from_xyz(30.0, 20.0, 50.0).looking_at(Vec3::ZERO, Vec3::Y);
        app.world_mut().spawn((SceneCamera, camera));
        let body = app
            .world_mut()
            .spawn((
                PlanetaryBody(BodyId::Earth),
                Transform::from_xyz(16.0, 0.0, 0.0).with_rotation(Quat::from_rotation_y(1.2)),
            ))
            .id();
        let label = app
            .world_mut()
            .spawn((BodyLabel, Transform::from_xyz(0.0, 2.4, 0.0)))
            .set_parent(body)
            .id();

        app.update();

        let local = app.world().get::<Transform>(label).unwrap().rotation;
        let world = Quat::from_rotation_y(1.2) * local;
        assert_abs_diff_eq!(world.dot(camera.rotation).abs(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn hidden_labels() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, LabelPlugin));
        let label = app.world_mut().spawn((BodyLabel, Visibility::default())).id();

        app.world_mut().resource_mut::<ShowLabels>().0 = false;
        app.update();
        assert_eq!(
            app.world().get::<Visibility>(label),
            Some(&Visibility::Hidden)
        );

        app.world_mut().resource_mut::<ShowLabels>().0 = true;
        app.update();
        assert_eq!(
            app.world().get::<Visibility>(label),
            Some(&Visibility::Inherited)
        );
    }
}
