use bevy::prelude::*;

/// Anchor of the scene camera. The host attaches the actual camera components.
#[derive(Debug, Copy, Clone, Default, Reflect, Component)]
#[reflect(Component)]
pub struct SceneCamera;

/// Static circle mesh showing where a body travels.
#[derive(Debug, Copy, Clone, Default, Reflect, Component)]
#[reflect(Component)]
pub struct OrbitPath;

/// Camera-facing name billboard, child of its body.
#[derive(Debug, Copy, Clone, Default, Reflect, Component)]
#[reflect(Component)]
pub struct BodyLabel;
