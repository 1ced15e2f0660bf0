use bevy::prelude::*;

/// Moves the orbit center back to the world origin.
#[derive(Debug, Copy, Clone, Event)]
pub struct RecenterCamera;
