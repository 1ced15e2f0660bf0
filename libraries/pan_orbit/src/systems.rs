use bevy::prelude::*;

use crate::components::{PanOrbitCamera, PanOrbitState};
use crate::events::RecenterCamera;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

// Pending motion below this is dropped, so damping settles instead of decaying forever.
const SETTLE_EPSILON: f32 = 1e-6;

#[derive(Default)]
pub(crate) struct BlockedInputs {
    pointer: bool,
    keyboard: bool,
}

pub(crate) fn get_blocked_inputs(
    mut egui: bevy_egui::EguiContexts,
    q_window_entities: Query<Entity, With<Window>>,
) -> BlockedInputs {
    let mut ret = BlockedInputs::default();
    for window_entity in &q_window_entities {
        if let Some(ctx) = egui.try_ctx_for_entity_mut(window_entity) {
            ret.pointer |= ctx.wants_pointer_input();
            ret.keyboard |= ctx.wants_keyboard_input();
        }
    }
    ret
}

/// Splits `pending` motion into the part applied this frame and the part carried over.
pub fn damp(pending: Vec2, factor: f32) -> (Vec2, Vec2) {
    if !(factor > 0.0 && factor < 1.0) {
        return (pending, Vec2::ZERO);
    }
    let applied = pending * factor;
    let remaining = pending - applied;
    if remaining.length() < SETTLE_EPSILON {
        (pending, Vec2::ZERO)
    } else {
        (applied, remaining)
    }
}

/// Clamps an orbit radius without panicking on inverted limits; `max` wins.
pub fn clamp_radius(radius: f32, min: f32, max: f32) -> f32 {
    radius.max(min).min(max)
}

pub(crate) fn pan_orbit_camera(
    In(blocked_inputs): In<BlockedInputs>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut evr_motion: EventReader<MouseMotion>,
    mut evr_scroll: EventReader<MouseWheel>,
    mut q_camera: Query<(&PanOrbitCamera, &mut PanOrbitState, &mut Transform)>,
) {
    // First, accumulate the total amount of
    // mouse motion and scroll, from all pending events:
    let mut total_motion: Vec2 = evr_motion.read().map(|ev| ev.delta).sum();

    // Reverse Y (Bevy's Worldspace coordinate system is Y-Up,
    // but events are in window/ui coordinates, which are Y-Down)
    total_motion.y = -total_motion.y;

    let mut total_scroll_lines = Vec2::ZERO;
    let mut total_scroll_pixels = Vec2::ZERO;
    for ev in evr_scroll.read() {
        match ev.unit {
            MouseScrollUnit::Line => {
                total_scroll_lines.x += ev.x;
                total_scroll_lines.y -= ev.y;
            }
            MouseScrollUnit::Pixel => {
                total_scroll_pixels.x += ev.x;
                total_scroll_pixels.y -= ev.y;
            }
        }
    }

    // Events are still drained while egui has the pointer, so nothing leaks
    // into the camera once it lets go.
    if blocked_inputs.pointer {
        total_motion = Vec2::ZERO;
        total_scroll_lines = Vec2::ZERO;
        total_scroll_pixels = Vec2::ZERO;
    }

    for (settings, mut state, mut transform) in &mut q_camera {
        let mut total_pan = Vec2::ZERO;
        let mut total_orbit = Vec2::ZERO;
        if !blocked_inputs.pointer {
            if mouse_buttons.pressed(MouseButton::Left)
                && !blocked_inputs.keyboard
                && (keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight))
            {
                total_pan -= total_motion * settings.pan_sensitivity;
            } else if mouse_buttons.pressed(MouseButton::Left) {
                total_orbit -= total_motion * settings.orbit_sensitivity;
            }

            // Upon starting a new orbit maneuver (key is just pressed),
            // check if we are starting it upside-down
            if mouse_buttons.just_pressed(MouseButton::Left) {
                state.upside_down = state.pitch < -FRAC_PI_2 || state.pitch > FRAC_PI_2;
            }
        }

        let mut total_zoom = Vec2::ZERO;
        // Zoom on scroll wheel
        total_zoom -=
            total_scroll_lines * settings.scroll_line_sensitivity * settings.zoom_sensitivity;
        total_zoom -=
            total_scroll_pixels * settings.scroll_pixel_sensitivity * settings.zoom_sensitivity;

        // If we are upside down, reverse the X orbiting
        if state.upside_down {
            total_orbit.x = -total_orbit.x;
        }

        // Damping: new input joins whatever is still pending, and only a
        // fraction of the pending total is applied this frame.
        let (zoom, pending_zoom) = damp(state.pending_zoom + total_zoom, settings.damping);
        let (orbit, pending_orbit) = damp(state.pending_orbit + total_orbit, settings.damping);
        let (pan, pending_pan) = damp(state.pending_pan + total_pan, settings.damping);
        let pending = (pending_zoom, pending_orbit, pending_pan);
        if pending != (state.pending_zoom, state.pending_orbit, state.pending_pan) {
            state.pending_zoom = pending_zoom;
            state.pending_orbit = pending_orbit;
            state.pending_pan = pending_pan;
        }

        let mut any = false;

        // To ZOOM, we need to multiply our radius.
        if zoom != Vec2::ZERO {
            any = true;
            // in order for zoom to feel intuitive,
            // everything needs to be exponential
            // (done via multiplication)
            // not linear
            // (done via addition)
            state.radius *= (-zoom.y).exp();
        }
        let clamped = clamp_radius(state.radius, settings.min_radius, settings.max_radius);
        if clamped != state.radius {
            any = true;
            state.radius = clamped;
        }

        // To ORBIT, we change our pitch and yaw values
        if orbit != Vec2::ZERO {
            any = true;
            state.yaw += orbit.x;
            state.pitch += orbit.y;
            // wrap around, to stay between +- 180 degrees
            if state.yaw > PI {
                state.yaw -= TAU; // 2 * PI
            }
            if state.yaw < -PI {
                state.yaw += TAU; // 2 * PI
            }
            if state.pitch > PI {
                state.pitch -= TAU; // 2 * PI
            }
            if state.pitch < -PI {
                state.pitch += TAU; // 2 * PI
            }
        }

        // To PAN, we can get the UP and RIGHT direction
        // vectors from the camera's transform, and use
        // them to move the center point. Multiply by the
        // radius to make the pan adapt to the current zoom.
        if pan != Vec2::ZERO {
            any = true;
            let radius = state.radius;
            state.center += transform.right() * pan.x * radius;
            state.center += transform.up() * pan.y * radius;
        }

        // Finally, compute the new camera transform.
        // (if we changed anything, or if the pan-orbit
        // controller was just added, and thus we are running
        // for the first time and need to initialize)
        if any || state.is_changed() || state.is_added() {
            // YXZ Euler Rotation performs yaw/pitch/roll.
            transform.rotation = Quat::from_euler(EulerRot::YXZ, state.yaw, state.pitch, 0.0);
            // To position the camera, get the backward direction vector
            // and place the camera at the desired radius from the center.
            transform.translation = state.center + transform.back() * state.radius;
        }
    }
}

pub fn recenter_camera(_: Trigger<RecenterCamera>, mut q_state: Query<&mut PanOrbitState>) {
    for mut state in &mut q_state {
        debug!("Recentering camera");
        state.center = Vec3::ZERO;
        state.pending_pan = Vec2::ZERO;
    }
}
