use crate::orbit::{Orbit, OrbitState};
use bevy::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AnimationState>()
            .register_type::<AnimationTicks>()
            .init_resource::<CancellationToken>()
            .init_resource::<AnimationTicks>()
            .configure_sets(
                Update,
                AnimationSet::Tick.run_if(in_state(AnimationState::Running)),
            )
            .add_systems(
                Update,
                (stop_when_cancelled, tick_orbits)
                    .chain()
                    .in_set(AnimationSet::Tick),
            )
            .add_systems(OnEnter(AnimationState::Stopped), log_stopped);
    }
}

#[derive(States, Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationState {
    #[default]
    Running,
    Stopped,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnimationSet {
    Tick,
}

/// Shared stop flag. Clones observe the same flag, so a host can hold one and
/// cancel the animation from any thread.
#[derive(Debug, Clone, Default, Resource)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Number of orbit ticks executed so far.
#[derive(Debug, Copy, Clone, Default, Resource, Reflect, Deref)]
#[reflect(Resource)]
pub struct AnimationTicks(u64);

fn stop_when_cancelled(
    token: Res<CancellationToken>,
    mut next_state: ResMut<NextState<AnimationState>>,
) {
    if token.is_cancelled() {
        next_state.set(AnimationState::Stopped);
    }
}

/// Advances every orbiting body by one step. The central body carries no [`Orbit`]
/// and is never touched.
pub fn tick_orbits(
    token: Res<CancellationToken>,
    mut ticks: ResMut<AnimationTicks>,
    mut q: Query<(&mut Transform, &mut OrbitState, &Orbit)>,
) {
    if token.is_cancelled() {
        return;
    }
    ticks.0 += 1;
    for (mut transform, mut state, orbit) in &mut q {
        let step = orbit.integrate(*state);
        *state = step.state;
        transform.translation = orbit.position(state.angle);
        transform.rotate_local_y(step.spin);
    }
}

fn log_stopped(ticks: Res<AnimationTicks>) {
    info!("Animation stopped after {} ticks", **ticks);
}
