use bevy::prelude::*;

use super::sequencer::Sequencer;
use super::{CanExitCinematicChanged, FinaleFinished};
use crate::config::SimConfig;
use crate::game_state::AppState;

/// Every trigger is a full restart: shot 0, empty schedule, opacities at 0.
pub fn enter_cinematic(config: Res<SimConfig>, mut sequencer: ResMut<Sequencer>) {
    sequencer.restart(&config);
    info!("cinematic sequence started");
}

/// Advances the sequence and drives the camera. While this state is active
/// the rig's follow systems are off, so the sequencer is the only writer.
pub fn drive_sequencer(
    time: Res<Time>,
    mut sequencer: ResMut<Sequencer>,
    mut camera: Query<&mut Transform, With<Camera3d>>,
    mut can_exit_events: EventWriter<CanExitCinematicChanged>,
    mut finished_events: EventWriter<FinaleFinished>,
) {
    let output = sequencer.tick(time.delta_secs());

    if let Ok(mut transform) = camera.get_single_mut() {
        if let Some(pose) = sequencer.camera_pose() {
            transform.translation = pose.position;
            transform.look_at(pose.look_at, Vec3::Y);
        }
    }

    if let Some(allowed) = output.can_exit_changed {
        can_exit_events.send(CanExitCinematicChanged(allowed));
    }
    if output.finished {
        info!("cinematic finale finished");
        finished_events.send(FinaleFinished);
    }
}

/// Escape/X leaves the cinematic once the credits allow it.
pub fn exit_on_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    sequencer: Res<Sequencer>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !sequencer.can_exit {
        return;
    }
    if keyboard.just_pressed(KeyCode::Escape) || keyboard.just_pressed(KeyCode::KeyX) {
        next_state.set(AppState::Exploring);
    }
}

/// Leaving for any reason cancels all pending scheduled steps so nothing
/// stale can fire into a later run.
pub fn leave_cinematic(
    mut sequencer: ResMut<Sequencer>,
    mut can_exit_events: EventWriter<CanExitCinematicChanged>,
) {
    sequencer.clear();
    can_exit_events.send(CanExitCinematicChanged(false));
}
