pub mod systems;

use bevy::prelude::*;

use crate::game_state::{AppState, SimSet};
use systems::{camera_follow, camera_look, grab_cursor, release_cursor, spawn_camera, toggle_cursor_grab};

/// First-person camera rig state.
///
/// Yaw/pitch accumulate from look input; `yaw` eases toward `yaw_target`
/// each frame. `zoom` is kept clamped for a possible third-person mode but
/// does not affect first-person positioning.
#[derive(Component)]
pub struct CameraController {
    pub yaw_target: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            yaw_target: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            zoom: 3.0,
        }
    }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(OnEnter(AppState::Exploring), grab_cursor)
            .add_systems(OnEnter(AppState::Cinematic), release_cursor)
            .add_systems(
                Update,
                (
                    (camera_look, toggle_cursor_grab).in_set(SimSet::Look),
                    camera_follow.in_set(SimSet::Camera),
                )
                    .run_if(in_state(AppState::Exploring)),
            );
    }
}
