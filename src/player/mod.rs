pub mod components;
pub mod systems;

use bevy::prelude::*;

pub use components::{AnimationState, CharacterVisual, EyeAnchor, Facing, Player};

use crate::game_state::{AppState, SimSet};
use systems::{player_movement, respawn_check, smooth_facing, spawn_player};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_player).add_systems(
            Update,
            (
                // Movement only while exploring; the sequencer owns the
                // cinematic state and a dialog lock is checked inside.
                player_movement.run_if(in_state(AppState::Exploring)),
                smooth_facing,
                respawn_check,
            )
                .chain()
                .in_set(SimSet::Character),
        );
    }
}
