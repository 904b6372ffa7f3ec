pub mod sequencer;
pub mod systems;

use bevy::prelude::*;

pub use sequencer::{CameraPose, Opacities, Phase, Sequencer, Shot, TimelineAction};

use crate::game_state::{AppState, SimSet};
use systems::{drive_sequencer, enter_cinematic, exit_on_input, leave_cinematic};

/// Event telling the presentation layer whether the player may leave the
/// cinematic (true only once the credits have begun).
#[derive(Event, Debug, Clone, Copy)]
pub struct CanExitCinematicChanged(pub bool);

/// Event fired exactly once when the whole finale timeline has played out.
#[derive(Event, Debug, Clone, Copy)]
pub struct FinaleFinished;

pub struct CinematicPlugin;

impl Plugin for CinematicPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Sequencer>()
            .add_event::<CanExitCinematicChanged>()
            .add_event::<FinaleFinished>()
            .add_systems(OnEnter(AppState::Cinematic), enter_cinematic)
            .add_systems(OnExit(AppState::Cinematic), leave_cinematic)
            .add_systems(
                Update,
                (drive_sequencer, exit_on_input)
                    .chain()
                    .run_if(in_state(AppState::Cinematic))
                    .in_set(SimSet::Cinematic),
            );
    }
}
