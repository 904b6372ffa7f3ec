pub mod dialog;
pub mod systems;

use bevy::prelude::*;

pub use dialog::{objective_text, ActiveDialog, DialogKind, DialogLine};

use crate::game_state::{AppState, OverlayKind, SimSet};
use systems::{
    handle_cinematic_trigger, handle_dialog_completed, handle_interact, handle_overlay_closed,
    queue_intro,
};

/// Event fired by the presentation layer when a dialog script finishes.
#[derive(Event)]
pub struct DialogCompleted;

/// Event fired by the presentation layer when a blocking overlay closes.
#[derive(Event)]
pub struct OverlayClosed(pub OverlayKind);

/// Name used to address the player in dialog scripts.
#[derive(Resource)]
pub struct PlayerName(pub String);

impl Default for PlayerName {
    fn default() -> Self {
        Self("Friend".into())
    }
}

/// Linear quest progression. The step only ever moves forward.
///
/// 0 Intro, 1 FindMessage, 2 PostMessageDialog, 3 FindGift,
/// 4 PostGiftDialog, 5 CinematicUnlocked, 6+ free-roam.
#[derive(Resource, Default)]
pub struct QuestState {
    step: u32,
}

impl QuestState {
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Moves to `step` if it is ahead of the current one; regressions are
    /// ignored and logged.
    pub fn advance_to(&mut self, step: u32) {
        if step > self.step {
            info!("quest step {} -> {}", self.step, step);
            self.step = step;
        } else if step < self.step {
            warn!("ignoring quest regression {} -> {}", self.step, step);
        }
    }
}

pub struct QuestPlugin;

impl Plugin for QuestPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<QuestState>()
            .init_resource::<ActiveDialog>()
            .init_resource::<PlayerName>()
            .add_event::<DialogCompleted>()
            .add_event::<OverlayClosed>()
            .add_systems(Startup, queue_intro)
            .add_systems(
                Update,
                (
                    handle_interact,
                    handle_overlay_closed,
                    handle_dialog_completed,
                    handle_cinematic_trigger.run_if(in_state(AppState::Exploring)),
                )
                    .chain()
                    .in_set(SimSet::Quest),
            );
    }
}
