pub mod components;
pub mod crosshair;
pub mod interaction;
pub mod setup;

use bevy::prelude::*;

pub use components::{
    matches_reserved, Interactable, InteractableMeta, InteractableRegistry, GIFT_PREFIX,
    TRIGGER_PREFIX,
};
pub use interaction::{HoverChanged, HoverState, Interact};

use crate::game_state::{AppState, SimSet};
use crosshair::{hide_crosshair, setup_crosshair, show_crosshair};
use interaction::detect_interactable;
use setup::{register_interactables, setup_world};

// Room dimensions
pub const ROOM_WIDTH: f32 = 12.0;
pub const ROOM_DEPTH: f32 = 12.0;
pub const ROOM_HEIGHT: f32 = 5.0;
pub const WALL_THICKNESS: f32 = 0.2;

fn registry_not_ready(registry: Res<InteractableRegistry>) -> bool {
    !registry.is_ready()
}

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InteractableRegistry>()
            .init_resource::<HoverState>()
            .add_event::<HoverChanged>()
            .add_event::<Interact>()
            .add_systems(Startup, (setup_world, setup_crosshair))
            .add_systems(OnEnter(AppState::Cinematic), hide_crosshair)
            .add_systems(OnExit(AppState::Cinematic), show_crosshair)
            .add_systems(
                Update,
                (
                    register_interactables.run_if(registry_not_ready),
                    detect_interactable.run_if(in_state(AppState::Exploring)),
                )
                    .chain()
                    .in_set(SimSet::Interaction),
            );
    }
}
