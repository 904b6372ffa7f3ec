pub mod dialog_box;
pub mod hud;
pub mod overlays;

use bevy::prelude::*;

use crate::game_state::SimSet;
use dialog_box::{advance_dialog, setup_dialog_box, sync_dialog_box};
use hud::{setup_hud, update_exit_hint, update_objective, update_prompt};
use overlays::{close_overlay, setup_overlays, sync_overlays};

/// Thin presentation layer over the simulation core. It only reads core
/// state and reports completions/closures back as events.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_hud, setup_dialog_box, setup_overlays))
            .add_systems(
                Update,
                (
                    (advance_dialog, sync_dialog_box).chain(),
                    (close_overlay, sync_overlays).chain(),
                    update_objective,
                    update_prompt,
                    update_exit_hint,
                )
                    // Lock/event mutations land after the whole simulation
                    // chain, so a frame reads a consistent lock throughout.
                    .after(SimSet::Cinematic),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    use crate::cinematic::CanExitCinematicChanged;
    use crate::game_state::{AppState, ControlLock};
    use crate::quest::dialog::{script, DialogKind};
    use crate::quest::{ActiveDialog, DialogCompleted, OverlayClosed, QuestState};
    use crate::world::HoverState;

    #[derive(Resource, Default)]
    struct LockSeenByCharacter(Option<bool>);

    fn record_lock(lock: Res<ControlLock>, mut seen: ResMut<LockSeenByCharacter>) {
        seen.0 = Some(lock.blocked());
    }

    #[test]
    fn dialog_close_unblocks_movement_only_on_the_next_frame() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .configure_sets(
                Update,
                (
                    SimSet::Look,
                    SimSet::Character,
                    SimSet::Camera,
                    SimSet::Interaction,
                    SimSet::Quest,
                    SimSet::Cinematic,
                )
                    .chain(),
            )
            .init_resource::<ControlLock>()
            .init_resource::<ActiveDialog>()
            .init_resource::<QuestState>()
            .init_resource::<HoverState>()
            .init_resource::<LockSeenByCharacter>()
            .add_event::<DialogCompleted>()
            .add_event::<OverlayClosed>()
            .add_event::<CanExitCinematicChanged>()
            .add_systems(Update, record_lock.in_set(SimSet::Character))
            .add_plugins(UiPlugin);

        // A one-line dialog is open and Enter is pressed this frame.
        app.world_mut()
            .resource_mut::<ActiveDialog>()
            .open(script(DialogKind::WrongObject, "Friend"));
        app.world_mut().resource_mut::<ControlLock>().dialog_open = true;
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::Enter);
        app.insert_resource(keys);

        app.update();

        // The character systems still saw the lock on the closing frame.
        assert_eq!(app.world().resource::<LockSeenByCharacter>().0, Some(true));
        // But the dialog did close and reported its completion.
        assert!(!app.world().resource::<ControlLock>().dialog_open);
        assert!(!app
            .world()
            .resource::<Events<DialogCompleted>>()
            .is_empty());
    }
}
