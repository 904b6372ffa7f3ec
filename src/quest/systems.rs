use bevy::prelude::*;

use super::dialog::{script, ActiveDialog, DialogKind};
use super::{DialogCompleted, OverlayClosed, PlayerName, QuestState};
use crate::game_state::{AppState, ControlLock, OverlayKind};
use crate::input::PlayerInput;
use crate::world::{HoverState, Interact, InteractableRegistry, GIFT_PREFIX, TRIGGER_PREFIX};

/// dialog-completed transitions: 0 -> 1, 2 -> 3, 4 -> 5.
pub fn dialog_step_transition(step: u32) -> Option<u32> {
    match step {
        0 => Some(1),
        2 => Some(3),
        4 => Some(5),
        _ => None,
    }
}

/// overlay-closed transitions, each enqueueing a follow-up dialog.
pub fn overlay_step_transition(step: u32, kind: OverlayKind) -> Option<(u32, DialogKind)> {
    match (kind, step) {
        (OverlayKind::Message, 1) => Some((2, DialogKind::AfterMessage)),
        (OverlayKind::Gift, 3) => Some((4, DialogKind::AfterGift)),
        _ => None,
    }
}

/// What interacting with the gift does at a given step.
#[derive(Debug, PartialEq, Eq)]
pub enum GiftOutcome {
    /// Too early: scold, do not advance.
    WrongObject,
    Open,
}

pub fn gift_interaction(step: u32) -> GiftOutcome {
    if step < 3 {
        GiftOutcome::WrongObject
    } else {
        GiftOutcome::Open
    }
}

/// Opens the intro dialog once the session starts.
pub fn queue_intro(
    name: Res<PlayerName>,
    mut dialog: ResMut<ActiveDialog>,
    mut lock: ResMut<ControlLock>,
) {
    dialog.open(script(DialogKind::Intro, &name.0));
    lock.dialog_open = true;
}

pub fn handle_dialog_completed(
    mut events: EventReader<DialogCompleted>,
    mut quest: ResMut<QuestState>,
) {
    for _ in events.read() {
        if let Some(next) = dialog_step_transition(quest.step()) {
            quest.advance_to(next);
        }
    }
}

pub fn handle_overlay_closed(
    name: Res<PlayerName>,
    mut events: EventReader<OverlayClosed>,
    mut quest: ResMut<QuestState>,
    mut dialog: ResMut<ActiveDialog>,
    mut lock: ResMut<ControlLock>,
) {
    for OverlayClosed(kind) in events.read() {
        if let Some((next, follow_up)) = overlay_step_transition(quest.step(), *kind) {
            quest.advance_to(next);
            dialog.open(script(follow_up, &name.0));
            lock.dialog_open = true;
        }
    }
}

/// Routes interact events: the gift is quest-gated, everything else opens
/// the message reader.
pub fn handle_interact(
    name: Res<PlayerName>,
    registry: Res<InteractableRegistry>,
    mut events: EventReader<Interact>,
    quest: Res<QuestState>,
    mut dialog: ResMut<ActiveDialog>,
    mut lock: ResMut<ControlLock>,
) {
    for Interact(target) in events.read() {
        if lock.blocked() {
            continue;
        }

        if target.starts_with(GIFT_PREFIX) {
            match gift_interaction(quest.step()) {
                GiftOutcome::WrongObject => {
                    dialog.open(script(DialogKind::WrongObject, &name.0));
                    lock.dialog_open = true;
                }
                GiftOutcome::Open => {
                    match registry.clips_for(target) {
                        Some(clips) if !clips.is_empty() => {
                            info!("inspecting {target} with clip {}", clips[0]);
                        }
                        _ => {
                            // Static inspection view instead.
                            warn!("no animation clips for {target}");
                        }
                    }
                    lock.overlay = Some(OverlayKind::Gift);
                }
            }
        } else if target.starts_with(TRIGGER_PREFIX) {
            // The window seat reacts to the cinematic key, not to interact.
            continue;
        } else {
            lock.overlay = Some(OverlayKind::Message);
        }
    }
}

/// The cinematic key while looking at the window seat: locked dialog before
/// step 5, otherwise hand the camera to the sequencer.
pub fn handle_cinematic_trigger(
    input: Res<PlayerInput>,
    hover: Res<HoverState>,
    name: Res<PlayerName>,
    quest: Res<QuestState>,
    mut dialog: ResMut<ActiveDialog>,
    mut lock: ResMut<ControlLock>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !input.cinematic_pressed || lock.blocked() {
        return;
    }
    let looking_at_trigger = hover
        .current
        .as_deref()
        .is_some_and(|current| current.starts_with(TRIGGER_PREFIX));
    if !looking_at_trigger {
        return;
    }

    if quest.step() < 5 {
        dialog.open(script(DialogKind::Locked, &name.0));
        lock.dialog_open = true;
    } else {
        next_state.set(AppState::Cinematic);
    }
}
