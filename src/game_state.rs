use bevy::prelude::*;

/// Main application states controlling game flow.
///
/// Exactly one of the two states drives the camera: `Exploring` hands it to
/// the camera rig, `Cinematic` hands it to the shot sequencer.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Exploring,
    Cinematic,
}

/// Fixed per-frame ordering of the simulation core:
/// look input, character, camera, interaction, quest, cinematic.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Look,
    Character,
    Camera,
    Interaction,
    Quest,
    Cinematic,
}

/// Which blocking overlay is currently open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// The letter / message reader.
    Message,
    /// The gift inspection view.
    Gift,
}

/// Resource tracking every UI state that should freeze the character.
///
/// Movement, jumping and interaction stop while any of these are set; the
/// fall-check/respawn safety net keeps running regardless.
#[derive(Resource, Default)]
pub struct ControlLock {
    pub dialog_open: bool,
    pub overlay: Option<OverlayKind>,
}

impl ControlLock {
    /// True if character input should be ignored this frame.
    pub fn blocked(&self) -> bool {
        self.dialog_open || self.overlay.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_blocks_on_dialog_or_overlay() {
        let mut lock = ControlLock::default();
        assert!(!lock.blocked());

        lock.dialog_open = true;
        assert!(lock.blocked());

        lock.dialog_open = false;
        lock.overlay = Some(OverlayKind::Gift);
        assert!(lock.blocked());

        lock.overlay = None;
        assert!(!lock.blocked());
    }
}
