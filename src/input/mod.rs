use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::input::InputSystem;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

/// Per-frame input snapshot read by every simulation system.
///
/// Gathered once at the top of the frame so the rest of the core never
/// touches raw device events, which keeps the per-frame logic testable.
#[derive(Resource, Default, Debug, Clone)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
    pub jump: bool,
    /// Interact key held this frame; edge detection lives in the detector.
    pub interact: bool,
    pub respawn: bool,
    /// Cinematic trigger key press edge (F).
    pub cinematic_pressed: bool,
    /// Accumulated pointer/touch-drag delta this frame, in pixels.
    pub look_delta: Vec2,
    /// Accumulated wheel + pinch zoom delta this frame.
    pub zoom_delta: f32,
    /// Cursor is grabbed by the window.
    pub pointer_locked: bool,
    /// Cursor is over the window surface.
    pub hovering: bool,
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .add_systems(PreUpdate, gather_input.after(InputSystem));
    }
}

/// Builds the [`PlayerInput`] snapshot from keyboard, mouse and touch state.
pub fn gather_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    touches: Res<Touches>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut input: ResMut<PlayerInput>,
) {
    input.forward = keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]);
    input.backward = keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]);
    input.left = keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]);
    input.right = keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]);
    input.run = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    input.jump = keyboard.pressed(KeyCode::Space);
    input.interact = keyboard.pressed(KeyCode::KeyE);
    input.respawn = keyboard.pressed(KeyCode::KeyR);
    input.cinematic_pressed = keyboard.just_pressed(KeyCode::KeyF);

    let mut look = Vec2::ZERO;
    for event in mouse_motion.read() {
        look += event.delta;
    }

    let mut zoom = 0.0;
    for event in mouse_wheel.read() {
        zoom -= event.y;
    }

    // Touch: one finger drags the view, two fingers pinch-zoom.
    let active: Vec<_> = touches.iter().collect();
    match active.as_slice() {
        [touch] => look += touch.delta(),
        [a, b] => {
            let now = a.position().distance(b.position());
            let before = a.previous_position().distance(b.previous_position());
            zoom -= now - before;
        }
        _ => {}
    }
    input.look_delta = look;
    input.zoom_delta = zoom;

    if let Ok(window) = windows.get_single() {
        input.pointer_locked = window.cursor_options.grab_mode != CursorGrabMode::None;
        input.hovering = window.cursor_position().is_some();
    } else {
        input.pointer_locked = false;
        input.hovering = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_defaults_to_neutral() {
        let input = PlayerInput::default();
        assert!(!input.forward && !input.interact && !input.jump);
        assert_eq!(input.look_delta, Vec2::ZERO);
        assert_eq!(input.zoom_delta, 0.0);
    }
}
