use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use super::CameraController;
use crate::config::SimConfig;
use crate::game_state::ControlLock;
use crate::input::PlayerInput;
use crate::player::EyeAnchor;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        CameraController::default(),
        Transform::from_xyz(0.0, 5.0, 10.0),
    ));
}

pub fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::Locked;
    window.cursor_options.visible = false;
}

pub fn release_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::None;
    window.cursor_options.visible = true;
}

/// Escape toggles the cursor grab while nothing else (dialog, overlay)
/// claims the key.
pub fn toggle_cursor_grab(
    keyboard: Res<ButtonInput<KeyCode>>,
    lock: Res<ControlLock>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) || lock.blocked() {
        return;
    }
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    match window.cursor_options.grab_mode {
        CursorGrabMode::None => {
            window.cursor_options.grab_mode = CursorGrabMode::Locked;
            window.cursor_options.visible = false;
        }
        _ => {
            window.cursor_options.grab_mode = CursorGrabMode::None;
            window.cursor_options.visible = true;
        }
    }
}

/// Applies one frame of look input to the rig targets.
pub fn apply_look(controller: &mut CameraController, delta: Vec2, config: &SimConfig) {
    controller.yaw_target -= delta.x * config.look_sensitivity;
    controller.pitch = (controller.pitch - delta.y * config.look_sensitivity)
        .clamp(-config.pitch_limit, config.pitch_limit);
}

/// World orientation of the rig: yaw applied in world space first, pitch as
/// a local tilt. Reversing the order rolls the horizon on combined look.
pub fn compose_orientation(yaw: f32, pitch: f32) -> Quat {
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch)
}

/// Accumulates pointer/touch look and wheel/pinch zoom into the rig.
pub fn camera_look(
    input: Res<PlayerInput>,
    config: Res<SimConfig>,
    mut query: Query<&mut CameraController>,
) {
    let Ok(mut controller) = query.get_single_mut() else {
        return;
    };

    let look_allowed = input.pointer_locked || (config.hover_look && input.hovering);
    if look_allowed && input.look_delta != Vec2::ZERO {
        apply_look(&mut controller, input.look_delta, &config);
    }

    if input.zoom_delta != 0.0 {
        controller.zoom = (controller.zoom + input.zoom_delta * config.zoom_rate)
            .clamp(config.zoom_min, config.zoom_max);
    }
}

/// Moves the camera toward the eye anchor and eases its orientation toward
/// the composed yaw/pitch. Lerped rather than snapped to avoid jitter.
pub fn camera_follow(
    config: Res<SimConfig>,
    anchor: Query<&GlobalTransform, With<EyeAnchor>>,
    mut query: Query<(&mut Transform, &mut CameraController)>,
) {
    let Ok((mut transform, mut controller)) = query.get_single_mut() else {
        return;
    };
    let Ok(anchor) = anchor.get_single() else {
        // Body not mounted yet; skip this frame's follow.
        return;
    };

    // Yaw accumulates unbounded, so a plain lerp is exact here.
    controller.yaw += (controller.yaw_target - controller.yaw) * config.camera_smoothing;

    let eye = anchor.translation();
    transform.translation = transform.translation.lerp(eye, config.camera_smoothing);

    let target = compose_orientation(controller.yaw, controller.pitch);
    transform.rotation = transform.rotation.slerp(target, config.camera_smoothing);
}
