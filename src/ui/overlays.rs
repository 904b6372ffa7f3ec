use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::game_state::{ControlLock, OverlayKind};
use crate::quest::OverlayClosed;

/// Marker for the fullscreen letter/message panel.
#[derive(Component)]
pub struct MessagePanel;

/// Marker for the fullscreen gift inspection panel.
#[derive(Component)]
pub struct GiftPanel;

pub fn setup_overlays(mut commands: Commands) {
    spawn_panel(
        &mut commands,
        MessagePanel,
        "Merry Christmas!\n\nYou have come through this year wonderfully.\nLet its warmth recharge you: what you did was only the beginning.\n\nEsc to close",
        Color::srgba(0.12, 0.08, 0.02, 0.92),
    );
    spawn_panel(
        &mut commands,
        GiftPanel,
        "Your present!\n\n(turn it over, admire it)\n\nEsc to close",
        Color::srgba(0.02, 0.06, 0.12, 0.92),
    );
}

fn spawn_panel(commands: &mut Commands, marker: impl Component, body: &str, color: Color) {
    commands
        .spawn((
            marker,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(color),
            Visibility::Hidden,
            GlobalZIndex(10),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(body),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.93, 0.85)),
            ));
        });
}

/// Shows/hides the panels to match the control lock and swaps the cursor
/// grab when an overlay opens or closes.
pub fn sync_overlays(
    lock: Res<ControlLock>,
    mut previous: Local<Option<OverlayKind>>,
    mut message: Query<&mut Visibility, (With<MessagePanel>, Without<GiftPanel>)>,
    mut gift: Query<&mut Visibility, (With<GiftPanel>, Without<MessagePanel>)>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if lock.overlay == *previous {
        return;
    }

    if let Ok(mut visibility) = message.get_single_mut() {
        *visibility = if lock.overlay == Some(OverlayKind::Message) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    if let Ok(mut visibility) = gift.get_single_mut() {
        *visibility = if lock.overlay == Some(OverlayKind::Gift) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    if let Ok(mut window) = windows.get_single_mut() {
        if lock.overlay.is_some() {
            window.cursor_options.grab_mode = CursorGrabMode::None;
            window.cursor_options.visible = true;
        } else {
            window.cursor_options.grab_mode = CursorGrabMode::Locked;
            window.cursor_options.visible = false;
        }
    }

    *previous = lock.overlay;
}

/// Escape closes the open overlay and reports it to the quest machine.
pub fn close_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut lock: ResMut<ControlLock>,
    mut closed: EventWriter<OverlayClosed>,
) {
    let Some(kind) = lock.overlay else {
        return;
    };
    if keyboard.just_pressed(KeyCode::Escape) {
        lock.overlay = None;
        closed.send(OverlayClosed(kind));
    }
}
