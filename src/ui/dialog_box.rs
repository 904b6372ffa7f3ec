use bevy::prelude::*;

use crate::game_state::ControlLock;
use crate::quest::{ActiveDialog, DialogCompleted};

/// Marker for the dialog panel root.
#[derive(Component)]
pub struct DialogPanel;

/// Marker for the speaker name text.
#[derive(Component)]
pub struct SpeakerText;

/// Marker for the dialog line text.
#[derive(Component)]
pub struct LineText;

pub fn setup_dialog_box(mut commands: Commands) {
    commands
        .spawn((
            DialogPanel,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(15.0),
                right: Val::Percent(15.0),
                bottom: Val::Px(40.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.85)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                SpeakerText,
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.75, 0.3)),
            ));
            parent.spawn((
                LineText,
                Text::new(""),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.95, 0.95)),
            ));
            parent.spawn((
                Text::new("Enter to continue"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
            ));
        });
}

/// Mirrors the active dialog line into the panel.
pub fn sync_dialog_box(
    dialog: Res<ActiveDialog>,
    mut panel: Query<&mut Visibility, With<DialogPanel>>,
    mut speaker: Query<&mut Text, (With<SpeakerText>, Without<LineText>)>,
    mut line: Query<&mut Text, (With<LineText>, Without<SpeakerText>)>,
) {
    let Ok(mut visibility) = panel.get_single_mut() else {
        return;
    };
    match dialog.current() {
        Some(current) => {
            *visibility = Visibility::Inherited;
            if let Ok(mut text) = speaker.get_single_mut() {
                text.0 = current.speaker.to_string();
            }
            if let Ok(mut text) = line.get_single_mut() {
                text.0 = current.text.clone();
            }
        }
        None => *visibility = Visibility::Hidden,
    }
}

/// Enter/Space walks the script; the final line completes the dialog and
/// releases the control lock.
pub fn advance_dialog(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut dialog: ResMut<ActiveDialog>,
    mut lock: ResMut<ControlLock>,
    mut completed: EventWriter<DialogCompleted>,
) {
    if !dialog.is_open() {
        return;
    }
    if keyboard.just_pressed(KeyCode::Enter) || keyboard.just_pressed(KeyCode::Space) {
        if dialog.advance() {
            lock.dialog_open = false;
            completed.send(DialogCompleted);
        }
    }
}
