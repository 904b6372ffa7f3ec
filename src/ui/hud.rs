use bevy::prelude::*;

use crate::cinematic::CanExitCinematicChanged;
use crate::game_state::{AppState, ControlLock};
use crate::quest::{objective_text, QuestState};
use crate::world::{HoverState, TRIGGER_PREFIX};

/// Marker for the objective tracker text.
#[derive(Component)]
pub struct ObjectiveText;

/// Marker for the center-bottom interact prompt.
#[derive(Component)]
pub struct InteractPrompt;

/// Marker for the cinematic exit hint.
#[derive(Component)]
pub struct ExitHint;

pub fn setup_hud(mut commands: Commands) {
    // Objective tracker, top-left.
    commands
        .spawn((Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(20.0),
            flex_direction: FlexDirection::Column,
            padding: UiRect::all(Val::Px(10.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("CURRENT MISSION"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.75, 0.3)),
            ));
            parent.spawn((
                ObjectiveText,
                Text::new(objective_text(0)),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
            ));
        });

    // Interact prompt, bottom-center.
    commands
        .spawn((Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            bottom: Val::Px(28.0),
            justify_content: JustifyContent::Center,
            ..default()
        },))
        .with_children(|parent| {
            parent.spawn((
                InteractPrompt,
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.45)),
                Visibility::Hidden,
            ));
        });

    // Cinematic exit hint, top-right.
    commands.spawn((
        ExitHint,
        Text::new("Press ESC to exit"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.6, 0.6)),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(24.0),
            top: Val::Px(24.0),
            ..default()
        },
        Visibility::Hidden,
    ));
}

pub fn update_objective(
    quest: Res<QuestState>,
    mut query: Query<&mut Text, With<ObjectiveText>>,
) {
    if !quest.is_changed() {
        return;
    }
    for mut text in query.iter_mut() {
        text.0 = objective_text(quest.step()).to_string();
    }
}

pub fn update_prompt(
    state: Res<State<AppState>>,
    hover: Res<HoverState>,
    lock: Res<ControlLock>,
    mut query: Query<(&mut Text, &mut Visibility), With<InteractPrompt>>,
) {
    let Ok((mut text, mut visibility)) = query.get_single_mut() else {
        return;
    };
    // The detector stops while the sequencer owns the camera, so the hover
    // state is stale for the whole cinematic.
    if *state.get() == AppState::Cinematic {
        *visibility = Visibility::Hidden;
        return;
    }
    match hover.current.as_deref() {
        Some(name) if !lock.blocked() => {
            text.0 = if name.starts_with(TRIGGER_PREFIX) {
                "Press F for cinematic mode".to_string()
            } else {
                "Press E to interact".to_string()
            };
            *visibility = Visibility::Inherited;
        }
        _ => *visibility = Visibility::Hidden,
    }
}

pub fn update_exit_hint(
    mut events: EventReader<CanExitCinematicChanged>,
    mut query: Query<&mut Visibility, With<ExitHint>>,
) {
    for CanExitCinematicChanged(allowed) in events.read() {
        for mut visibility in query.iter_mut() {
            *visibility = if *allowed {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn prompt_world(state: AppState, hovered: Option<&str>) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(State::new(state));
        let mut hover = HoverState::default();
        hover.current = hovered.map(str::to_owned);
        world.insert_resource(hover);
        world.insert_resource(ControlLock::default());
        let entity = world
            .spawn((InteractPrompt, Text::new(""), Visibility::Inherited))
            .id();
        (world, entity)
    }

    #[test]
    fn prompt_shows_while_exploring_with_a_target() {
        let (mut world, entity) = prompt_world(AppState::Exploring, Some("WindowSeat.001"));
        world.run_system_once(update_prompt).unwrap();
        assert_eq!(*world.get::<Visibility>(entity).unwrap(), Visibility::Inherited);
        assert!(world.get::<Text>(entity).unwrap().0.contains("F"));
    }

    #[test]
    fn prompt_hides_during_cinematic_despite_stale_hover() {
        // The trigger was hovered on the frame the cinematic started and the
        // detector has not run since.
        let (mut world, entity) = prompt_world(AppState::Cinematic, Some("WindowSeat.001"));
        world.run_system_once(update_prompt).unwrap();
        assert_eq!(*world.get::<Visibility>(entity).unwrap(), Visibility::Hidden);
    }
}
