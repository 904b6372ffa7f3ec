use avian3d::prelude::*;
use bevy::prelude::*;

use super::components::{AnimationState, CharacterVisual, EyeAnchor, Facing, Player};
use crate::camera::CameraController;
use crate::config::SimConfig;
use crate::game_state::ControlLock;
use crate::input::PlayerInput;

use std::f32::consts::{PI, TAU};

/// Wraps an angle into (-PI, PI].
pub fn normalize_angle(mut angle: f32) -> f32 {
    while angle > PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

/// Angle lerp taking the shortest arc, so facing never spins the long way
/// around the +-PI discontinuity.
pub fn lerp_angle(start: f32, end: f32, t: f32) -> f32 {
    let mut start = normalize_angle(start);
    let mut end = normalize_angle(end);
    if (end - start).abs() > PI {
        if end > start {
            start += TAU;
        } else {
            end += TAU;
        }
    }
    normalize_angle(start + (end - start) * t)
}

/// Raw movement axes from the held keys. Opposite keys cancel; diagonals are
/// deliberately left unnormalized (matches the original handling).
pub fn input_axes(input: &PlayerInput) -> Vec2 {
    let mut axes = Vec2::ZERO;
    if input.forward {
        axes.y -= 1.0;
    }
    if input.backward {
        axes.y += 1.0;
    }
    if input.left {
        axes.x -= 1.0;
    }
    if input.right {
        axes.x += 1.0;
    }
    axes
}

/// Camera-relative heading for a movement input, radians.
pub fn movement_heading(axes: Vec2, camera_yaw: f32) -> f32 {
    axes.x.atan2(axes.y) + camera_yaw
}

pub fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let body_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.7, 0.2, 0.2),
        ..default()
    });

    commands
        .spawn((
            Player,
            Facing::default(),
            AnimationState::default(),
            RigidBody::Dynamic,
            Collider::capsule(0.3, 1.2),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            AngularVelocity::default(),
            ExternalImpulse::default().with_persistence(false),
            Transform::from_xyz(0.0, 2.0, 2.0),
            Visibility::default(),
        ))
        .with_children(|parent| {
            // Eye-level anchor the first-person camera lerps toward.
            parent.spawn((EyeAnchor, Transform::from_xyz(0.0, 3.0, 0.0)));

            // Body model stays hidden in first-person but still tracks the
            // smoothed facing for anything that later shows it.
            parent.spawn((
                CharacterVisual,
                Mesh3d(meshes.add(Capsule3d::new(0.3, 1.2))),
                MeshMaterial3d(body_material),
                Transform::from_xyz(0.0, -0.25, 0.0),
                Visibility::Hidden,
            ));
        });
}

/// Jump and walk/run control. Skipped entirely while a dialog, overlay or
/// the cinematic holds the controls; gravity and the respawn safety net keep
/// running elsewhere.
pub fn player_movement(
    input: Res<PlayerInput>,
    lock: Res<ControlLock>,
    config: Res<SimConfig>,
    camera: Query<&CameraController>,
    mut query: Query<
        (
            &mut LinearVelocity,
            &mut ExternalImpulse,
            &mut Facing,
            &mut AnimationState,
        ),
        With<Player>,
    >,
) {
    if lock.blocked() {
        return;
    }
    let Ok((mut velocity, mut impulse, mut facing, mut animation)) = query.get_single_mut() else {
        return;
    };
    let Ok(camera) = camera.get_single() else {
        return;
    };

    // Jump while grounded. Grounded is derived from vertical speed, which
    // goes non-zero right after the impulse, so holding jump is harmless.
    let grounded = velocity.y.abs() < config.grounded_epsilon;
    if input.jump && grounded {
        impulse.apply_impulse(Vec3::Y * config.jump_impulse);
    }

    let axes = input_axes(&input);
    if axes != Vec2::ZERO {
        let speed = if input.run {
            config.run_speed
        } else {
            config.walk_speed
        };
        facing.target = movement_heading(axes, camera.yaw_target);
        velocity.x = facing.target.sin() * speed;
        velocity.z = facing.target.cos() * speed;
        *animation = if input.run {
            AnimationState::Run
        } else {
            AnimationState::Walk
        };
    } else {
        // Gravity owns the vertical component; only the input axes stop.
        velocity.x = 0.0;
        velocity.z = 0.0;
        *animation = AnimationState::Idle;
    }
}

/// Rotates the (hidden) body model toward the movement heading.
pub fn smooth_facing(
    config: Res<SimConfig>,
    mut player: Query<&mut Facing, With<Player>>,
    mut visual: Query<&mut Transform, With<CharacterVisual>>,
) {
    let Ok(mut facing) = player.get_single_mut() else {
        return;
    };
    facing.current = lerp_angle(facing.current, facing.target, config.rotation_smoothing);

    if let Ok(mut transform) = visual.get_single_mut() {
        transform.rotation = Quat::from_rotation_y(facing.current);
    }
}

/// Respawn on the respawn key or after falling out of the room. Runs in
/// every state so a fall during a dialog still recovers.
pub fn respawn_check(
    input: Res<PlayerInput>,
    config: Res<SimConfig>,
    mut query: Query<
        (&mut Transform, &mut LinearVelocity, &mut AngularVelocity),
        With<Player>,
    >,
) {
    let Ok((mut transform, mut velocity, mut angular)) = query.get_single_mut() else {
        return;
    };

    if input.respawn || transform.translation.y < config.fall_y {
        transform.translation = config.spawn_point();
        velocity.0 = Vec3::ZERO;
        angular.0 = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    const EPS: f32 = 1e-4;

    fn world_with_player(translation: Vec3, respawn_held: bool) -> (World, Entity) {
        let mut world = World::new();
        let mut input = PlayerInput::default();
        input.respawn = respawn_held;
        world.insert_resource(input);
        world.insert_resource(SimConfig::default());
        let entity = world
            .spawn((
                Player,
                Transform::from_translation(translation),
                LinearVelocity(Vec3::new(1.0, -2.0, 0.5)),
                AngularVelocity(Vec3::new(0.3, 0.0, -0.1)),
            ))
            .id();
        (world, entity)
    }

    #[test]
    fn respawn_key_resets_position_and_velocities() {
        let (mut world, entity) = world_with_player(Vec3::new(3.0, 1.0, -2.0), true);
        world.run_system_once(respawn_check).unwrap();

        let transform = world.get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, SimConfig::default().spawn_point());
        assert_eq!(world.get::<LinearVelocity>(entity).unwrap().0, Vec3::ZERO);
        assert_eq!(world.get::<AngularVelocity>(entity).unwrap().0, Vec3::ZERO);
    }

    #[test]
    fn falling_below_threshold_respawns_without_the_key() {
        let config = SimConfig::default();
        let below = Vec3::new(0.0, config.fall_y - 1.0, 0.0);
        let (mut world, entity) = world_with_player(below, false);
        world.run_system_once(respawn_check).unwrap();

        let transform = world.get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, config.spawn_point());
        assert_eq!(world.get::<LinearVelocity>(entity).unwrap().0, Vec3::ZERO);
        assert_eq!(world.get::<AngularVelocity>(entity).unwrap().0, Vec3::ZERO);
    }

    #[test]
    fn player_above_threshold_is_left_alone() {
        let start = Vec3::new(1.0, -2.0, 1.0);
        let (mut world, entity) = world_with_player(start, false);
        world.run_system_once(respawn_check).unwrap();

        let transform = world.get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, start);
        assert_ne!(world.get::<LinearVelocity>(entity).unwrap().0, Vec3::ZERO);
    }

    #[test]
    fn normalize_wraps_into_range() {
        assert!((normalize_angle(TAU + 0.5) - 0.5).abs() < EPS);
        assert!((normalize_angle(-TAU - 0.5) + 0.5).abs() < EPS);
        assert!((normalize_angle(0.0)).abs() < EPS);
    }

    #[test]
    fn lerp_angle_takes_shortest_arc() {
        // 3.0 -> -3.0 should pass through PI, not through zero.
        let mid = lerp_angle(3.0, -3.0, 0.5);
        assert!(
            (mid - PI).abs() < 1e-3 || (mid + PI).abs() < 1e-3,
            "expected wrap through PI, got {mid}"
        );

        // A small step in the same direction as the gap.
        let step = lerp_angle(0.0, 1.0, 0.1);
        assert!((step - 0.1).abs() < EPS);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut input = PlayerInput::default();
        input.forward = true;
        input.backward = true;
        input.left = true;
        assert_eq!(input_axes(&input), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn heading_is_camera_relative() {
        let mut input = PlayerInput::default();
        input.forward = true;
        let axes = input_axes(&input);

        // Forward with no camera yaw points down -Z.
        let heading = movement_heading(axes, 0.0);
        let velocity = Vec2::new(heading.sin(), heading.cos());
        assert!(velocity.x.abs() < EPS);
        assert!((velocity.y + 1.0).abs() < EPS);

        // Camera yaw rotates the heading with it.
        let turned = movement_heading(axes, 0.7);
        assert!((normalize_angle(turned - heading) - 0.7).abs() < EPS);
    }

    #[test]
    fn diagonal_heading_splits_axes() {
        let mut input = PlayerInput::default();
        input.forward = true;
        input.right = true;
        let heading = movement_heading(input_axes(&input), 0.0);
        // atan2(1, -1) = 3/4 PI.
        assert!((heading - 3.0 * PI / 4.0).abs() < EPS);
    }
}
