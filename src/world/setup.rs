use avian3d::prelude::*;
use bevy::prelude::*;

use super::components::{Interactable, InteractableMeta, InteractableRegistry};
use super::{ROOM_DEPTH, ROOM_HEIGHT, ROOM_WIDTH, WALL_THICKNESS};

pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Materials
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.4, 0.35, 0.3),
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.75, 0.7),
        ..default()
    });
    let table_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.28, 0.15),
        ..default()
    });
    let letter_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.95, 0.92, 0.8),
        ..default()
    });
    let gift_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.35, 0.8),
        ..default()
    });
    let window_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.6, 0.8, 0.95),
        ..default()
    });

    let floor_y = -4.0;

    // Floor
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(ROOM_WIDTH, WALL_THICKNESS, ROOM_DEPTH))),
        MeshMaterial3d(floor_material),
        Transform::from_xyz(0.0, floor_y, 0.0),
        RigidBody::Static,
        Collider::cuboid(ROOM_WIDTH, WALL_THICKNESS, ROOM_DEPTH),
    ));

    // Walls
    for (position, size) in [
        (
            Vec3::new(0.0, floor_y + ROOM_HEIGHT / 2.0, -ROOM_DEPTH / 2.0),
            Vec3::new(ROOM_WIDTH, ROOM_HEIGHT, WALL_THICKNESS),
        ),
        (
            Vec3::new(0.0, floor_y + ROOM_HEIGHT / 2.0, ROOM_DEPTH / 2.0),
            Vec3::new(ROOM_WIDTH, ROOM_HEIGHT, WALL_THICKNESS),
        ),
        (
            Vec3::new(-ROOM_WIDTH / 2.0, floor_y + ROOM_HEIGHT / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, ROOM_HEIGHT, ROOM_DEPTH),
        ),
        (
            Vec3::new(ROOM_WIDTH / 2.0, floor_y + ROOM_HEIGHT / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, ROOM_HEIGHT, ROOM_DEPTH),
        ),
    ] {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(position),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
        ));
    }

    // Table holding the narrative props
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(2.0, 0.15, 1.0))),
        MeshMaterial3d(table_material),
        Transform::from_xyz(1.5, floor_y + 1.0, -2.0),
        RigidBody::Static,
        Collider::cuboid(2.0, 0.15, 1.0),
        Name::new("Table.001"),
    ));

    // The letter: first quest objective.
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.35, 0.02, 0.25))),
        MeshMaterial3d(letter_material),
        Transform::from_xyz(1.0, floor_y + 1.1, -2.0),
        RigidBody::Static,
        Collider::cuboid(0.35, 0.02, 0.25),
        Interactable::new("Letter.021"),
        Name::new("Letter.021"),
    ));

    // The gift: gated until the letter has been read.
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.4, 0.4, 0.4))),
        MeshMaterial3d(gift_material),
        Transform::from_xyz(2.0, floor_y + 1.3, -2.0),
        RigidBody::Static,
        Collider::cuboid(0.4, 0.4, 0.4),
        Interactable::with_clips("Gift.006", vec!["GiftOpen".into()]),
        Name::new("Gift.006"),
    ));

    // The window seat: cinematic trigger once the quest allows it.
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.6, 1.2, 0.1))),
        MeshMaterial3d(window_material),
        Transform::from_xyz(0.0, floor_y + 1.8, -ROOM_DEPTH / 2.0 + WALL_THICKNESS),
        RigidBody::Static,
        Collider::cuboid(1.6, 1.2, 0.1),
        Interactable::new("WindowSeat.001"),
        Name::new("WindowSeat.001"),
    ));

    // Light
    commands.spawn((
        PointLight {
            intensity: 600_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, floor_y + ROOM_HEIGHT - 0.5, 0.0),
    ));
}

/// One-shot scene-ready hook: indexes every spawned interactable into the
/// write-once registry.
pub fn register_interactables(
    mut registry: ResMut<InteractableRegistry>,
    query: Query<(Entity, &Interactable)>,
) {
    if query.is_empty() {
        return;
    }
    registry.populate(query.iter().map(|(entity, interactable)| {
        (
            entity,
            InteractableMeta {
                name: interactable.name.clone(),
                clips: interactable.clips.clone(),
            },
        )
    }));
    info!("registered {} interactables", query.iter().count());
}
