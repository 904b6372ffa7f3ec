use bevy::prelude::*;

/// Marker component for the player entity (the physics body).
#[derive(Component)]
pub struct Player;

/// Marker for the hidden first-person character model child.
#[derive(Component)]
pub struct CharacterVisual;

/// Marker for the eye-socket anchor the camera lerps toward.
#[derive(Component)]
pub struct EyeAnchor;

/// Rendered facing of the character, smoothed toward the movement heading.
#[derive(Component, Default)]
pub struct Facing {
    /// Heading implied by the latest movement input, radians.
    pub target: f32,
    /// Smoothed angle actually applied to the model.
    pub current: f32,
}

/// Locomotion state exposed to animation/presentation consumers.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
    Run,
}
