mod camera;
mod cinematic;
mod config;
mod game_state;
mod input;
mod player;
mod quest;
mod ui;
mod world;

use avian3d::prelude::PhysicsPlugins;
use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::PresentMode,
};

use camera::CameraPlugin;
use cinematic::CinematicPlugin;
use config::SimConfig;
use game_state::{AppState, ControlLock, SimSet};
use input::InputPlugin;
use player::PlayerPlugin;
use quest::QuestPlugin;
use ui::UiPlugin;
use world::WorldPlugin;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Hearthlight".to_string(),
                    present_mode: PresentMode::AutoNoVsync,
                    ..default()
                }),
                ..default()
            }),
        )
        .add_plugins((
            PhysicsPlugins::default(),
            FrameTimeDiagnosticsPlugin::default(),
            LogDiagnosticsPlugin::default(),
        ))
        .insert_resource(SimConfig::load_or_default("config/settings.json"))
        .init_resource::<ControlLock>()
        .init_state::<AppState>()
        .configure_sets(
            Update,
            (
                SimSet::Look,
                SimSet::Character,
                SimSet::Camera,
                SimSet::Interaction,
                SimSet::Quest,
                SimSet::Cinematic,
            )
                .chain(),
        )
        .add_plugins((
            InputPlugin,
            WorldPlugin,
            PlayerPlugin,
            CameraPlugin,
            QuestPlugin,
            CinematicPlugin,
            UiPlugin,
        ))
        .run();
}
