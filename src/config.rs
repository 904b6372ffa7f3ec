use std::f32::consts::FRAC_PI_4;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

/// One leg of the cinematic camera path.
#[derive(Debug, Clone, Deserialize)]
pub struct ShotConfig {
    pub start: [f32; 3],
    pub end: [f32; 3],
    pub target: [f32; 3],
    /// Seconds spent interpolating from start to end.
    pub duration: f32,
}

/// Offsets (seconds from finale start) for the credit timeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CreditTimeline {
    pub contact: f32,
    pub thanks: f32,
    pub dedication: f32,
    pub greeting: f32,
    pub finished: f32,
}

impl Default for CreditTimeline {
    fn default() -> Self {
        Self {
            contact: 10.0,
            thanks: 16.0,
            dedication: 22.0,
            greeting: 28.0,
            finished: 61.0,
        }
    }
}

/// Every tunable of the simulation core, loadable from JSON.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // Character
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Per-frame fraction the rendered facing moves toward its target.
    pub rotation_smoothing: f32,
    pub jump_impulse: f32,
    pub spawn_point: [f32; 3],
    /// Falling below this Y respawns the character.
    pub fall_y: f32,
    /// Vertical speed below which the character counts as grounded.
    pub grounded_epsilon: f32,

    // Camera
    pub look_sensitivity: f32,
    pub pitch_limit: f32,
    pub camera_smoothing: f32,
    pub eye_height: f32,
    /// Accept look input while merely hovering the window (no pointer lock).
    pub hover_look: bool,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_rate: f32,

    // Interaction
    /// Raycast cadence in frames when no registry has been populated.
    pub raycast_throttle: u32,
    pub interact_distance: f32,

    // Cinematic
    pub shots: Vec<ShotConfig>,
    pub credits: CreditTimeline,
    /// Per-frame convergence rate for finale/greeting text opacity.
    pub text_fade_rate: f32,
    /// Per-frame convergence rate for credit line opacity.
    pub credit_fade_rate: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            walk_speed: 0.8,
            run_speed: 1.6,
            rotation_smoothing: 0.1,
            jump_impulse: 0.1,
            spawn_point: [0.0, -2.5, 2.0],
            fall_y: -5.0,
            grounded_epsilon: 0.05,

            look_sensitivity: 0.005,
            pitch_limit: FRAC_PI_4,
            camera_smoothing: 0.1,
            eye_height: 3.0,
            hover_look: true,
            zoom_min: 2.0,
            zoom_max: 8.0,
            zoom_rate: 0.01,

            raycast_throttle: 8,
            interact_distance: 100.0,

            shots: vec![
                ShotConfig {
                    start: [-1.6, 3.5, 4.6],
                    end: [-1.6, 1.5, 1.0],
                    target: [4.0, 0.0, 0.0],
                    duration: 16.2,
                },
                ShotConfig {
                    start: [4.0, 2.0, 0.0],
                    end: [0.0, 2.0, 5.0],
                    target: [0.0, 1.0, 0.0],
                    duration: 11.5,
                },
                ShotConfig {
                    start: [-3.0, -2.0, 0.0],
                    end: [-1.0, 3.0, 1.0],
                    target: [0.0, -20.4, 0.0],
                    duration: 9.0,
                },
                ShotConfig {
                    start: [6.0, 1.5, 4.0],
                    end: [2.0, 1.0, 2.0],
                    target: [-140.0, -13.5, 10.5],
                    duration: 6.2,
                },
                ShotConfig {
                    start: [-3.1, 1.0, 1.0],
                    end: [15.0, 2.0, 8.0],
                    target: [35.1, 0.0, 11.1],
                    duration: 5.5,
                },
            ],
            credits: CreditTimeline::default(),
            text_fade_rate: 0.02,
            credit_fade_rate: 0.03,
        }
    }
}

impl SimConfig {
    /// Loads the config from a JSON file, falling back to defaults when the
    /// file is missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => {
                    info!("loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    warn!("ignoring malformed config {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn spawn_point(&self) -> Vec3 {
        Vec3::from_array(self.spawn_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = SimConfig::default();
        assert!(config.walk_speed < config.run_speed);
        assert_eq!(config.shots.len(), 5);
        assert!(config.zoom_min < config.zoom_max);
        assert!((config.pitch_limit - FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn credit_timeline_is_ascending() {
        let credits = CreditTimeline::default();
        let order = [
            credits.contact,
            credits.thanks,
            credits.dedication,
            credits.greeting,
            credits.finished,
        ];
        assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{ "walk_speed": 2.0, "hover_look": false }"#).unwrap();
        assert_eq!(config.walk_speed, 2.0);
        assert!(!config.hover_look);
        assert_eq!(config.run_speed, SimConfig::default().run_speed);
    }
}
