use avian3d::prelude::*;
use bevy::prelude::*;

use super::components::{matches_reserved, InteractableRegistry};
use crate::config::SimConfig;
use crate::input::PlayerInput;
use crate::player::Player;

/// Event fired when the center-screen ray resolves to a different object
/// (or stops resolving). Fires at most once per actual change.
#[derive(Event, Debug, Clone)]
pub struct HoverChanged(pub Option<String>);

/// Event fired on an interact press-edge while an object is resolved.
#[derive(Event, Debug, Clone)]
pub struct Interact(pub String);

/// Events produced by one frame of edge detection.
#[derive(Default, Debug, PartialEq)]
pub struct FrameEvents {
    /// `Some(new_name)` when the resolved name changed this frame.
    pub hover_changed: Option<Option<String>>,
    pub interact: Option<String>,
}

/// Hover/interact edge detection, separated from the raycast so the
/// once-per-change and press-edge guarantees are testable on their own.
#[derive(Default, Debug)]
pub struct EdgeDetector {
    last_name: Option<String>,
    was_interact_down: bool,
}

impl EdgeDetector {
    /// Feeds one frame's resolved name and interact-held state.
    ///
    /// The interact latch updates every frame regardless of whether a name
    /// is resolved, so releasing and re-pressing while hovering re-fires.
    pub fn observe(&mut self, name: Option<&str>, interact_down: bool) -> FrameEvents {
        let mut events = FrameEvents::default();

        if name != self.last_name.as_deref() {
            self.last_name = name.map(str::to_owned);
            events.hover_changed = Some(self.last_name.clone());
        }

        if interact_down && !self.was_interact_down {
            if let Some(current) = &self.last_name {
                events.interact = Some(current.clone());
            }
        }
        self.was_interact_down = interact_down;

        events
    }

    pub fn current(&self) -> Option<&str> {
        self.last_name.as_deref()
    }
}

/// Resource tracking what the player is currently looking at.
#[derive(Resource, Default)]
pub struct HoverState {
    detector: EdgeDetector,
    frame_counter: u32,
    /// Resolved name, mirrored for UI/quest reads.
    pub current: Option<String>,
}

/// Raycasts from the camera along its forward axis and resolves the nearest
/// registered (or reserved-named) object, emitting hover/interact events.
pub fn detect_interactable(
    input: Res<PlayerInput>,
    config: Res<SimConfig>,
    registry: Res<InteractableRegistry>,
    spatial: SpatialQuery,
    camera: Query<&GlobalTransform, With<Camera3d>>,
    player: Query<Entity, With<Player>>,
    parents: Query<&Parent>,
    names: Query<&Name>,
    mut hover: ResMut<HoverState>,
    mut hover_events: EventWriter<HoverChanged>,
    mut interact_events: EventWriter<Interact>,
) {
    // With a populated registry the cast is cheap enough every frame;
    // otherwise fall back to a fixed cadence.
    hover.frame_counter = (hover.frame_counter + 1) % config.raycast_throttle.max(1);
    let should_check = !registry.is_empty() || hover.frame_counter == 0;
    if !should_check {
        return;
    }

    let Ok(camera_transform) = camera.get_single() else {
        return;
    };
    let origin = camera_transform.translation();
    if !origin.is_finite() {
        warn!("skipping interaction ray: camera transform not finite");
        return;
    }

    let mut filter = SpatialQueryFilter::default();
    if let Ok(player_entity) = player.get_single() {
        filter = filter.with_excluded_entities([player_entity]);
    }

    let mut hits = spatial.ray_hits(
        origin,
        camera_transform.forward(),
        config.interact_distance,
        16,
        true,
        &filter,
    );
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    // Nearest-first: for each hit walk its ancestor chain looking for a
    // registry entry or a reserved name; first match wins.
    let mut resolved: Option<String> = None;
    'hits: for hit in &hits {
        for entity in std::iter::once(hit.entity).chain(parents.iter_ancestors(hit.entity)) {
            if let Some(meta) = registry.get(entity) {
                resolved = Some(meta.name.clone());
                break 'hits;
            }
            if let Ok(name) = names.get(entity) {
                if matches_reserved(name.as_str()) {
                    resolved = Some(name.as_str().to_owned());
                    break 'hits;
                }
            }
        }
    }

    let events = hover.detector.observe(resolved.as_deref(), input.interact);
    hover.current = hover.detector.current().map(str::to_owned);

    if let Some(change) = events.hover_changed {
        match &change {
            Some(name) => info!("hover start: {name}"),
            None => info!("hover end"),
        }
        hover_events.send(HoverChanged(change));
    }
    if let Some(name) = events.interact {
        info!("interact: {name}");
        interact_events.send(Interact(name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_change_fires_once_per_change() {
        let mut detector = EdgeDetector::default();

        let first = detector.observe(Some("Gift.006"), false);
        assert_eq!(first.hover_changed, Some(Some("Gift.006".into())));

        // Same target across consecutive frames: silent.
        for _ in 0..10 {
            let repeat = detector.observe(Some("Gift.006"), false);
            assert_eq!(repeat.hover_changed, None);
        }

        let cleared = detector.observe(None, false);
        assert_eq!(cleared.hover_changed, Some(None));

        let again = detector.observe(None, false);
        assert_eq!(again.hover_changed, None);
    }

    #[test]
    fn interact_fires_only_on_press_edge_with_target() {
        let mut detector = EdgeDetector::default();
        detector.observe(Some("Letter.021"), false);

        let press = detector.observe(Some("Letter.021"), true);
        assert_eq!(press.interact, Some("Letter.021".into()));

        // Holding must not repeat-fire.
        for _ in 0..20 {
            let held = detector.observe(Some("Letter.021"), true);
            assert_eq!(held.interact, None);
        }

        // Release and re-press while still hovering fires exactly once more.
        detector.observe(Some("Letter.021"), false);
        let again = detector.observe(Some("Letter.021"), true);
        assert_eq!(again.interact, Some("Letter.021".into()));
    }

    #[test]
    fn press_with_no_target_is_latched_but_silent() {
        let mut detector = EdgeDetector::default();

        let pressed = detector.observe(None, true);
        assert_eq!(pressed.interact, None);

        // Key was already held when the target appeared: no event until a
        // fresh press-edge.
        let hover = detector.observe(Some("Gift.006"), true);
        assert_eq!(hover.interact, None);

        detector.observe(Some("Gift.006"), false);
        let edge = detector.observe(Some("Gift.006"), true);
        assert_eq!(edge.interact, Some("Gift.006".into()));
    }

    #[test]
    fn hover_switch_between_objects_fires_each_change() {
        let mut detector = EdgeDetector::default();
        detector.observe(Some("Letter.021"), false);
        let switched = detector.observe(Some("Gift.006"), false);
        assert_eq!(switched.hover_changed, Some(Some("Gift.006".into())));
        assert_eq!(detector.current(), Some("Gift.006"));
    }
}
