use bevy::prelude::*;
use bevy::utils::HashMap;

/// Names the detector recognizes even when an object (or its ancestors) was
/// never registered, matched exactly or by prefix.
pub const RESERVED_NAMES: &[&str] = &["Letter", "Gift", "WindowSeat"];

/// Prefix of the gift prop's name; interacting with it is quest-gated.
pub const GIFT_PREFIX: &str = "Gift";

/// Prefix of the window-seat prop that triggers the cinematic.
pub const TRIGGER_PREFIX: &str = "WindowSeat";

/// Component for world objects the player can target with the center ray.
#[derive(Component, Clone)]
pub struct Interactable {
    pub name: String,
    /// Animation clips associated with the object, possibly empty.
    pub clips: Vec<String>,
}

impl Interactable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clips: Vec::new(),
        }
    }

    pub fn with_clips(name: impl Into<String>, clips: Vec<String>) -> Self {
        Self {
            name: name.into(),
            clips,
        }
    }
}

/// Per-object metadata held by the registry.
#[derive(Clone)]
pub struct InteractableMeta {
    pub name: String,
    pub clips: Vec<String>,
}

/// Write-once index of interactable scene objects.
///
/// Populated once when the scene signals readiness; the simulation only
/// reads it afterwards. The core never owns scene nodes, it indexes them.
#[derive(Resource, Default)]
pub struct InteractableRegistry {
    entries: HashMap<Entity, InteractableMeta>,
    ready: bool,
}

impl InteractableRegistry {
    pub fn populate(&mut self, entries: impl IntoIterator<Item = (Entity, InteractableMeta)>) {
        self.entries = entries.into_iter().collect();
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, entity: Entity) -> Option<&InteractableMeta> {
        self.entries.get(&entity)
    }

    /// Animation clips for an object name, if it was registered with any.
    pub fn clips_for(&self, name: &str) -> Option<&[String]> {
        self.entries
            .values()
            .find(|meta| meta.name == name)
            .map(|meta| meta.clips.as_slice())
    }
}

/// Exact-or-prefix match against the reserved identifier family.
pub fn matches_reserved(name: &str) -> bool {
    RESERVED_NAMES
        .iter()
        .any(|reserved| name == *reserved || name.starts_with(reserved))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_matching_is_exact_or_prefix() {
        assert!(matches_reserved("Gift"));
        assert!(matches_reserved("Gift.006"));
        assert!(matches_reserved("WindowSeat.001"));
        assert!(matches_reserved("Letter.021_Material.025_0"));
        assert!(!matches_reserved("Chair.001"));
        assert!(!matches_reserved("TheGift"));
    }

    #[test]
    fn registry_lookup_by_name() {
        let mut registry = InteractableRegistry::default();
        let entity = Entity::from_raw(7);
        registry.populate([(
            entity,
            InteractableMeta {
                name: "Gift.006".into(),
                clips: vec!["GiftOpen".into()],
            },
        )]);
        assert!(registry.is_ready());
        assert!(!registry.is_empty());
        assert_eq!(registry.clips_for("Gift.006").unwrap().len(), 1);
        assert!(registry.clips_for("Letter.021").is_none());
        assert_eq!(registry.get(entity).unwrap().name, "Gift.006");
    }
}
