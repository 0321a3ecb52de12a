//! Profile types and the ordered registry.
//!
//! A profile is a named mapping from Kilo Code operation modes to model
//! identifiers. The registry is ephemeral: callers rebuild it on each query
//! via [`crate::discovery::resolve_profiles`] rather than caching it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named mode-combination: one model identifier per operation mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier for this profile (registry key).
    pub id: String,

    /// Display name for the profile.
    pub name: String,

    /// Display description.
    #[serde(default)]
    pub description: String,

    /// Mode name → model identifier. A profile with zero modes is legal
    /// but degenerate; it can never be matched back from live settings.
    pub modes: HashMap<String, String>,
}

impl Profile {
    /// Create a new profile with the given identity and mode mapping.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        modes: HashMap<String, String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            modes,
        }
    }
}

/// The resolved, deduplicated set of profiles after merging all sources.
///
/// Profiles are indexed by id and iterated in insertion order so that
/// "first match wins" operations are deterministic. Inserting a profile
/// whose id is already present fully replaces the stored profile (no
/// field-level merge) while keeping its original position.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    /// All profiles indexed by id
    profiles: HashMap<String, Profile>,

    /// Ordered list of profile ids for deterministic iteration
    order: Vec<String>,
}

impl ProfileRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Create a registry from a sequence of profiles, preserving order.
    pub fn from_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let mut registry = Self::new();
        for profile in profiles {
            registry.insert(profile);
        }
        registry
    }

    /// Insert a profile, fully replacing any existing profile with the same
    /// id. A replaced profile keeps its original iteration position.
    pub fn insert(&mut self, profile: Profile) {
        if !self.profiles.contains_key(&profile.id) {
            self.order.push(profile.id.clone());
        }
        self.profiles.insert(profile.id.clone(), profile);
    }

    /// Get a profile by id.
    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.get(id)
    }

    /// Check whether a profile with the given id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.profiles.contains_key(id)
    }

    /// Iterate over profile ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Iterate over profiles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.order.iter().filter_map(|id| self.profiles.get(id))
    }

    /// Consume the registry, yielding profiles in insertion order.
    pub fn into_profiles(mut self) -> Vec<Profile> {
        self.order
            .iter()
            .filter_map(|id| self.profiles.remove(id))
            .collect()
    }

    /// Number of profiles in the registry.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if the registry holds no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, model: &str) -> Profile {
        Profile::new(
            id,
            format!("{id} profile"),
            "",
            HashMap::from([("default".to_string(), model.to_string())]),
        )
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = ProfileRegistry::new();
        registry.insert(profile("lopr", "llama-4-maverick"));

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("lopr"));
        assert_eq!(
            registry.get("lopr").unwrap().modes["default"],
            "llama-4-maverick"
        );
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_insert_replaces_fully_and_keeps_position() {
        let mut registry = ProfileRegistry::new();
        registry.insert(Profile::new(
            "a",
            "First",
            "original description",
            HashMap::from([("default".to_string(), "m1".to_string())]),
        ));
        registry.insert(profile("b", "m2"));

        // Replacement has no description; it must not inherit the original's.
        registry.insert(Profile::new(
            "a",
            "Replaced",
            "",
            HashMap::from([("code".to_string(), "m3".to_string())]),
        ));

        assert_eq!(registry.len(), 2);
        let ids: Vec<&str> = registry.ids().collect();
        assert_eq!(ids, vec!["a", "b"]);

        let replaced = registry.get("a").unwrap();
        assert_eq!(replaced.name, "Replaced");
        assert_eq!(replaced.description, "");
        assert!(!replaced.modes.contains_key("default"));
        assert_eq!(replaced.modes["code"], "m3");
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let registry = ProfileRegistry::from_profiles(vec![
            profile("c", "m1"),
            profile("a", "m2"),
            profile("b", "m3"),
        ]);

        let ids: Vec<&str> = registry.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_into_profiles_preserves_order() {
        let registry =
            ProfileRegistry::from_profiles(vec![profile("z", "m1"), profile("a", "m2")]);
        let profiles = registry.into_profiles();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].id, "z");
        assert_eq!(profiles[1].id, "a");
    }
}
