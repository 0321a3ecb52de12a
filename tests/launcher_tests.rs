//! Launcher preflight and error-surface tests.
//!
//! The launch path itself spawns an external editor and is not exercised
//! here; these tests cover the failure modes the launcher must surface
//! before any filesystem mutation happens.

use kilomoco::launcher::{LauncherError, lookup_profile};
use kilomoco_config::{Profile, ProfileRegistry, builtin_profiles};
use std::collections::HashMap;

#[test]
fn test_unknown_profile_lists_exactly_the_available_ids() {
    let registry = ProfileRegistry::from_profiles(vec![
        Profile::new("lopr", "Low-Price", "", HashMap::new()),
        Profile::new("copr", "Complex-Programming", "", HashMap::new()),
    ]);

    let err = lookup_profile(&registry, "bogus").unwrap_err();
    let LauncherError::UnknownProfile {
        requested,
        available,
    } = &err
    else {
        panic!("expected UnknownProfile, got {err:?}");
    };

    assert_eq!(requested, "bogus");
    assert_eq!(available, &["lopr".to_string(), "copr".to_string()]);
    assert_eq!(
        err.to_string(),
        "Profile 'bogus' not found. Available profiles: lopr, copr"
    );
}

#[test]
fn test_lookup_against_builtin_registry() {
    let registry = builtin_profiles();
    assert_eq!(lookup_profile(&registry, "buco").unwrap().id, "buco");
    assert!(lookup_profile(&registry, "missing").is_err());
}

#[test]
fn test_editor_not_found_message() {
    assert_eq!(
        LauncherError::EditorNotFound.to_string(),
        "VS Code CLI ('code') not found in PATH. Please ensure VS Code is installed."
    );
}
