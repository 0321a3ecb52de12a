//! Reverse-matching an instance's persisted settings back to a profile.
//!
//! Purely advisory: results feed the instance display, never a
//! correctness-critical decision, so every failure mode — missing file,
//! corrupt JSON, foreign settings — resolves to "no match" instead of an
//! error.

use super::SETTINGS_NAMESPACE;
use super::detect::Instance;
use kilomoco_config::ProfileRegistry;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Extract every `<namespace>.<mode>.model` string entry from a parsed
/// settings document into a mode→model mapping. Non-string values and
/// foreign keys are ignored.
pub fn extract_mode_models(settings: &serde_json::Value) -> HashMap<String, String> {
    let mut modes = HashMap::new();

    let Some(object) = settings.as_object() else {
        return modes;
    };
    for (key, value) in object {
        let Some(rest) = key.strip_prefix(SETTINGS_NAMESPACE) else {
            continue;
        };
        let Some(rest) = rest.strip_prefix('.') else {
            continue;
        };
        let Some(mode) = rest.strip_suffix(".model") else {
            continue;
        };
        if mode.is_empty() || mode.contains('.') {
            continue;
        }
        if let Some(model) = value.as_str() {
            modes.insert(mode.to_string(), model.to_string());
        }
    }

    modes
}

fn read_mode_models(user_data_dir: &Path) -> Option<HashMap<String, String>> {
    let settings_path = user_data_dir.join("User").join("settings.json");
    let contents = fs::read_to_string(&settings_path).ok()?;
    let settings: serde_json::Value = serde_json::from_str(&contents).ok()?;
    Some(extract_mode_models(&settings))
}

/// Match an instance's persisted settings against the registry.
///
/// Returns the id of the first profile (registry iteration order) whose
/// `modes` mapping equals the observed settings exactly — no
/// subset/superset tolerance, so any mode added or removed in the editor
/// breaks recognition. That brittleness is a known, accepted property of
/// the matching scheme.
///
/// Missing user-data dir, missing or unparseable settings file, and
/// settings without any mode entries all resolve to `None`.
pub fn resolve_profile_for_instance(
    instance: &Instance,
    registry: &ProfileRegistry,
) -> Option<String> {
    let user_data_dir = instance.user_data_dir.as_ref()?;
    let observed = read_mode_models(user_data_dir)?;
    if observed.is_empty() {
        return None;
    }

    registry
        .iter()
        .find(|profile| profile.modes == observed)
        .map(|profile| profile.id.clone())
}
