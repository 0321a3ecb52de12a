//! Layered profile discovery and registry persistence.
//!
//! Profiles are loaded from YAML files in up to three candidate directories,
//! highest priority first:
//!
//! 1. `$KILOMOCO_PROFILES_DIR` (if set and existing)
//! 2. `./profiles` under the current working directory (if it exists)
//! 3. `~/.kilomoco/profiles` (if it exists)
//!
//! A higher-priority directory's profile fully replaces a lower-priority
//! profile with the same id; there is no field-level merge. When no
//! directory yields a valid profile, resolution falls back to the built-in
//! table so the tool always works with zero configuration.

use crate::defaults::builtin_profiles;
use crate::error::ProfileError;
use crate::profile::{Profile, ProfileRegistry};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the highest-priority profile directory.
pub const PROFILES_DIR_ENV: &str = "KILOMOCO_PROFILES_DIR";

/// Raw document shape of a single profile YAML file.
///
/// `modes` is required and must be a string→string mapping; a document
/// missing it (or giving it another shape) fails deserialization and the
/// file is skipped. `id` and `name` fall back to the filename stem.
#[derive(Debug, Deserialize)]
struct ProfileDocument {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    description: String,
    modes: HashMap<String, String>,
}

impl ProfileDocument {
    fn into_profile(self, filename_stem: &str) -> Profile {
        let id = self.id.unwrap_or_else(|| filename_stem.to_string());
        let name = self.name.unwrap_or_else(|| id.clone());
        Profile::new(id, name, self.description, self.modes)
    }
}

/// Compute the ordered list of existing candidate directories, highest
/// priority first. Directories that do not exist are omitted; absence is
/// never an error.
pub fn profiles_dir_candidates() -> Vec<PathBuf> {
    candidates_from(
        std::env::var_os(PROFILES_DIR_ENV).map(PathBuf::from),
        std::env::current_dir().ok(),
        dirs::home_dir(),
    )
}

fn candidates_from(
    env_dir: Option<PathBuf>,
    cwd: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(dir) = env_dir
        && dir.is_dir()
    {
        candidates.push(dir);
    }

    if let Some(cwd) = cwd {
        let cwd_profiles = cwd.join("profiles");
        if cwd_profiles.is_dir() {
            candidates.push(cwd_profiles);
        }
    }

    if let Some(home) = home {
        let home_profiles = home.join(".kilomoco").join("profiles");
        if home_profiles.is_dir() {
            candidates.push(home_profiles);
        }
    }

    candidates
}

fn is_profile_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yml") | Some("yaml")
    )
}

/// Load all valid profile files from a single directory.
///
/// Invalid files — unreadable, unparseable, or missing a `modes` mapping —
/// are skipped with a warning and never abort the scan. An unreadable
/// directory is treated as empty.
pub fn load_profiles_from_dir(dir: &Path) -> ProfileRegistry {
    let mut registry = ProfileRegistry::new();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Profile directory {:?} not readable: {}", dir, e);
            return registry;
        }
    };

    // Sort by filename so same-id collisions within one directory resolve
    // deterministically.
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_profile_file(path))
        .collect();
    paths.sort();

    for path in paths {
        match load_profile_file(&path) {
            Ok(profile) => registry.insert(profile),
            Err(e) => {
                log::warn!("Skipping invalid profile file {:?}: {}", path, e);
            }
        }
    }

    registry
}

fn load_profile_file(path: &Path) -> Result<Profile, ProfileError> {
    let contents = fs::read_to_string(path)?;
    let document: ProfileDocument = serde_yaml_ng::from_str(&contents)?;
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| ProfileError::Shape(format!("unusable filename: {}", path.display())))?;
    Ok(document.into_profile(stem))
}

/// Merge profiles from the given candidate directories.
///
/// `candidates` is ordered highest priority first. Directories are applied
/// lowest-priority first so a later-applied (higher-priority) directory's
/// profile with the same id fully replaces the earlier one.
pub fn merge_profile_dirs(candidates: &[PathBuf]) -> ProfileRegistry {
    let mut registry = ProfileRegistry::new();
    for dir in candidates.iter().rev() {
        for profile in load_profiles_from_dir(dir).into_profiles() {
            registry.insert(profile);
        }
    }
    registry
}

/// Merge profiles from all candidate directories on this system.
pub fn discover_profiles() -> ProfileRegistry {
    merge_profile_dirs(&profiles_dir_candidates())
}

/// Resolve the effective registry: discovered profiles, or the built-in
/// table when discovery yields nothing. Rebuilt fresh on every call.
pub fn resolve_profiles() -> ProfileRegistry {
    resolve_from(&profiles_dir_candidates())
}

fn resolve_from(candidates: &[PathBuf]) -> ProfileRegistry {
    let discovered = merge_profile_dirs(candidates);
    if discovered.is_empty() {
        builtin_profiles()
    } else {
        discovered
    }
}

/// Load a saved registry from a JSON file (id → profile). A missing file
/// yields an empty registry. Profiles are ordered by id.
pub fn load_profiles_from_file(path: &Path) -> Result<ProfileRegistry, ProfileError> {
    if !path.exists() {
        return Ok(ProfileRegistry::new());
    }
    let contents = fs::read_to_string(path)?;
    let mut map: HashMap<String, Profile> = serde_json::from_str(&contents)?;

    let mut ids: Vec<String> = map.keys().cloned().collect();
    ids.sort();

    let mut registry = ProfileRegistry::new();
    for id in ids {
        if let Some(mut profile) = map.remove(&id) {
            // The outer key is authoritative over the embedded id field.
            profile.id = id;
            registry.insert(profile);
        }
    }
    Ok(registry)
}

/// Save a registry to a JSON file (id → profile), atomically: the content
/// is written to a sibling temp file and renamed into place so the target
/// is never observed partially written.
pub fn save_profiles_to_file(registry: &ProfileRegistry, path: &Path) -> Result<(), ProfileError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let map: std::collections::BTreeMap<&str, &Profile> =
        registry.iter().map(|p| (p.id.as_str(), p)).collect();
    let json = serde_json::to_string_pretty(&map)?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &json)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    const LOPR_YAML: &str = "\
id: lopr
name: Low-Price (Economy)
description: Budget-friendly...
modes:
  default: llama-4-maverick
  orchestrator: deepseek-v3.2-exp
";

    #[test]
    fn test_load_profiles_from_dir_success() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "lopr.yaml", LOPR_YAML);

        let registry = load_profiles_from_dir(dir.path());

        let profile = registry.get("lopr").expect("lopr should load");
        assert_eq!(profile.id, "lopr");
        assert_eq!(profile.name, "Low-Price (Economy)");
        assert_eq!(profile.description, "Budget-friendly...");
        assert_eq!(profile.modes["default"], "llama-4-maverick");
        assert_eq!(profile.modes["orchestrator"], "deepseek-v3.2-exp");
    }

    #[test]
    fn test_id_and_name_fall_back_to_filename_stem() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "economy.yml", "modes:\n  default: some-model\n");

        let registry = load_profiles_from_dir(dir.path());

        let profile = registry.get("economy").expect("stem-derived id");
        assert_eq!(profile.name, "economy");
        assert_eq!(profile.description, "");
    }

    #[test]
    fn test_invalid_yaml_is_skipped() {
        let dir = TempDir::new().unwrap();
        // Missing `modes` entirely.
        write_file(dir.path(), "invalid.yaml", "id: invalid\nname: Invalid\n");
        // `modes` has the wrong shape.
        write_file(
            dir.path(),
            "badshape.yaml",
            "id: badshape\nmodes:\n  - default\n",
        );
        // Not even YAML.
        write_file(dir.path(), "broken.yaml", "{{{:::");
        write_file(
            dir.path(),
            "valid.yaml",
            "id: valid\nname: Valid\nmodes:\n  default: valid-model\n",
        );
        // Wrong extension, ignored outright.
        write_file(dir.path(), "notes.txt", "not a profile");

        let registry = load_profiles_from_dir(dir.path());

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("valid"));
        assert!(!registry.contains("invalid"));
        assert!(!registry.contains("badshape"));
    }

    #[test]
    fn test_missing_directory_is_empty_not_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(load_profiles_from_dir(&missing).is_empty());
    }

    #[test]
    fn test_candidates_env_var_priority_order() {
        let env_dir = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let home_profiles = home.path().join(".kilomoco").join("profiles");
        fs::create_dir_all(&home_profiles).unwrap();

        // cwd has no `profiles` subdirectory, so it is not a candidate.
        let candidates = candidates_from(
            Some(env_dir.path().to_path_buf()),
            Some(cwd.path().to_path_buf()),
            Some(home.path().to_path_buf()),
        );

        assert_eq!(candidates, vec![env_dir.path().to_path_buf(), home_profiles]);
    }

    #[test]
    fn test_candidates_include_cwd_profiles_when_present() {
        let cwd = TempDir::new().unwrap();
        fs::create_dir_all(cwd.path().join("profiles")).unwrap();

        let candidates = candidates_from(None, Some(cwd.path().to_path_buf()), None);

        assert_eq!(candidates, vec![cwd.path().join("profiles")]);
    }

    #[test]
    fn test_nonexistent_env_dir_is_omitted() {
        let candidates = candidates_from(Some(PathBuf::from("/nonexistent/kilomoco")), None, None);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_higher_priority_dir_fully_replaces() {
        let high = TempDir::new().unwrap();
        let low = TempDir::new().unwrap();

        write_file(
            low.path(),
            "shared.yaml",
            "name: Low Version\ndescription: from the low-priority dir\nmodes:\n  default: low-model\n  debug: low-debug\n",
        );
        write_file(
            high.path(),
            "shared.yaml",
            "name: High Version\nmodes:\n  default: high-model\n",
        );
        write_file(low.path(), "only-low.yaml", "modes:\n  default: m\n");

        let registry = merge_profile_dirs(&[
            high.path().to_path_buf(),
            low.path().to_path_buf(),
        ]);

        // Full replacement: no field survives from the low-priority version.
        let shared = registry.get("shared").unwrap();
        assert_eq!(shared.name, "High Version");
        assert_eq!(shared.description, "");
        assert_eq!(shared.modes.len(), 1);
        assert_eq!(shared.modes["default"], "high-model");

        // Non-colliding profiles from the low-priority dir still load.
        assert!(registry.contains("only-low"));
    }

    #[test]
    fn test_resolve_falls_back_to_builtin_when_no_candidates() {
        let registry = resolve_from(&[]);
        assert!(registry.contains("lopr"));
        assert!(registry.contains("copr"));
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_resolve_falls_back_when_candidates_hold_no_valid_profiles() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "broken.yaml", "id: broken\n");

        let registry = resolve_from(&[dir.path().to_path_buf()]);
        assert!(registry.contains("lopr"));
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_resolve_prefers_discovered_over_builtin() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "custom.yaml", "modes:\n  default: my-model\n");

        let registry = resolve_from(&[dir.path().to_path_buf()]);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("custom"));
        assert!(!registry.contains("lopr"));
    }

    #[test]
    fn test_registry_json_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profiles.json");

        let registry = crate::defaults::builtin_profiles();
        save_profiles_to_file(&registry, &path).unwrap();

        // Atomic write leaves no temp residue behind.
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = load_profiles_from_file(&path).unwrap();
        assert_eq!(loaded.len(), registry.len());
        let lopr = loaded.get("lopr").unwrap();
        assert_eq!(lopr.modes["default"], "llama-4-maverick");
    }

    #[test]
    fn test_load_registry_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let registry = load_profiles_from_file(&dir.path().join("nope.json")).unwrap();
        assert!(registry.is_empty());
    }
}
