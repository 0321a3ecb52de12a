//! Settings generation and application.
//!
//! Applying a profile never touches an existing VS Code installation: the
//! generated `User/settings.json` is the sole content of a freshly created
//! temporary user-data directory, and the editor is pointed at it with
//! `--user-data-dir`.

use super::SETTINGS_NAMESPACE;
use anyhow::{Context, Result};
use kilomoco_config::Profile;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix for generated temporary user-data directories.
pub const USER_DATA_PREFIX: &str = "kilomoco-profile-";

/// Build the settings object for a profile: one
/// `<namespace>.<mode>.model` entry per mode.
pub fn generate_mode_settings(profile: &Profile) -> Map<String, Value> {
    let mut settings = Map::new();
    for (mode, model) in &profile.modes {
        settings.insert(
            format!("{SETTINGS_NAMESPACE}.{mode}.model"),
            Value::String(model.clone()),
        );
    }
    settings
}

/// Create and return a fresh temporary directory for use as a VS Code
/// user-data dir. The directory is not deleted on drop; it must outlive
/// this process for the launched editor to use it.
pub fn create_temporary_user_data_dir(prefix: &str) -> Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .context("failed to create temporary user-data directory")?;
    Ok(dir.keep())
}

/// Write a JSON value to `path` atomically: the content goes to a sibling
/// temp file first and is renamed into place, so the target is never
/// observed partially written.
pub fn write_json_atomically(path: &Path, value: &Value) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, &json)
        .with_context(|| format!("failed to write {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("failed to move settings into place at {}", path.display()))?;
    Ok(())
}

fn write_profile_settings(user_data_dir: &Path, profile: &Profile) -> Result<()> {
    let user_dir = user_data_dir.join("User");
    fs::create_dir_all(&user_dir)
        .with_context(|| format!("failed to create {}", user_dir.display()))?;
    write_json_atomically(
        &user_dir.join("settings.json"),
        &Value::Object(generate_mode_settings(profile)),
    )
}

/// Apply a profile: create a temporary user-data dir containing only the
/// generated `User/settings.json`, and return the dir as the handle to the
/// applied state. On any write failure the partially created directory is
/// removed before the error propagates.
pub fn apply_mode_configuration(profile: &Profile) -> Result<PathBuf> {
    let user_data_dir = create_temporary_user_data_dir(USER_DATA_PREFIX)?;

    if let Err(e) = write_profile_settings(&user_data_dir, profile) {
        if let Err(cleanup) = fs::remove_dir_all(&user_data_dir) {
            log::warn!(
                "Failed to clean up partial user-data dir {:?}: {}",
                user_data_dir,
                cleanup
            );
        }
        return Err(e);
    }

    log::info!(
        "Applied profile '{}' to user-data dir {:?}",
        profile.id,
        user_data_dir
    );
    Ok(user_data_dir)
}
