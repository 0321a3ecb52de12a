//! Profile application and editor launch orchestration.
//!
//! `prepare_and_launch` is the one mutating entry point: it resolves the
//! registry, applies the selected profile to a temporary user-data dir,
//! and runs the editor against it, blocking until the editor exits.

use crate::vscode;
use anyhow::{Context, Result};
use kilomoco_config::{Profile, ProfileRegistry, resolve_profiles};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Launch failures callers may want to distinguish.
///
/// Everything else (settings write failures, spawn errors) travels as
/// `anyhow` context.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// The requested profile id is not present in the resolved registry.
    #[error("Profile '{requested}' not found. Available profiles: {}", .available.join(", "))]
    UnknownProfile {
        /// The id that was requested.
        requested: String,
        /// Ids present in the registry, in registry order.
        available: Vec<String>,
    },

    /// The editor binary could not be found on PATH.
    #[error("VS Code CLI ('{}') not found in PATH. Please ensure VS Code is installed.", vscode::EDITOR_BINARY)]
    EditorNotFound,
}

/// Search a PATH-style string for the editor executable.
fn search_path_env(path_env: &str) -> Option<PathBuf> {
    let separator = if cfg!(windows) { ';' } else { ':' };
    let executables: &[&str] = if cfg!(windows) {
        &["code.cmd", "code.exe"]
    } else {
        &[vscode::EDITOR_BINARY]
    };

    for dir in path_env.split(separator) {
        for executable in executables {
            let candidate = Path::new(dir).join(executable);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Resolve the editor executable at runtime.
///
/// Searches PATH first, then common installation locations for app-launch
/// environments where PATH may be incomplete.
pub fn find_editor_binary() -> Option<PathBuf> {
    if let Ok(path_env) = std::env::var("PATH")
        && let Some(found) = search_path_env(&path_env)
    {
        return Some(found);
    }

    #[cfg(target_os = "macos")]
    {
        let macos_paths = [
            "/usr/local/bin/code",
            "/opt/homebrew/bin/code",
            "/Applications/Visual Studio Code.app/Contents/Resources/app/bin/code",
        ];
        for path in macos_paths {
            if Path::new(path).is_file() {
                return Some(PathBuf::from(path));
            }
        }
    }

    #[cfg(target_os = "linux")]
    {
        let linux_paths = ["/usr/bin/code", "/usr/local/bin/code", "/snap/bin/code"];
        for path in linux_paths {
            if Path::new(path).is_file() {
                return Some(PathBuf::from(path));
            }
        }
    }

    None
}

/// Check whether the editor CLI is available.
pub fn check_vscode_available() -> bool {
    find_editor_binary().is_some()
}

/// Look up a profile by id, failing with the set of valid ids.
pub fn lookup_profile<'a>(
    registry: &'a ProfileRegistry,
    id: &str,
) -> Result<&'a Profile, LauncherError> {
    registry.get(id).ok_or_else(|| LauncherError::UnknownProfile {
        requested: id.to_string(),
        available: registry.ids().map(str::to_string).collect(),
    })
}

/// Launch the editor against a user-data dir and block until it exits.
///
/// Returns the editor's exit code (-1 when terminated by a signal).
pub fn launch_vscode_with_profile(
    editor: &Path,
    user_data_dir: &Path,
    workspace: Option<&Path>,
    extensions_dir: Option<&Path>,
) -> Result<i32> {
    let mut command = Command::new(editor);
    command.arg("--user-data-dir").arg(user_data_dir);
    if let Some(extensions_dir) = extensions_dir {
        command.arg("--extensions-dir").arg(extensions_dir);
    }
    if let Some(workspace) = workspace {
        command.arg(workspace);
    }

    log::info!("Launching editor: {:?}", command);
    let status = command
        .status()
        .with_context(|| format!("failed to launch editor {}", editor.display()))?;
    Ok(status.code().unwrap_or(-1))
}

/// Apply a profile and launch the editor with it.
///
/// Preflight failures (missing editor binary, unknown profile id) surface
/// before any filesystem mutation. If the launch itself fails after the
/// configuration was applied, the temporary configuration directory is
/// removed before the error is re-raised.
pub fn prepare_and_launch(profile_id: &str, workspace: Option<&Path>) -> Result<i32> {
    let Some(editor) = find_editor_binary() else {
        return Err(LauncherError::EditorNotFound.into());
    };

    let registry = resolve_profiles();
    let profile = lookup_profile(&registry, profile_id)?;

    let user_data_dir = vscode::apply_mode_configuration(profile)?;

    match launch_vscode_with_profile(&editor, &user_data_dir, workspace, None) {
        Ok(exit_code) => {
            log::info!("Editor exited with code {}", exit_code);
            Ok(exit_code)
        }
        Err(e) => {
            if let Err(cleanup) = fs::remove_dir_all(&user_data_dir) {
                log::warn!(
                    "Failed to remove user-data dir {:?} after launch failure: {}",
                    user_data_dir,
                    cleanup
                );
            }
            Err(e)
        }
    }
}
