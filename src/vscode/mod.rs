//! VS Code integration: instance detection, settings generation, and
//! reverse-matching live settings back to known profiles.
//!
//! Everything here is read-only and best-effort except settings
//! application, which mutates only a freshly created temporary directory.

pub mod detect;
pub mod process;
pub mod reconcile;
pub mod settings;

pub use detect::{Instance, detect_instances, detect_vscode_instances};
pub use process::{ProcessList, ProcessRecord, SystemProcesses};
pub use reconcile::{extract_mode_models, resolve_profile_for_instance};
pub use settings::{
    apply_mode_configuration, create_temporary_user_data_dir, generate_mode_settings,
};

/// Executable name of the editor binary on PATH.
pub const EDITOR_BINARY: &str = "code";

/// Settings key namespace of the Kilo Code extension
/// (keys have the shape `<namespace>.<mode>.model`).
pub const SETTINGS_NAMESPACE: &str = "kilo-code";

/// Extension directory name that marks a user-data dir as Kilo-enabled.
pub const KILO_EXTENSION_ID: &str = "kilocode.kilo-code";
