// Library exports for testing and potential library use

/// Application version (root crate version).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod launcher;
pub mod tui;
pub mod vscode;

pub mod config {
    //! Profile registry re-exports from the kilomoco-config crate.
    pub use kilomoco_config::{
        MODE_NAMES, PROFILES_DIR_ENV, Profile, ProfileError, ProfileRegistry, builtin_profiles,
        discover_profiles, load_profiles_from_dir, load_profiles_from_file, merge_profile_dirs,
        profiles_dir_candidates, resolve_profiles, save_profiles_to_file,
    };
}
