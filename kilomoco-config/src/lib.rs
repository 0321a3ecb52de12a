//! Profile registry and configuration system for kilomoco.
//!
//! This crate provides the profile data model and the logic that resolves
//! the effective profile set at runtime:
//!
//! - Profile types and the ordered registry
//! - Built-in mode-combination profiles
//! - Layered discovery of profile YAML files with override precedence
//! - JSON persistence helpers for saved registries

pub mod defaults;
pub mod discovery;
pub mod error;
pub mod profile;

// Re-export main types for convenience
pub use defaults::{MODE_NAMES, builtin_profiles};
pub use discovery::{
    PROFILES_DIR_ENV, discover_profiles, load_profiles_from_dir, load_profiles_from_file,
    merge_profile_dirs, profiles_dir_candidates, resolve_profiles, save_profiles_to_file,
};
pub use error::ProfileError;
pub use profile::{Profile, ProfileRegistry};
