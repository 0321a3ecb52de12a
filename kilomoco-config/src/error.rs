//! Typed error variants for the kilomoco-config crate.
//!
//! Provides structured error types for profile file I/O and shape validation.
//! These are used internally and exposed for library consumers who want to
//! match on specific failure modes instead of opaque `anyhow` strings.

use std::fmt;

/// Errors that can occur when loading or saving profile files.
///
/// Produced by the JSON registry persistence helpers and by the YAML
/// discovery internals. Callers that use `anyhow` get automatic coercion
/// via the `From` impl that `anyhow` provides for any `std::error::Error`.
#[derive(Debug)]
pub enum ProfileError {
    /// An I/O error occurred reading or writing a profile file.
    Io(std::io::Error),

    /// A profile file contained invalid YAML that could not be parsed.
    Yaml(serde_yaml_ng::Error),

    /// A saved registry file contained invalid JSON.
    Json(serde_json::Error),

    /// A document parsed but does not have the expected profile shape.
    ///
    /// The inner string describes which part of the document is malformed.
    Shape(String),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Io(e) => write!(f, "I/O error reading profile: {e}"),
            ProfileError::Yaml(e) => write!(f, "YAML parse error in profile: {e}"),
            ProfileError::Json(e) => write!(f, "JSON parse error in registry file: {e}"),
            ProfileError::Shape(msg) => write!(f, "Invalid profile shape: {msg}"),
        }
    }
}

impl std::error::Error for ProfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProfileError::Io(e) => Some(e),
            ProfileError::Yaml(e) => Some(e),
            ProfileError::Json(e) => Some(e),
            ProfileError::Shape(_) => None,
        }
    }
}

impl From<std::io::Error> for ProfileError {
    fn from(e: std::io::Error) -> Self {
        ProfileError::Io(e)
    }
}

impl From<serde_yaml_ng::Error> for ProfileError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        ProfileError::Yaml(e)
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        ProfileError::Json(e)
    }
}
