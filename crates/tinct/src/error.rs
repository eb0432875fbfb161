//! Error types shared across the engine.

use thiserror::Error;

/// Structural problem found in a theme document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Theme document must be a JSON object")]
    NotAnObject,
    #[error("Unrecognized theme shape: expected a 'meta' block or top-level 'id'")]
    UnrecognizedShape,
    #[error("Missing or empty field '{0}'")]
    MissingField(&'static str),
    #[error("Field '{field}' must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
    #[error("Malformed theme document: {0}")]
    Malformed(String),
}

/// Error returned by theme store operations.
///
/// The `Display` text of each variant is the message surfaced to callers
/// through [`Outcome`](crate::store::Outcome).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid theme structure")]
    InvalidStructure(#[source] ValidationError),
    #[error("Invalid theme JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to serialize theme: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Cannot overwrite built-in theme '{0}'")]
    BuiltinOverwrite(String),
    #[error("Cannot delete built-in theme '{0}'")]
    BuiltinDelete(String),
    #[error("Theme '{0}' is not a built-in theme")]
    NotBuiltin(String),
    #[error("Theme '{0}' not found")]
    NotFound(String),
    #[error("Theme '{0}' already exists")]
    AlreadyExists(String),
    #[error("Invalid theme name '{0}'")]
    InvalidName(String),
    #[error("Definition for '{expected}' carries id '{found}'")]
    IdMismatch { expected: String, found: String },
}

impl From<ValidationError> for StoreError {
    fn from(error: ValidationError) -> Self {
        Self::InvalidStructure(error)
    }
}

/// Error reading or writing persisted state.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Error fetching a richer builtin definition.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No definition available for '{0}'")]
    Missing(String),
}

/// Error loading engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Error deriving a color group.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeriveError {
    #[error("Unknown color group '{0}'")]
    UnknownGroup(String),
    #[error("Invalid base color '{0}'")]
    InvalidBase(String),
}
