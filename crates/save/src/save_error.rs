// ---------------------------------------------------------------------------
// SaveError: error type for writing and restoring map snapshots
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while saving or loading maps.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (file not found, permission denied, disk full, etc.)
    Io(std::io::Error),
    /// File is not a save, or its header is damaged.
    Header(String),
    /// Bitcode decoding failed (corrupt or invalid save data).
    Decode(String),
    /// Save data version is newer than this build supports.
    VersionMismatch { expected_max: u32, found: u32 },
    /// A map in the save could not be rebuilt.
    InvalidMap { name: String, reason: String },
    /// A required resource was missing from the ECS world.
    MissingResource(String),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::Header(msg) => write!(f, "Invalid file header: {msg}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: save is v{found}, but this build only supports up to v{expected_max}"
            ),
            SaveError::InvalidMap { name, reason } => {
                write!(f, "Map '{name}' cannot be restored: {reason}")
            }
            SaveError::MissingResource(name) => {
                write!(f, "Missing required resource: {name}")
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<bitcode::Error> for SaveError {
    fn from(e: bitcode::Error) -> Self {
        SaveError::Decode(e.to_string())
    }
}
