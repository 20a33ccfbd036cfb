// ---------------------------------------------------------------------------
// PrototypeError: load-time configuration failures
// ---------------------------------------------------------------------------

use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading or validating the prototype manifest.
///
/// Everything here is caught before any map is spawned; the per-tick
/// simulation never sees invalid configuration.
#[derive(Debug)]
pub enum PrototypeError {
    /// The manifest file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The manifest is not valid JSON or does not match the schema.
    Parse(serde_json::Error),
    /// Two prototypes of the same kind share an id.
    DuplicateId { kind: &'static str, id: String },
    /// A day cycle lists no phases.
    EmptyCycle { id: String },
    /// A phase duration is negative, NaN, infinite or longer than
    /// `MAX_PHASE_DURATION`.
    InvalidDuration { cycle: String, phase: usize, secs: f64 },
    /// A phase color is not a valid hex color.
    InvalidColor {
        cycle: String,
        phase: usize,
        value: String,
        reason: String,
    },
    /// A map references a day cycle that is not defined.
    UnknownDayCycle { map: String, id: String },
    /// A map references a biome template that is not defined.
    UnknownBiome { map: String, id: String },
}

impl fmt::Display for PrototypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrototypeError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            PrototypeError::Parse(e) => write!(f, "malformed prototype manifest: {e}"),
            PrototypeError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} prototype '{id}'")
            }
            PrototypeError::EmptyCycle { id } => {
                write!(f, "day cycle '{id}' must have at least one phase")
            }
            PrototypeError::InvalidDuration { cycle, phase, secs } => write!(
                f,
                "day cycle '{cycle}' phase {phase}: duration must be between 0 and {} seconds, got {secs}",
                super::MAX_PHASE_DURATION.as_secs()
            ),
            PrototypeError::InvalidColor {
                cycle,
                phase,
                value,
                reason,
            } => write!(
                f,
                "day cycle '{cycle}' phase {phase}: invalid color '{value}': {reason}"
            ),
            PrototypeError::UnknownDayCycle { map, id } => {
                write!(f, "map '{map}' references unknown day cycle '{id}'")
            }
            PrototypeError::UnknownBiome { map, id } => {
                write!(f, "map '{map}' references unknown biome template '{id}'")
            }
        }
    }
}

impl std::error::Error for PrototypeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrototypeError::Io { source, .. } => Some(source),
            PrototypeError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PrototypeError {
    fn from(e: serde_json::Error) -> Self {
        PrototypeError::Parse(e)
    }
}
