use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::day_cycle::{CyclePhase, DEFAULT_PHASE_DURATION};

use super::error::PrototypeError;
use super::registry::{BiomeTemplate, Prototypes};

/// Hex color used when a phase omits `start_color`.
pub const DEFAULT_START_COLOR: &str = "#FFFFFFFF";

/// Longest phase a manifest may declare (one year).
pub const MAX_PHASE_DURATION: Duration = Duration::from_secs(365 * 24 * 60 * 60);

// =============================================================================
// Schema
// =============================================================================

/// Raw, unvalidated prototype file as it appears on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrototypeManifest {
    pub day_cycles: Vec<DayCyclePrototype>,
    pub biomes: Vec<BiomePrototype>,
    pub maps: Vec<MapPrototype>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCyclePrototype {
    pub id: String,
    #[serde(default)]
    pub phases: Vec<PhasePrototype>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhasePrototype {
    #[serde(default = "default_start_color")]
    pub start_color: String,
    /// Seconds.
    #[serde(default = "default_duration_secs")]
    pub duration: f64,
    #[serde(default)]
    pub is_night: bool,
}

impl Default for PhasePrototype {
    fn default() -> Self {
        Self {
            start_color: default_start_color(),
            duration: default_duration_secs(),
            is_night: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomePrototype {
    pub id: String,
}

/// A map spawned at world init.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPrototype {
    pub name: String,
    #[serde(default)]
    pub day_cycle: Option<String>,
    #[serde(default)]
    pub biome: Option<String>,
}

fn default_start_color() -> String {
    DEFAULT_START_COLOR.to_string()
}

fn default_duration_secs() -> f64 {
    DEFAULT_PHASE_DURATION.as_secs_f64()
}

// =============================================================================
// Loading
// =============================================================================

impl PrototypeManifest {
    pub fn from_json_str(json: &str) -> Result<Self, PrototypeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PrototypeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PrototypeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check every prototype and build the runtime registry.
    ///
    /// Rejects empty cycles, negative or out-of-range durations, bad colors,
    /// duplicate ids and maps pointing at undefined prototypes.
    pub fn validate(self) -> Result<Prototypes, PrototypeError> {
        let mut prototypes = Prototypes::default();

        for cycle in &self.day_cycles {
            if prototypes.day_cycle_phases(&cycle.id).is_some() {
                return Err(PrototypeError::DuplicateId {
                    kind: "day cycle",
                    id: cycle.id.clone(),
                });
            }
            let phases = validate_cycle(cycle)?;
            prototypes = prototypes.with_day_cycle(cycle.id.clone(), phases);
        }

        let mut seen_biomes = BTreeSet::new();
        for biome in &self.biomes {
            if !seen_biomes.insert(biome.id.as_str()) {
                return Err(PrototypeError::DuplicateId {
                    kind: "biome",
                    id: biome.id.clone(),
                });
            }
            prototypes = prototypes.with_biome(BiomeTemplate::new(biome.id.clone()));
        }

        let mut seen_maps = BTreeSet::new();
        for map in &self.maps {
            if !seen_maps.insert(map.name.as_str()) {
                return Err(PrototypeError::DuplicateId {
                    kind: "map",
                    id: map.name.clone(),
                });
            }
            if let Some(id) = &map.day_cycle {
                if prototypes.day_cycle_phases(id).is_none() {
                    return Err(PrototypeError::UnknownDayCycle {
                        map: map.name.clone(),
                        id: id.clone(),
                    });
                }
            }
            if let Some(id) = &map.biome {
                if prototypes.biome(id).is_none() {
                    return Err(PrototypeError::UnknownBiome {
                        map: map.name.clone(),
                        id: id.clone(),
                    });
                }
            }
            prototypes = prototypes.with_map(map.clone());
        }

        Ok(prototypes)
    }
}

fn validate_cycle(cycle: &DayCyclePrototype) -> Result<Vec<CyclePhase>, PrototypeError> {
    if cycle.phases.is_empty() {
        return Err(PrototypeError::EmptyCycle {
            id: cycle.id.clone(),
        });
    }

    cycle
        .phases
        .iter()
        .enumerate()
        .map(|(index, phase)| {
            let duration = Duration::try_from_secs_f64(phase.duration)
                .ok()
                .filter(|d| *d <= MAX_PHASE_DURATION)
                .ok_or_else(|| PrototypeError::InvalidDuration {
                    cycle: cycle.id.clone(),
                    phase: index,
                    secs: phase.duration,
                })?;
            let color = Srgba::hex(&phase.start_color).map_err(|e| PrototypeError::InvalidColor {
                cycle: cycle.id.clone(),
                phase: index,
                value: phase.start_color.clone(),
                reason: e.to_string(),
            })?;
            Ok(CyclePhase {
                start_color: Color::Srgba(color),
                duration,
                is_night: phase.is_night,
            })
        })
        .collect()
}
