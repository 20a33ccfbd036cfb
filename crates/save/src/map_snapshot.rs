// ---------------------------------------------------------------------------
// Save structs: plain-data mirrors of the map components
// ---------------------------------------------------------------------------

use std::collections::BTreeMap;
use std::time::Duration;

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use simulation::day_cycle::{CyclePhase, DayCycle};
use simulation::map_biome::MapBiome;

use crate::save_error::SaveError;

/// Current save data version.
/// v1 = maps (name, day cycle, biome request, biome, ambient color) + extensions
pub const CURRENT_SAVE_VERSION: u32 = 1;

#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveDuration {
    pub secs: u64,
    pub nanos: u32,
}

impl From<Duration> for SaveDuration {
    fn from(d: Duration) -> Self {
        Self {
            secs: d.as_secs(),
            nanos: d.subsec_nanos(),
        }
    }
}

impl From<SaveDuration> for Duration {
    fn from(d: SaveDuration) -> Self {
        // Corrupt nanos past one second must not overflow `Duration::new`.
        Duration::from_secs(d.secs).saturating_add(Duration::from_nanos(u64::from(d.nanos)))
    }
}

/// sRGBA channels.
pub type SaveColor = [f32; 4];

pub fn color_to_save(color: Color) -> SaveColor {
    let c = color.to_srgba();
    [c.red, c.green, c.blue, c.alpha]
}

pub fn color_from_save(c: SaveColor) -> Color {
    Color::srgba(c[0], c[1], c[2], c[3])
}

#[derive(Encode, Decode, Debug, Clone, PartialEq)]
pub struct SavePhase {
    pub start_color: SaveColor,
    pub duration: SaveDuration,
    pub is_night: bool,
}

/// Day cycle playback state. `started == false` means the cycle was spawned
/// but never ticked; it is rebuilt fresh and seeded on the next tick.
#[derive(Encode, Decode, Debug, Clone, PartialEq)]
pub struct SaveDayCycle {
    pub phases: Vec<SavePhase>,
    pub started: bool,
    pub current_index: u32,
    pub phase_start: SaveDuration,
    pub phase_end: SaveDuration,
    pub is_night: bool,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct SaveBiome {
    pub template: String,
    pub seed: u32,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq)]
pub struct SaveMap {
    pub name: String,
    pub day_cycle: Option<SaveDayCycle>,
    /// Template named by `SpawnMapBiome`, if the map asked for one.
    pub biome_request: Option<String>,
    pub biome: Option<SaveBiome>,
    pub ambient_color: Option<SaveColor>,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Default)]
pub struct SaveData {
    pub version: u32,
    pub maps: Vec<SaveMap>,
    /// Bytes keyed by `Saveable::SAVE_KEY`.
    pub extensions: BTreeMap<String, Vec<u8>>,
}

impl SaveData {
    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    /// Decode and reject data written by a newer build.
    pub fn decode(bytes: &[u8]) -> Result<Self, SaveError> {
        let save: SaveData = bitcode::decode(bytes)?;
        if save.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected_max: CURRENT_SAVE_VERSION,
                found: save.version,
            });
        }
        Ok(save)
    }
}

// ---------------------------------------------------------------------------
// Component <-> save struct conversions
// ---------------------------------------------------------------------------

impl From<&DayCycle> for SaveDayCycle {
    fn from(cycle: &DayCycle) -> Self {
        Self {
            phases: cycle
                .phases()
                .iter()
                .map(|p| SavePhase {
                    start_color: color_to_save(p.start_color),
                    duration: p.duration.into(),
                    is_night: p.is_night,
                })
                .collect(),
            started: cycle.is_initialized(),
            current_index: cycle.current_index() as u32,
            phase_start: cycle.phase_start().into(),
            phase_end: cycle.phase_end().into(),
            is_night: cycle.is_night(),
        }
    }
}

impl SaveDayCycle {
    /// Rebuild the component, validating index and window.
    pub fn to_component(&self, map_name: &str) -> Result<DayCycle, SaveError> {
        let phases: Vec<CyclePhase> = self
            .phases
            .iter()
            .map(|p| CyclePhase {
                start_color: color_from_save(p.start_color),
                duration: p.duration.into(),
                is_night: p.is_night,
            })
            .collect();

        let cycle = if self.started {
            DayCycle::restore(
                phases,
                self.current_index as usize,
                self.phase_start.into(),
                self.phase_end.into(),
                self.is_night,
            )
        } else {
            DayCycle::new(phases)
        };

        cycle.map_err(|e| SaveError::InvalidMap {
            name: map_name.to_string(),
            reason: e.to_string(),
        })
    }
}

impl From<&MapBiome> for SaveBiome {
    fn from(biome: &MapBiome) -> Self {
        Self {
            template: biome.template.clone(),
            seed: biome.seed,
        }
    }
}

impl From<&SaveBiome> for MapBiome {
    fn from(biome: &SaveBiome) -> Self {
        Self {
            template: biome.template.clone(),
            seed: biome.seed,
        }
    }
}
