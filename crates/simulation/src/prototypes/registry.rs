use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::day_cycle::{CyclePhase, DayCycle, DayCycleError};

use super::manifest::MapPrototype;

/// A named biome template understood by the external biome subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiomeTemplate {
    pub id: String,
}

impl BiomeTemplate {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Validated, read-only configuration available to every system.
///
/// Built by `PrototypeManifest::validate`; an empty registry is inserted by
/// default so systems can always take `Res<Prototypes>`.
#[derive(Resource, Debug, Clone, Default)]
pub struct Prototypes {
    day_cycles: BTreeMap<String, Vec<CyclePhase>>,
    biomes: BTreeMap<String, BiomeTemplate>,
    maps: Vec<MapPrototype>,
}

impl Prototypes {
    pub fn with_day_cycle(mut self, id: impl Into<String>, phases: Vec<CyclePhase>) -> Self {
        self.day_cycles.insert(id.into(), phases);
        self
    }

    pub fn with_biome(mut self, template: BiomeTemplate) -> Self {
        self.biomes.insert(template.id.clone(), template);
        self
    }

    pub fn with_map(mut self, map: MapPrototype) -> Self {
        self.maps.push(map);
        self
    }

    pub fn day_cycle_phases(&self, id: &str) -> Option<&[CyclePhase]> {
        self.day_cycles.get(id).map(Vec::as_slice)
    }

    /// Fresh, unstarted cycle component for the prototype `id`.
    pub fn day_cycle(&self, id: &str) -> Option<Result<DayCycle, DayCycleError>> {
        self.day_cycles
            .get(id)
            .map(|phases| DayCycle::new(phases.clone()))
    }

    pub fn biome(&self, id: &str) -> Option<&BiomeTemplate> {
        self.biomes.get(id)
    }

    pub fn maps(&self) -> &[MapPrototype] {
        &self.maps
    }

    pub fn day_cycle_ids(&self) -> impl Iterator<Item = &str> {
        self.day_cycles.keys().map(String::as_str)
    }

    pub fn biome_ids(&self) -> impl Iterator<Item = &str> {
        self.biomes.keys().map(String::as_str)
    }
}
