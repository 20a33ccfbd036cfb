use bevy::prelude::*;

use crate::day_cycle::DayCycle;
use crate::map_biome::SpawnMapBiome;

/// Marker for a map entity.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct GameMap {
    pub name: String,
}

/// Everything needed to spawn one map.
#[derive(Debug, Clone)]
pub struct MapSpawn {
    pub name: String,
    pub day_cycle: Option<DayCycle>,
    pub biome: Option<SpawnMapBiome>,
}

impl MapSpawn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            day_cycle: None,
            biome: None,
        }
    }

    pub fn with_day_cycle(mut self, cycle: DayCycle) -> Self {
        self.day_cycle = Some(cycle);
        self
    }

    pub fn with_biome(mut self, biome: SpawnMapBiome) -> Self {
        self.biome = Some(biome);
        self
    }
}

/// Spawn a map. Day cycle and biome are seeded by their own systems on the
/// next simulation tick.
pub fn spawn_map(commands: &mut Commands, spawn: MapSpawn) -> Entity {
    let mut entity = commands.spawn(GameMap { name: spawn.name });
    if let Some(cycle) = spawn.day_cycle {
        entity.insert(cycle);
    }
    if let Some(biome) = spawn.biome {
        entity.insert(biome);
    }
    entity.id()
}

/// Same as [`spawn_map`] with direct world access (tests, save restore).
pub fn spawn_map_in_world(world: &mut World, spawn: MapSpawn) -> Entity {
    let mut entity = world.spawn(GameMap { name: spawn.name });
    if let Some(cycle) = spawn.day_cycle {
        entity.insert(cycle);
    }
    if let Some(biome) = spawn.biome {
        entity.insert(biome);
    }
    entity.id()
}
