// =============================================================================
// World initialization: spawn every map listed in the prototype manifest.
// =============================================================================

use bevy::prelude::*;

use crate::map_biome::SpawnMapBiome;
use crate::maps::{spawn_map, MapSpawn};
use crate::prototypes::Prototypes;

/// Marker resource that, when present, causes `init_world` to skip spawning
/// manifest maps. Used by the test harness and when restoring a save.
#[derive(Resource)]
pub struct SkipWorldInit;

pub fn init_world(
    mut commands: Commands,
    prototypes: Res<Prototypes>,
    skip: Option<Res<SkipWorldInit>>,
) {
    if skip.is_some() {
        return;
    }

    for map in prototypes.maps() {
        let mut spawn = MapSpawn::new(map.name.clone());

        if let Some(id) = &map.day_cycle {
            match prototypes.day_cycle(id) {
                Some(Ok(cycle)) => spawn = spawn.with_day_cycle(cycle),
                Some(Err(e)) => {
                    error!("map '{}': day cycle '{}' rejected: {}", map.name, id, e);
                }
                None => {
                    error!("map '{}': unknown day cycle '{}'", map.name, id);
                }
            }
        }
        if let Some(biome) = &map.biome {
            spawn = spawn.with_biome(SpawnMapBiome::new(biome.clone()));
        }

        let entity = spawn_map(&mut commands, spawn);
        info!("spawned map '{}' as {:?}", map.name, entity);
    }
}
