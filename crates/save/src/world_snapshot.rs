// ---------------------------------------------------------------------------
// Capture and restore every map in the world
// ---------------------------------------------------------------------------

use std::path::Path;

use bevy::prelude::*;
use simulation::day_cycle::DayCycle;
use simulation::map_biome::{MapBiome, SpawnMapBiome};
use simulation::map_light::{LightSyncQueue, MapLight};
use simulation::maps::{spawn_map_in_world, GameMap, MapSpawn};
use simulation::sim_clock::SimClock;
use simulation::SaveableRegistry;

use crate::file_header::{unwrap_header, wrap_with_header};
use crate::map_snapshot::{
    color_from_save, color_to_save, SaveBiome, SaveData, SaveDayCycle, SaveMap,
    CURRENT_SAVE_VERSION,
};
use crate::save_error::SaveError;

/// Snapshot all maps plus every registered `Saveable` resource.
pub fn encode_world(world: &mut World) -> Result<SaveData, SaveError> {
    let mut maps: Vec<SaveMap> = {
        let mut q = world.query::<(
            &GameMap,
            Option<&DayCycle>,
            Option<&SpawnMapBiome>,
            Option<&MapBiome>,
            Option<&MapLight>,
        )>();
        q.iter(world)
            .map(|(map, cycle, request, biome, light)| SaveMap {
                name: map.name.clone(),
                day_cycle: cycle.map(SaveDayCycle::from),
                biome_request: request.map(|r| r.biome.clone()),
                biome: biome.map(SaveBiome::from),
                ambient_color: light.map(|l| color_to_save(l.ambient_color)),
            })
            .collect()
    };
    maps.sort_by(|a, b| a.name.cmp(&b.name));

    let registry = world
        .remove_resource::<SaveableRegistry>()
        .ok_or_else(|| SaveError::MissingResource("SaveableRegistry".to_string()))?;
    let extensions = registry.save_all(world);
    world.insert_resource(registry);

    Ok(SaveData {
        version: CURRENT_SAVE_VERSION,
        maps,
        extensions,
    })
}

/// Replace every map in the world with the maps in `save`.
///
/// All maps are validated before anything is despawned, so a bad save
/// leaves the world untouched. The running clock speed survives the load.
/// Returns the spawned map entities in save order.
pub fn restore_world(world: &mut World, save: &SaveData) -> Result<Vec<Entity>, SaveError> {
    let mut spawns = Vec::with_capacity(save.maps.len());
    for map in &save.maps {
        let mut spawn = MapSpawn::new(map.name.clone());
        if let Some(cycle) = &map.day_cycle {
            spawn = spawn.with_day_cycle(cycle.to_component(&map.name)?);
        }
        if let Some(template) = &map.biome_request {
            spawn = spawn.with_biome(SpawnMapBiome::new(template.clone()));
        }
        spawns.push((spawn, map));
    }

    let registry = world
        .remove_resource::<SaveableRegistry>()
        .ok_or_else(|| SaveError::MissingResource("SaveableRegistry".to_string()))?;

    despawn_all_maps(world);
    if let Some(mut queue) = world.get_resource_mut::<LightSyncQueue>() {
        queue.drain();
    }

    let speed = world.get_resource::<SimClock>().map(|clock| clock.speed);
    registry.load_all(world, &save.extensions);
    world.insert_resource(registry);
    if let (Some(speed), Some(mut clock)) = (speed, world.get_resource_mut::<SimClock>()) {
        clock.speed = speed;
    }

    let mut entities = Vec::with_capacity(spawns.len());
    for (spawn, map) in spawns {
        let entity = spawn_map_in_world(world, spawn);
        let mut entity_mut = world.entity_mut(entity);
        if let Some(biome) = &map.biome {
            entity_mut.insert(MapBiome::from(biome));
        }
        if let Some(color) = map.ambient_color {
            entity_mut.insert(MapLight {
                ambient_color: color_from_save(color),
            });
        }
        entities.push(entity);
    }

    Ok(entities)
}

/// Despawn every `GameMap` immediately (no deferred commands).
pub(crate) fn despawn_all_maps(world: &mut World) -> usize {
    let maps: Vec<Entity> = {
        let mut q = world.query_filtered::<Entity, With<GameMap>>();
        q.iter(world).collect()
    };
    for &map in &maps {
        world.despawn(map);
    }
    maps.len()
}

/// Encode the world and write it to `path` atomically. Returns bytes written.
pub fn save_to_file(world: &mut World, path: &Path) -> Result<usize, SaveError> {
    let save = encode_world(world)?;
    let bytes = wrap_with_header(&save.encode())?;
    crate::atomic_write::atomic_write(path, &bytes)?;
    Ok(bytes.len())
}

/// Read `path`, validate its header and restore the maps it holds.
pub fn load_from_file(world: &mut World, path: &Path) -> Result<Vec<Entity>, SaveError> {
    let bytes = std::fs::read(path)?;
    let (header, payload) = unwrap_header(&bytes)?;
    debug!(
        "save header: format v{}, timestamp {}, {} bytes, checksum {:#010X}",
        header.format_version, header.timestamp, header.payload_size, header.checksum
    );
    let save = SaveData::decode(payload)?;
    restore_world(world, &save)
}
