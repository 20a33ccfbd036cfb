use std::collections::HashSet;
use std::path::PathBuf;

use bevy::prelude::*;
use simulation::SaveableRegistry;

use crate::world_snapshot::{load_from_file, save_to_file};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Write every map to `path`.
#[derive(Event, Debug, Clone)]
pub struct SaveMapsEvent {
    pub path: PathBuf,
}

/// Replace every map with the contents of `path`.
#[derive(Event, Debug, Clone)]
pub struct LoadMapsEvent {
    pub path: PathBuf,
}

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct MapsSaved {
    pub path: PathBuf,
    pub bytes: usize,
}

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct MapsLoaded {
    pub path: PathBuf,
    pub maps: usize,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveMapsEvent>()
            .add_event::<LoadMapsEvent>()
            .add_event::<MapsSaved>()
            .add_event::<MapsLoaded>()
            .init_resource::<SaveableRegistry>();

        // Exclusive systems: despawns and resource swaps happen immediately
        // with full world access.
        app.add_systems(
            Update,
            (exclusive_load_requests, exclusive_save_requests).chain(),
        );
    }
}

// ---------------------------------------------------------------------------
// Exclusive systems
// ---------------------------------------------------------------------------

/// Handles the last `LoadMapsEvent` sent this frame; earlier ones are dropped.
pub(crate) fn exclusive_load_requests(world: &mut World) {
    let Some(request) = world
        .resource_mut::<Events<LoadMapsEvent>>()
        .drain()
        .last()
    else {
        return;
    };

    match load_from_file(world, &request.path) {
        Ok(maps) => {
            info!("Loaded {} maps from {}", maps.len(), request.path.display());
            world.send_event(MapsLoaded {
                path: request.path,
                maps: maps.len(),
            });
        }
        Err(e) => error!("Load from {} failed: {e}", request.path.display()),
    }
}

/// Handles every `SaveMapsEvent` sent this frame; repeated paths are
/// written once.
pub(crate) fn exclusive_save_requests(world: &mut World) {
    let mut requests: Vec<SaveMapsEvent> = world
        .resource_mut::<Events<SaveMapsEvent>>()
        .drain()
        .collect();
    let mut seen = HashSet::new();
    requests.retain(|r| seen.insert(r.path.clone()));

    for request in requests {
        match save_to_file(world, &request.path) {
            Ok(bytes) => {
                info!("Saved {} bytes to {}", bytes, request.path.display());
                world.send_event(MapsSaved {
                    path: request.path,
                    bytes,
                });
            }
            Err(e) => error!("Save to {} failed: {e}", request.path.display()),
        }
    }
}
