//! Map biome initialization.
//!
//! A map carrying [`SpawnMapBiome`] asks the external biome subsystem for
//! terrain exactly once. The template id is resolved against the
//! [`Prototypes`] registry, a seed is rolled from [`SimRng`], and a
//! [`BiomeSpawnRequested`] event is sent. Terrain generation itself happens
//! outside this crate.

use bevy::prelude::*;

use crate::prototypes::Prototypes;
use crate::sim_rng::SimRng;

/// Template used when a map does not name one.
pub const DEFAULT_BIOME_TEMPLATE: &str = "Grasslands";

/// Requests a biome for this map at map initialization.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct SpawnMapBiome {
    pub biome: String,
}

impl Default for SpawnMapBiome {
    fn default() -> Self {
        Self {
            biome: DEFAULT_BIOME_TEMPLATE.to_string(),
        }
    }
}

impl SpawnMapBiome {
    pub fn new(biome: impl Into<String>) -> Self {
        Self {
            biome: biome.into(),
        }
    }
}

/// The biome a map was initialized with.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct MapBiome {
    pub template: String,
    pub seed: u32,
}

/// Hand-off to the biome subsystem.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct BiomeSpawnRequested {
    pub map: Entity,
    pub template: String,
    pub seed: u32,
}

/// Resolves newly added biome requests.
///
/// Unknown templates are logged and skipped; the map stays without a
/// `MapBiome`. Maps that already have one (restored from a save) are left
/// alone.
pub fn init_map_biomes(
    mut commands: Commands,
    prototypes: Res<Prototypes>,
    mut rng: ResMut<SimRng>,
    requests: Query<(Entity, &SpawnMapBiome), (Added<SpawnMapBiome>, Without<MapBiome>)>,
    mut spawn_events: EventWriter<BiomeSpawnRequested>,
) {
    for (map, request) in &requests {
        let Some(template) = prototypes.biome(&request.biome) else {
            warn!(
                "map {:?} requested unknown biome template '{}', skipping",
                map, request.biome
            );
            continue;
        };

        let seed = rng.next_biome_seed();
        commands.entity(map).insert(MapBiome {
            template: template.id.clone(),
            seed,
        });
        spawn_events.send(BiomeSpawnRequested {
            map,
            template: template.id.clone(),
            seed,
        });
        info!(
            "map {:?}: biome '{}' requested with seed {}",
            map, template.id, seed
        );
    }
}

pub struct MapBiomePlugin;

impl Plugin for MapBiomePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BiomeSpawnRequested>().add_systems(
            FixedUpdate,
            init_map_biomes.in_set(crate::SimulationSet::Simulation),
        );
    }
}
