use bevy::prelude::*;
use std::collections::BTreeMap;

pub mod cycle_journal;
pub mod day_cycle;
pub mod map_biome;
pub mod map_light;
pub mod maps;
pub mod prototypes;
pub mod sim_clock;
pub mod sim_rng;
pub mod simulation_sets;
pub mod world_init;

mod plugin_registration;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

// ---------------------------------------------------------------------------
// Saveable trait + registry for the extension map save pattern
// ---------------------------------------------------------------------------

/// Trait for resources that can be saved/loaded via the extension map.
///
/// Each implementing resource provides its own serialization logic, so adding
/// a new saveable resource requires no change to the save crate: the owning
/// plugin registers it with `SaveableRegistry::register` in its `build()`.
pub trait Saveable: Resource + Default + Send + Sync + 'static {
    /// Unique key for this resource in the save file's extension map.
    /// Must be stable across versions (used for deserialization lookup).
    const SAVE_KEY: &'static str;

    /// Serialize this resource to bytes.
    /// Return `None` to skip saving (e.g. when the resource is at its default state).
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    /// Deserialize from bytes, returning the restored resource.
    fn load_from_bytes(bytes: &[u8]) -> Self;
}

/// Decode bytes via `bitcode::decode`, logging a warning and returning `Default` on failure.
pub fn decode_or_warn<T: bitcode::DecodeOwned + Default>(key: &str, bytes: &[u8]) -> T {
    match bitcode::decode(bytes) {
        Ok(v) => v,
        Err(e) => {
            warn!(
                "Saveable {}: failed to decode {} bytes, falling back to default: {}",
                key,
                bytes.len(),
                e
            );
            T::default()
        }
    }
}

pub type SaveFn = Box<dyn Fn(&World) -> Option<Vec<u8>> + Send + Sync>;
pub type LoadFn = Box<dyn Fn(&mut World, &[u8]) + Send + Sync>;
pub type ResetFn = Box<dyn Fn(&mut World) + Send + Sync>;

/// Type-erased save/load/reset operations for a single registered resource.
pub struct SaveableEntry {
    pub key: String,
    pub save_fn: SaveFn,
    pub load_fn: LoadFn,
    pub reset_fn: ResetFn,
}

/// Registry of all saveable resources, populated during plugin setup.
#[derive(Resource, Default)]
pub struct SaveableRegistry {
    pub entries: Vec<SaveableEntry>,
}

impl SaveableRegistry {
    /// Register a resource type that implements `Saveable`.
    ///
    /// A second registration under the same key is ignored with a warning.
    pub fn register<T: Saveable>(&mut self) {
        let key = T::SAVE_KEY.to_string();
        if self.entries.iter().any(|e| e.key == key) {
            warn!(
                "SaveableRegistry: duplicate key '{}', ignoring second registration",
                key
            );
            return;
        }
        self.entries.push(SaveableEntry {
            key,
            save_fn: Box::new(|world: &World| {
                world.get_resource::<T>().and_then(|r| r.save_to_bytes())
            }),
            load_fn: Box::new(|world: &mut World, bytes: &[u8]| {
                let value = T::load_from_bytes(bytes);
                world.insert_resource(value);
            }),
            reset_fn: Box::new(|world: &mut World| {
                world.insert_resource(T::default());
            }),
        });
    }

    /// Save all registered resources into an extension map.
    pub fn save_all(&self, world: &World) -> BTreeMap<String, Vec<u8>> {
        let mut extensions = BTreeMap::new();
        for entry in &self.entries {
            if let Some(bytes) = (entry.save_fn)(world) {
                extensions.insert(entry.key.clone(), bytes);
            }
        }
        extensions
    }

    /// Load registered resources from an extension map.
    /// Resources whose key is absent are left unchanged.
    pub fn load_all(&self, world: &mut World, extensions: &BTreeMap<String, Vec<u8>>) {
        for entry in &self.entries {
            if let Some(bytes) = extensions.get(&entry.key) {
                (entry.load_fn)(world, bytes);
            }
        }
    }

    /// Reset all registered resources to their defaults.
    pub fn reset_all(&self, world: &mut World) {
        for entry in &self.entries {
            (entry.reset_fn)(world);
        }
    }
}

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Global tick counter incremented each FixedUpdate.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub fn tick_counter(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        simulation_sets::configure_simulation_sets(app);

        app.init_resource::<TickCounter>()
            .init_resource::<SaveableRegistry>()
            .add_systems(Startup, world_init::init_world)
            .add_systems(FixedUpdate, tick_counter.in_set(SimulationSet::PreSim));

        plugin_registration::register_feature_plugins(app);
    }
}
