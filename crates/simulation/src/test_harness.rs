//! # TestWorld: headless integration test harness
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `SimulationPlugin`
//! for running integration tests without a window or renderer.
//!
//! The simulation clock is paused: time only moves through
//! [`TestWorld::advance_secs`] / [`TestWorld::set_time`], so phase boundaries
//! land exactly where a test puts them.

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;

use crate::cycle_journal::CycleJournal;
use crate::day_cycle::DayCycle;
use crate::map_biome::MapBiome;
use crate::map_light::{LightSyncQueue, LightUpdate, MapLight};
use crate::maps::{spawn_map_in_world, GameMap, MapSpawn};
use crate::prototypes::{BiomeTemplate, Prototypes};
use crate::sim_clock::SimClock;
use crate::sim_rng::SimRng;
use crate::world_init::SkipWorldInit;
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
pub struct TestWorld {
    app: App,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create an **empty** world: no maps, a `Grasslands` biome template,
    /// paused clock at t=0.
    pub fn new() -> Self {
        let prototypes = Prototypes::default().with_biome(BiomeTemplate::new("Grasslands"));
        Self::build(prototypes, true)
    }

    /// Create a world that spawns the maps listed in `prototypes` during
    /// Startup, the same way the game does.
    pub fn from_prototypes(prototypes: Prototypes) -> Self {
        Self::build(prototypes, false)
    }

    fn build(prototypes: Prototypes, skip_world_init: bool) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Insert before SimulationPlugin so init_resource keeps these.
        app.insert_resource(prototypes);
        if skip_world_init {
            app.insert_resource(SkipWorldInit);
        }
        app.add_plugins(SimulationPlugin);
        app.world_mut().resource_mut::<SimClock>().paused = true;

        // Run one update so Startup systems execute.
        app.update();

        Self { app }
    }

    // -----------------------------------------------------------------------
    // World setup (builder pattern, consumes and returns Self)
    // -----------------------------------------------------------------------

    /// Register an additional biome template.
    pub fn with_biome_template(mut self, id: &str) -> Self {
        let prototypes = self.app.world().resource::<Prototypes>().clone();
        self.app
            .insert_resource(prototypes.with_biome(BiomeTemplate::new(id)));
        self
    }

    /// Reseed the simulation RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app.insert_resource(SimRng::from_seed_u64(seed));
        self
    }

    /// Move the paused clock to an absolute time without ticking.
    pub fn with_time(mut self, secs: f64) -> Self {
        self.set_time(secs);
        self
    }

    /// Spawn a map directly into the world. Its day cycle and biome are seeded
    /// on the next tick.
    pub fn spawn_map(&mut self, spawn: MapSpawn) -> Entity {
        spawn_map_in_world(self.app.world_mut(), spawn)
    }

    // -----------------------------------------------------------------------
    // Time control
    // -----------------------------------------------------------------------

    /// Run `n` FixedUpdate ticks without moving the clock.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Move the clock forward by `secs` and run one tick.
    pub fn advance_secs(&mut self, secs: f64) {
        self.app
            .world_mut()
            .resource_mut::<SimClock>()
            .advance(Duration::from_secs_f64(secs));
        self.tick(1);
    }

    /// Set the clock to an absolute time. Does not tick.
    pub fn set_time(&mut self, secs: f64) {
        self.app.world_mut().resource_mut::<SimClock>().now = Duration::from_secs_f64(secs);
    }

    pub fn now(&self) -> Duration {
        self.resource::<SimClock>().now
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Access the ECS world mutably (needed for queries in Bevy).
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn day_cycle(&self, map: Entity) -> &DayCycle {
        self.app
            .world()
            .get::<DayCycle>(map)
            .expect("map has no DayCycle")
    }

    pub fn light(&self, map: Entity) -> Option<&MapLight> {
        self.app.world().get::<MapLight>(map)
    }

    pub fn ambient_srgba(&self, map: Entity) -> Srgba {
        self.light(map)
            .expect("map has no MapLight")
            .ambient_color
            .to_srgba()
    }

    pub fn biome(&self, map: Entity) -> Option<&MapBiome> {
        self.app.world().get::<MapBiome>(map)
    }

    pub fn journal(&self) -> &CycleJournal {
        self.resource::<CycleJournal>()
    }

    pub fn drain_light_updates(&mut self) -> Vec<LightUpdate> {
        self.app
            .world_mut()
            .resource_mut::<LightSyncQueue>()
            .drain()
    }

    /// Names of all spawned maps, sorted.
    pub fn map_names(&mut self) -> Vec<String> {
        let world = self.app.world_mut();
        let mut names: Vec<String> = world
            .query::<&GameMap>()
            .iter(world)
            .map(|m| m.name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn find_map(&mut self, name: &str) -> Option<Entity> {
        let world = self.app.world_mut();
        world
            .query::<(Entity, &GameMap)>()
            .iter(world)
            .find(|(_, m)| m.name == name)
            .map(|(e, _)| e)
    }
}
