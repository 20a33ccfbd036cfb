use bevy::prelude::*;

use crate::*;

/// Register all simulation feature plugins.
///
/// Each plugin is registered on its own line so new features append without
/// touching neighbours.
pub(crate) fn register_feature_plugins(app: &mut App) {
    // Clock, randomness, configuration
    app.add_plugins(sim_clock::SimClockPlugin);
    app.add_plugins(sim_rng::SimRngPlugin);
    app.add_plugins(prototypes::PrototypesPlugin);

    // Per-map state
    app.add_plugins(map_light::MapLightPlugin);
    app.add_plugins(day_cycle::DayCyclePlugin);
    app.add_plugins(map_biome::MapBiomePlugin);

    // Subscribers
    app.add_plugins(cycle_journal::CycleJournalPlugin);
}
