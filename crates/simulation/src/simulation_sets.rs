//! Deterministic simulation ordering via `SystemSet` phases.
//!
//! Every gameplay system runs inside `FixedUpdate` and belongs to exactly one
//! of these sets, so ordering between plugins is explicit:
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – Tick counter and simulation clock. Everything after this
//!   phase reads a stable `SimClock::now` for the whole tick.
//! * **Simulation** – Per-map gameplay state: day cycle seeding and update,
//!   biome initialization.
//! * **PostSim** – Subscribers and aggregation: transition journal, light
//!   sync queue. These only *read* simulation state.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain: `PreSim` → `Simulation` → `PostSim`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Tick counter, simulation clock.
    PreSim,
    /// Day cycle, map biome initialization.
    Simulation,
    /// Journal and light sync consumers.
    PostSim,
}

pub(crate) fn configure_simulation_sets(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            SimulationSet::PreSim,
            SimulationSet::Simulation,
            SimulationSet::PostSim,
        )
            .chain(),
    );
}
