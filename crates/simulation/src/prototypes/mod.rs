//! Data-driven configuration: day cycles, biome templates and the maps to
//! spawn, loaded from a JSON manifest and validated before the simulation
//! starts.

mod error;
mod manifest;
mod registry;

pub use error::PrototypeError;
pub use manifest::{
    BiomePrototype, DayCyclePrototype, MapPrototype, PhasePrototype, PrototypeManifest,
    DEFAULT_START_COLOR, MAX_PHASE_DURATION,
};
pub use registry::{BiomeTemplate, Prototypes};

use bevy::prelude::*;

pub struct PrototypesPlugin;

impl Plugin for PrototypesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Prototypes>();
    }
}
