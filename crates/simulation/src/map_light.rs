//! Per-map ambient light and its replication queue.
//!
//! `MapLight` is the sink the day cycle writes into. Downstream consumers
//! (network replication, renderers) do not poll every map; they drain the
//! `LightSyncQueue`, which collects every light whose change tick was set
//! during the current simulation tick.

use bevy::prelude::*;

use crate::TickCounter;

/// Ambient light of one map.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MapLight {
    pub ambient_color: Color,
}

impl Default for MapLight {
    fn default() -> Self {
        Self {
            ambient_color: Color::BLACK,
        }
    }
}

/// One pending light update for downstream consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct LightUpdate {
    pub map: Entity,
    pub color: Color,
    pub tick: u64,
}

/// Lights marked changed since the queue was last drained.
#[derive(Resource, Default, Debug)]
pub struct LightSyncQueue {
    pending: Vec<LightUpdate>,
}

impl LightSyncQueue {
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> &[LightUpdate] {
        &self.pending
    }

    /// Hand all pending updates to the caller, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<LightUpdate> {
        std::mem::take(&mut self.pending)
    }

    /// Queue an update, replacing an older pending entry for the same map.
    pub fn push(&mut self, update: LightUpdate) {
        if let Some(existing) = self.pending.iter_mut().find(|u| u.map == update.map) {
            *existing = update;
        } else {
            self.pending.push(update);
        }
    }
}

/// Collects every `MapLight` touched this tick.
///
/// Relies on change detection only: the day cycle marks its light changed
/// every tick even when the color is identical.
pub fn collect_changed_lights(
    tick: Res<TickCounter>,
    lights: Query<(Entity, &MapLight), Changed<MapLight>>,
    mut queue: ResMut<LightSyncQueue>,
) {
    for (map, light) in &lights {
        queue.push(LightUpdate {
            map,
            color: light.ambient_color,
            tick: tick.0,
        });
    }
}

pub struct MapLightPlugin;

impl Plugin for MapLightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LightSyncQueue>().add_systems(
            FixedUpdate,
            collect_changed_lights.in_set(crate::SimulationSet::PostSim),
        );
    }
}
