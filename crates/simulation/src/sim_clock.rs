use std::time::Duration;

use bevy::prelude::*;

use crate::Saveable;

/// Absolute simulation time shared by every per-map system.
///
/// `now` only moves forward, once per `FixedUpdate` tick, in
/// `SimulationSet::PreSim`. Systems later in the tick all observe the same
/// value.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimClock {
    pub now: Duration,
    pub speed: f32,
    pub paused: bool,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            speed: 1.0,
            paused: false,
        }
    }
}

impl SimClock {
    const MAX_SPEED: f32 = 16.0;

    /// Advance by one real-time step scaled by `speed`.
    pub fn tick(&mut self, delta: Duration) {
        if self.paused || self.speed <= 0.0 {
            return;
        }
        self.now += delta.mul_f32(self.speed.min(Self::MAX_SPEED));
    }

    /// Jump forward by an explicit amount, ignoring `paused` and `speed`.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn formatted(&self) -> String {
        let total = self.now.as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            total / 3600,
            (total / 60) % 60,
            total % 60
        )
    }
}

pub fn tick_sim_clock(time: Res<Time>, mut clock: ResMut<SimClock>) {
    clock.tick(time.delta());
}

// =============================================================================
// Saveable
// =============================================================================

/// Playback speed is a launch setting, not world state, so it is not saved.
#[derive(bitcode::Encode, bitcode::Decode, Default)]
struct ClockSnapshot {
    secs: u64,
    nanos: u32,
    paused: bool,
}

impl Saveable for SimClock {
    const SAVE_KEY: &'static str = "sim_clock";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(&ClockSnapshot {
            secs: self.now.as_secs(),
            nanos: self.now.subsec_nanos(),
            paused: self.paused,
        }))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        let snapshot: ClockSnapshot = crate::decode_or_warn(Self::SAVE_KEY, bytes);
        Self {
            now: Duration::from_secs(snapshot.secs)
                .saturating_add(Duration::from_nanos(u64::from(snapshot.nanos))),
            paused: snapshot.paused,
            ..Default::default()
        }
    }
}

pub struct SimClockPlugin;

impl Plugin for SimClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimClock>().add_systems(
            FixedUpdate,
            tick_sim_clock
                .after(crate::tick_counter)
                .in_set(crate::SimulationSet::PreSim),
        );

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<SimClock>();
    }
}
