//! Deterministic RNG for map initialization.
//!
//! Biome seeds are rolled from a `ChaCha8Rng` so that the same manifest and
//! seed always request the same terrain from the biome subsystem.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DEFAULT_SEED: u64 = 42;

/// Full `ChaCha8Rng` state, so a restored world continues the same stream.
#[derive(Encode, Decode)]
struct RngState {
    seed: [u8; 32],
    word_pos: u128,
    stream: u64,
}

impl From<&ChaCha8Rng> for RngState {
    fn from(rng: &ChaCha8Rng) -> Self {
        Self {
            seed: rng.get_seed(),
            word_pos: rng.get_word_pos(),
            stream: rng.get_stream(),
        }
    }
}

impl From<RngState> for ChaCha8Rng {
    fn from(state: RngState) -> Self {
        let mut rng = ChaCha8Rng::from_seed(state.seed);
        rng.set_stream(state.stream);
        rng.set_word_pos(state.word_pos);
        rng
    }
}

/// Simulation-wide RNG. Take `ResMut<SimRng>`; never use `thread_rng()`.
#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Roll the seed handed to the biome subsystem for one map.
    pub fn next_biome_seed(&mut self) -> u32 {
        self.0.gen()
    }
}

impl crate::Saveable for SimRng {
    const SAVE_KEY: &'static str = "sim_rng";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(&RngState::from(&self.0)))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        match bitcode::decode::<RngState>(bytes) {
            Ok(state) => Self(state.into()),
            Err(e) => {
                warn!(
                    "SimRng: failed to decode {} bytes, reseeding with default: {}",
                    bytes.len(),
                    e
                );
                Self::default()
            }
        }
    }
}

pub struct SimRngPlugin;

impl Plugin for SimRngPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimRng>();

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<SimRng>();
    }
}
