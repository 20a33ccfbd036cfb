//! Day/night lighting cycle for maps.
//!
//! Each map with a [`DayCycle`] plays an ordered, wrapping list of phases.
//! Every tick the ambient color is interpolated from the active phase's start
//! color toward the next phase's, written into the map's `MapLight`, and
//! day/night edges are announced with [`DayStarted`] / [`NightStarted`].

mod calculations;
mod systems;
mod tests;
mod types;

pub use calculations::{detect_transition, lerp_color, lerp_fraction, next_index, step_cycle};
pub use systems::{init_day_cycles, update_day_cycles, DayCyclePlugin};
pub use types::{
    CyclePhase, CycleStep, CycleTransition, DayCycle, DayCycleError, DayStarted, NightStarted,
    DEFAULT_PHASE_DURATION,
};
