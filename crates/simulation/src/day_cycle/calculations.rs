use std::time::Duration;

use bevy::prelude::*;

use super::types::{CycleStep, CycleTransition, DayCycle};

// =============================================================================
// Pure logic (testable without ECS)
// =============================================================================

/// Index of the phase after `current`, wrapping to 0.
pub fn next_index(current: usize, len: usize) -> usize {
    if current + 1 >= len {
        0
    } else {
        current + 1
    }
}

/// Position of `now` within `start..end`, clamped to `[0, 1]`.
/// A zero-length window yields 0.
pub fn lerp_fraction(start: Duration, end: Duration, now: Duration) -> f32 {
    if start == end {
        return 0.0;
    }
    let from_start = now.as_secs_f64() - start.as_secs_f64();
    let total = end.as_secs_f64() - start.as_secs_f64();
    (from_start / total).clamp(0.0, 1.0) as f32
}

/// Per-channel sRGBA interpolation. `t` and every output channel are
/// clamped to `[0, 1]`.
pub fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let a = from.to_srgba();
    let b = to.to_srgba();
    let channel = |x: f32, y: f32| (x + (y - x) * t).clamp(0.0, 1.0);
    Color::srgba(
        channel(a.red, b.red),
        channel(a.green, b.green),
        channel(a.blue, b.blue),
        channel(a.alpha, b.alpha),
    )
}

/// Edge detection against the phase that just completed.
///
/// `announced_night` is the cached state; returns the transition to raise,
/// if any.
pub fn detect_transition(announced_night: bool, completed_is_night: bool) -> Option<CycleTransition> {
    match (announced_night, completed_is_night) {
        (true, false) => Some(CycleTransition::DayStarted),
        (false, true) => Some(CycleTransition::NightStarted),
        _ => None,
    }
}

/// Run one tick of `cycle` at simulation time `now`.
///
/// Returns `None` for single-phase cycles, which never animate. Otherwise:
///
/// 1. If `now` is strictly past `phase_end`, check for a day/night edge
///    using the phase that just completed, then advance exactly one phase.
///    The new window is chained from the old `phase_end`, not from `now`.
/// 2. Interpolate between the active phase's color and the next one's.
///
/// A pause longer than one phase leaves a backlog: only one phase is
/// consumed per tick and `lagging` is set until the cycle catches up.
pub fn step_cycle(cycle: &mut DayCycle, now: Duration) -> Option<CycleStep> {
    if cycle.is_static() {
        return None;
    }

    let len = cycle.phases.len();
    let mut advanced = false;
    let mut transition = None;

    if now > cycle.phase_end {
        let completed = cycle.current_index;
        transition = detect_transition(cycle.is_night, cycle.phases[completed].is_night);
        match transition {
            Some(CycleTransition::DayStarted) => cycle.is_night = false,
            Some(CycleTransition::NightStarted) => cycle.is_night = true,
            None => {}
        }

        let next = next_index(completed, len);
        cycle.current_index = next;
        cycle.phase_start = cycle.phase_end;
        cycle.phase_end = cycle.phase_end.saturating_add(cycle.phases[next].duration);
        advanced = true;
    }

    let current = cycle.current_index;
    let upcoming = next_index(current, len);
    let fraction = lerp_fraction(cycle.phase_start, cycle.phase_end, now);
    let color = lerp_color(
        cycle.phases[current].start_color,
        cycle.phases[upcoming].start_color,
        fraction,
    );

    Some(CycleStep {
        color,
        fraction,
        advanced,
        transition,
        lagging: now > cycle.phase_end,
    })
}
