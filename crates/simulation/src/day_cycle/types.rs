use std::fmt;
use std::time::Duration;

use bevy::prelude::*;

// =============================================================================
// Constants
// =============================================================================

/// Phase length used when a prototype omits `duration`.
pub const DEFAULT_PHASE_DURATION: Duration = Duration::from_secs(60);

// =============================================================================
// Phases
// =============================================================================

/// One interval of a day cycle: the ambient color at its start, its length,
/// and whether it counts as night.
#[derive(Debug, Clone, PartialEq)]
pub struct CyclePhase {
    pub start_color: Color,
    pub duration: Duration,
    pub is_night: bool,
}

impl Default for CyclePhase {
    fn default() -> Self {
        Self {
            start_color: Color::WHITE,
            duration: DEFAULT_PHASE_DURATION,
            is_night: false,
        }
    }
}

impl CyclePhase {
    pub fn day(start_color: Color, duration: Duration) -> Self {
        Self {
            start_color,
            duration,
            is_night: false,
        }
    }

    pub fn night(start_color: Color, duration: Duration) -> Self {
        Self {
            start_color,
            duration,
            is_night: true,
        }
    }
}

// =============================================================================
// Component
// =============================================================================

/// Day/night cycle state of a single map.
///
/// Playback runs through `phases` in order and wraps. The active phase spans
/// `phase_start..=phase_end` in simulation time; the window is chained from
/// the previous `phase_end` so irregular ticks never shift phase boundaries.
///
/// `is_night` caches the last *announced* state. It only changes together
/// with a `DayStarted` / `NightStarted` event.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct DayCycle {
    pub(crate) phases: Vec<CyclePhase>,
    pub(crate) current_index: usize,
    pub(crate) phase_start: Duration,
    pub(crate) phase_end: Duration,
    pub(crate) is_night: bool,
    pub(crate) initialized: bool,
}

impl DayCycle {
    /// Build an uninitialized cycle. The phase window is seeded on the first
    /// tick after the component is added to a map.
    pub fn new(phases: Vec<CyclePhase>) -> Result<Self, DayCycleError> {
        if phases.is_empty() {
            return Err(DayCycleError::EmptyPhases);
        }
        Ok(Self {
            phases,
            current_index: 0,
            phase_start: Duration::ZERO,
            phase_end: Duration::ZERO,
            is_night: false,
            initialized: false,
        })
    }

    /// Rebuild a cycle mid-playback, e.g. from a save file.
    pub fn restore(
        phases: Vec<CyclePhase>,
        current_index: usize,
        phase_start: Duration,
        phase_end: Duration,
        is_night: bool,
    ) -> Result<Self, DayCycleError> {
        if phases.is_empty() {
            return Err(DayCycleError::EmptyPhases);
        }
        if current_index >= phases.len() {
            return Err(DayCycleError::IndexOutOfRange {
                index: current_index,
                len: phases.len(),
            });
        }
        if phase_end < phase_start {
            return Err(DayCycleError::InvertedWindow {
                start: phase_start,
                end: phase_end,
            });
        }
        let duration = phases[current_index].duration;
        if phase_start.checked_add(duration) != Some(phase_end) {
            return Err(DayCycleError::WindowMismatch {
                start: phase_start,
                end: phase_end,
                duration,
            });
        }
        Ok(Self {
            phases,
            current_index,
            phase_start,
            phase_end,
            is_night,
            initialized: true,
        })
    }

    /// Seed the first phase window at `now`.
    pub fn start(&mut self, now: Duration) {
        self.current_index = 0;
        self.phase_start = now;
        self.phase_end = now.saturating_add(self.phases[0].duration);
        self.initialized = true;
    }

    pub fn phases(&self) -> &[CyclePhase] {
        &self.phases
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_phase(&self) -> &CyclePhase {
        &self.phases[self.current_index]
    }

    pub fn next_index(&self) -> usize {
        super::calculations::next_index(self.current_index, self.phases.len())
    }

    pub fn phase_start(&self) -> Duration {
        self.phase_start
    }

    pub fn phase_end(&self) -> Duration {
        self.phase_end
    }

    pub fn is_night(&self) -> bool {
        self.is_night
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// A single phase never transitions or animates.
    pub fn is_static(&self) -> bool {
        self.phases.len() < 2
    }

    /// Sum of all phase durations.
    pub fn period(&self) -> Duration {
        self.phases.iter().map(|p| p.duration).sum()
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Rejected day cycle construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayCycleError {
    /// A cycle needs at least one phase.
    EmptyPhases,
    /// Restored phase index does not exist.
    IndexOutOfRange { index: usize, len: usize },
    /// Restored phase window ends before it starts.
    InvertedWindow { start: Duration, end: Duration },
    /// Restored phase window is not exactly as long as its phase.
    WindowMismatch {
        start: Duration,
        end: Duration,
        duration: Duration,
    },
}

impl fmt::Display for DayCycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayCycleError::EmptyPhases => write!(f, "day cycle has no phases"),
            DayCycleError::IndexOutOfRange { index, len } => {
                write!(f, "phase index {index} out of range for {len} phases")
            }
            DayCycleError::InvertedWindow { start, end } => write!(
                f,
                "phase window ends at {:.3}s before it starts at {:.3}s",
                end.as_secs_f64(),
                start.as_secs_f64()
            ),
            DayCycleError::WindowMismatch {
                start,
                end,
                duration,
            } => write!(
                f,
                "phase window {:.3}s..{:.3}s does not match phase duration {:.3}s",
                start.as_secs_f64(),
                end.as_secs_f64(),
                duration.as_secs_f64()
            ),
        }
    }
}

impl std::error::Error for DayCycleError {}

// =============================================================================
// Events
// =============================================================================

/// `map` switched from night to day.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStarted {
    pub map: Entity,
}

/// `map` switched from day to night.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightStarted {
    pub map: Entity,
}

/// Transition detected by a single step of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleTransition {
    DayStarted,
    NightStarted,
}

impl CycleTransition {
    pub fn label(self) -> &'static str {
        match self {
            Self::DayStarted => "day started",
            Self::NightStarted => "night started",
        }
    }
}

/// Output of one tick of a multi-phase cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleStep {
    /// Ambient color to write into the map light.
    pub color: Color,
    /// Interpolation fraction within the (possibly new) active phase.
    pub fraction: f32,
    /// Whether the active phase changed this tick.
    pub advanced: bool,
    pub transition: Option<CycleTransition>,
    /// `now` is still past the end of the active phase after advancing.
    pub lagging: bool,
}
