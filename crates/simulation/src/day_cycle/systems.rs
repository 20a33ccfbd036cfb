use bevy::prelude::*;

use crate::map_light::MapLight;
use crate::sim_clock::SimClock;

use super::calculations::step_cycle;
use super::types::{CycleTransition, DayCycle, DayStarted, NightStarted};

/// Seeds newly added day cycles.
///
/// 1. Ensures the map has a `MapLight` (inserted when missing).
/// 2. Opens the first phase window at `SimClock::now`.
/// 3. Paints the first phase's color so static cycles show it from the start.
///
/// Cycles restored from a save are already initialized and keep their window.
/// No transition event is raised here.
pub fn init_day_cycles(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut cycles: Query<(Entity, &mut DayCycle, Option<&mut MapLight>), Added<DayCycle>>,
) {
    for (map, mut cycle, light) in &mut cycles {
        if cycle.is_initialized() {
            if light.is_none() {
                commands.entity(map).insert(MapLight::default());
            }
            continue;
        }

        cycle.start(clock.now);
        let color = cycle.current_phase().start_color;
        match light {
            Some(mut light) => light.ambient_color = color,
            None => {
                commands.entity(map).insert(MapLight {
                    ambient_color: color,
                });
            }
        }

        debug!(
            "day cycle started on {:?}: {} phases, first phase ends at {:.1}s",
            map,
            cycle.phases().len(),
            cycle.phase_end().as_secs_f64()
        );
    }
}

/// Advances every multi-phase day cycle and writes its ambient color.
///
/// The light is marked changed every tick, even when the color is
/// unchanged, so replication consumers see a steady stream of updates.
pub fn update_day_cycles(
    clock: Res<SimClock>,
    mut cycles: Query<(Entity, &mut DayCycle, &mut MapLight)>,
    mut day_events: EventWriter<DayStarted>,
    mut night_events: EventWriter<NightStarted>,
) {
    let now = clock.now;
    for (map, mut cycle, mut light) in &mut cycles {
        if !cycle.is_initialized() {
            continue;
        }
        let Some(step) = step_cycle(&mut cycle, now) else {
            continue;
        };

        match step.transition {
            Some(CycleTransition::DayStarted) => {
                day_events.send(DayStarted { map });
            }
            Some(CycleTransition::NightStarted) => {
                night_events.send(NightStarted { map });
            }
            None => {}
        }

        if step.lagging {
            debug!(
                "day cycle on {:?} is behind: now {:.1}s, phase {} ends {:.1}s",
                map,
                now.as_secs_f64(),
                cycle.current_index(),
                cycle.phase_end().as_secs_f64()
            );
        }

        light.ambient_color = step.color;
        light.set_changed();
    }
}

pub struct DayCyclePlugin;

impl Plugin for DayCyclePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DayStarted>()
            .add_event::<NightStarted>()
            .add_systems(
                FixedUpdate,
                (init_day_cycles, update_day_cycles)
                    .chain()
                    .in_set(crate::SimulationSet::Simulation),
            );
    }
}
