use std::time::Duration;

use bevy::prelude::*;

use crate::day_cycle::{CycleTransition, DayStarted, NightStarted};
use crate::sim_clock::SimClock;

// =============================================================================
// Journal entries
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CycleJournalEntry {
    pub map: Entity,
    pub transition: CycleTransition,
    pub at: Duration,
}

// =============================================================================
// Journal resource
// =============================================================================

/// Recent day/night transitions across all maps, oldest first.
#[derive(Resource)]
pub struct CycleJournal {
    pub entries: Vec<CycleJournalEntry>,
    pub max_entries: usize,
}

impl Default for CycleJournal {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: 200,
        }
    }
}

impl CycleJournal {
    /// Push a new entry, trimming old entries if over capacity.
    pub fn push(&mut self, entry: CycleJournalEntry) {
        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(0..excess);
        }
    }

    pub fn count(&self, transition: CycleTransition) -> usize {
        self.entries
            .iter()
            .filter(|e| e.transition == transition)
            .count()
    }

    pub fn for_map(&self, map: Entity) -> impl Iterator<Item = &CycleJournalEntry> {
        self.entries.iter().filter(move |e| e.map == map)
    }

    pub fn last(&self) -> Option<&CycleJournalEntry> {
        self.entries.last()
    }
}

// =============================================================================
// System
// =============================================================================

/// Records every transition raised this tick.
pub fn record_cycle_transitions(
    clock: Res<SimClock>,
    mut days: EventReader<DayStarted>,
    mut nights: EventReader<NightStarted>,
    mut journal: ResMut<CycleJournal>,
) {
    let at = clock.now;
    let raised = days
        .read()
        .map(|e| (e.map, CycleTransition::DayStarted))
        .chain(nights.read().map(|e| (e.map, CycleTransition::NightStarted)));

    for (map, transition) in raised {
        info!("{:?}: {} at {}", map, transition.label(), clock.formatted());
        journal.push(CycleJournalEntry {
            map,
            transition,
            at,
        });
    }
}

pub struct CycleJournalPlugin;

impl Plugin for CycleJournalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CycleJournal>().add_systems(
            FixedUpdate,
            record_cycle_transitions.in_set(crate::SimulationSet::PostSim),
        );
    }
}
