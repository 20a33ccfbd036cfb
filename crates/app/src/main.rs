use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use save::{LoadMapsEvent, SaveMapsEvent, SavePlugin};
use simulation::map_light::LightSyncQueue;
use simulation::prototypes::{PrototypeManifest, Prototypes};
use simulation::sim_clock::SimClock;
use simulation::world_init::SkipWorldInit;
use simulation::SimulationPlugin;

mod run_config;

use run_config::RunConfig;

const FRAME_TIME: Duration = Duration::from_millis(16);

fn main() -> AppExit {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(FRAME_TIME)),
        LogPlugin::default(),
    ));

    let config = RunConfig::from_env();
    let prototypes = match load_prototypes(&config) {
        Ok(prototypes) => prototypes,
        Err(e) => {
            error!("Cannot start: {e}");
            return AppExit::error();
        }
    };
    app.insert_resource(prototypes);

    // An existing save replaces the manifest's initial maps.
    let restore = config.save.clone().filter(|path| path.exists());
    if restore.is_some() {
        app.insert_resource(SkipWorldInit);
    }

    app.add_plugins((SimulationPlugin, SavePlugin));
    app.world_mut().resource_mut::<SimClock>().speed = config.speed;

    if let Some(path) = restore {
        info!("Restoring maps from {}", path.display());
        app.world_mut().send_event(LoadMapsEvent { path });
    }

    app.insert_resource(config)
        .init_resource::<ShutdownState>()
        .add_systems(Update, (drain_light_updates, stop_after_run_time));

    app.run()
}

fn load_prototypes(config: &RunConfig) -> Result<Prototypes, simulation::prototypes::PrototypeError> {
    let prototypes = PrototypeManifest::load(&config.prototypes)?.validate()?;
    info!(
        "Loaded {} maps, {} day cycles, {} biomes from {}",
        prototypes.maps().len(),
        prototypes.day_cycle_ids().count(),
        prototypes.biome_ids().count(),
        config.prototypes.display()
    );
    Ok(prototypes)
}

/// Stand-in consumer of the light replication stream.
fn drain_light_updates(mut queue: ResMut<LightSyncQueue>) {
    if queue.is_empty() {
        return;
    }
    for update in queue.drain() {
        trace!("light {:?} -> {:?} (tick {})", update.map, update.color, update.tick);
    }
}

#[derive(Resource, Default, PartialEq, Eq)]
enum ShutdownState {
    #[default]
    Running,
    Saving,
}

/// Once `run_for` of simulated time has passed: request a save (if
/// configured) on one frame, exit on the next.
fn stop_after_run_time(
    config: Res<RunConfig>,
    clock: Res<SimClock>,
    mut state: ResMut<ShutdownState>,
    mut saves: EventWriter<SaveMapsEvent>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(run_for) = config.run_for else {
        return;
    };
    match *state {
        ShutdownState::Running if clock.now >= run_for => {
            info!("Ran for {}, stopping", clock.formatted());
            if let Some(path) = &config.save {
                saves.send(SaveMapsEvent { path: path.clone() });
            }
            *state = ShutdownState::Saving;
        }
        ShutdownState::Running => {}
        ShutdownState::Saving => {
            exit.send(AppExit::Success);
        }
    }
}
