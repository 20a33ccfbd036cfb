mod atomic_write;
pub mod file_header;
pub mod map_snapshot;
mod save_error;
mod save_plugin;
pub mod world_snapshot;


pub use atomic_write::atomic_write;
pub use map_snapshot::{SaveData, CURRENT_SAVE_VERSION};
pub use save_error::SaveError;
pub use save_plugin::{LoadMapsEvent, MapsLoaded, MapsSaved, SaveMapsEvent, SavePlugin};
pub use world_snapshot::{encode_world, load_from_file, restore_world, save_to_file};
