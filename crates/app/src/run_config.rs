//! Runtime settings read from the environment.
//!
//! | Variable              | Meaning                                         |
//! |-----------------------|-------------------------------------------------|
//! | `DUSKFALL_PROTOTYPES` | manifest path (default `assets/prototypes.json`) |
//! | `DUSKFALL_SPEED`      | simulation clock speed multiplier                |
//! | `DUSKFALL_SAVE`       | save file, loaded on start and written on exit   |
//! | `DUSKFALL_RUN_SECS`   | stop after this many simulated seconds           |

use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;

pub const DEFAULT_PROTOTYPES_PATH: &str = "assets/prototypes.json";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub prototypes: PathBuf,
    pub speed: f32,
    pub save: Option<PathBuf>,
    pub run_for: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            prototypes: PathBuf::from(DEFAULT_PROTOTYPES_PATH),
            speed: 1.0,
            save: None,
            run_for: None,
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values are reported and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("DUSKFALL_PROTOTYPES") {
            config.prototypes = PathBuf::from(path);
        }
        if let Some(raw) = lookup("DUSKFALL_SPEED") {
            match raw.parse::<f32>() {
                Ok(speed) if speed.is_finite() && speed >= 0.0 => config.speed = speed,
                _ => warn!("DUSKFALL_SPEED='{raw}' is not a non-negative number, using 1.0"),
            }
        }
        if let Some(path) = lookup("DUSKFALL_SAVE") {
            config.save = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup("DUSKFALL_RUN_SECS") {
            match raw.parse::<f64>().ok().and_then(|s| Duration::try_from_secs_f64(s).ok()) {
                Some(run_for) => config.run_for = Some(run_for),
                None => warn!("DUSKFALL_RUN_SECS='{raw}' is not a valid duration, running forever"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> RunConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RunConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        assert_eq!(config(&[]), RunConfig::default());
    }

    #[test]
    fn test_all_variables() {
        let c = config(&[
            ("DUSKFALL_PROTOTYPES", "/tmp/p.json"),
            ("DUSKFALL_SPEED", "4"),
            ("DUSKFALL_SAVE", "/tmp/maps.sav"),
            ("DUSKFALL_RUN_SECS", "90.5"),
        ]);
        assert_eq!(c.prototypes, PathBuf::from("/tmp/p.json"));
        assert_eq!(c.speed, 4.0);
        assert_eq!(c.save, Some(PathBuf::from("/tmp/maps.sav")));
        assert_eq!(c.run_for, Some(Duration::from_secs_f64(90.5)));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let c = config(&[("DUSKFALL_SPEED", "fast"), ("DUSKFALL_RUN_SECS", "-3")]);
        assert_eq!(c.speed, 1.0);
        assert_eq!(c.run_for, None);
    }
}
