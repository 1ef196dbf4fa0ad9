use std::{
    fs, io,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::Deserialize;

/// Selects which of the two mutually exclusive modes a process invocation
/// takes: run the full training loop, or load a checkpoint and stop.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    #[default]
    Train,
    Restore {
        checkpoint: PathBuf,
    },
}

/// Configuration surface of a run.
///
/// Intervals left unset fire once, at the final epoch, matching the
/// `IntervalSchedule` default.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub epochs: NonZeroUsize,
    #[serde(default)]
    pub viz_interval: Option<NonZeroUsize>,
    #[serde(default)]
    pub save_interval: Option<NonZeroUsize>,
    pub batch_size: NonZeroUsize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub mode: RunMode,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

impl RunConfig {
    /// Loads a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(io::Error::other)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            epochs: NonZeroUsize::new(30).unwrap(),
            viz_interval: NonZeroUsize::new(5),
            save_interval: NonZeroUsize::new(10),
            batch_size: NonZeroUsize::new(32).unwrap(),
            seed: None,
            output_dir: default_output_dir(),
            mode: RunMode::Train,
        }
    }
}
