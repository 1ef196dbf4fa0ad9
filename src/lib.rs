pub mod anneal;
pub mod checkpoint;
pub mod config;
pub mod data;
pub mod demo;
pub mod epoch;
pub mod error;
pub mod eval;
pub mod model;
pub mod run;
pub mod schedule;
pub mod sink;

pub use anneal::AnnealingSchedule;
pub use config::{RunConfig, RunMode};
pub use error::{Result, TrainErr};
pub use model::{Mode, Model, ModelErr};
pub use run::{RunReport, TrainingRun, restore};
pub use schedule::IntervalSchedule;
