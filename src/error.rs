use std::{error::Error, fmt, io};

use crate::model::ModelErr;

/// The crate's result type.
pub type Result<T> = std::result::Result<T, TrainErr>;

/// Training-run failures.
///
/// There are no retries anywhere in the loop: every variant is fatal to the
/// run and carries enough context to locate the failing epoch.
#[derive(Debug)]
pub enum TrainErr {
    Io(io::Error),
    Step {
        epoch: usize,
        batch: usize,
        source: ModelErr,
    },
    Sample {
        epoch: usize,
        source: ModelErr,
    },
    Save {
        epoch: usize,
        source: ModelErr,
    },
    /// The held-out stream yielded no batch on an evaluation tick.
    EmptyHeldOut {
        epoch: usize,
    },
    Restore {
        source: ModelErr,
    },
}

impl fmt::Display for TrainErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainErr::Io(e) => write!(f, "io error: {e}"),
            TrainErr::Step {
                epoch,
                batch,
                source,
            } => write!(f, "training step failed at epoch {epoch}, batch {batch}: {source}"),
            TrainErr::Sample { epoch, source } => {
                write!(f, "conditional sampling failed at epoch {epoch}: {source}")
            }
            TrainErr::Save { epoch, source } => {
                write!(f, "state serialization failed at epoch {epoch}: {source}")
            }
            TrainErr::EmptyHeldOut { epoch } => write!(
                f,
                "held-out stream yielded no batch at epoch {epoch}; evaluation requires at least one"
            ),
            TrainErr::Restore { source } => write!(f, "checkpoint restore failed: {source}"),
        }
    }
}

impl Error for TrainErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TrainErr::Io(e) => Some(e),
            TrainErr::Step { source, .. }
            | TrainErr::Sample { source, .. }
            | TrainErr::Save { source, .. }
            | TrainErr::Restore { source } => Some(source),
            TrainErr::EmptyHeldOut { .. } => None,
        }
    }
}

impl From<io::Error> for TrainErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<TrainErr> for io::Error {
    fn from(value: TrainErr) -> Self {
        match value {
            TrainErr::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
