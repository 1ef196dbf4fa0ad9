use crate::{
    data::BatchStream,
    error::{Result, TrainErr},
    model::Model,
};

/// Gradient clipping stays on for every step of every epoch.
const CLIP_GRADIENTS: bool = true;

/// Accumulated lower bound for one completed epoch.
#[derive(Debug, Clone, Copy)]
pub struct EpochReport {
    total: f64,
    batches: usize,
}

impl EpochReport {
    /// The running lower bound, normalized by the batches actually consumed
    /// rather than a recomputed `len / batch_size` formula, so the report
    /// cannot drift from the stream's own drop-last semantics.
    pub fn mean_bound(&self) -> f64 {
        if self.batches == 0 {
            0.0
        } else {
            self.total / self.batches as f64
        }
    }

    #[inline]
    pub fn batches(&self) -> usize {
        self.batches
    }
}

/// Executes one full traversal of the training stream.
///
/// All gradient math is delegated to the model and optimizer; this runner
/// only sequences the step calls and sums their reported bounds. A step
/// failure propagates immediately, there is no retry.
#[derive(Debug, Default)]
pub struct EpochRunner;

impl EpochRunner {
    pub fn new() -> Self {
        Self
    }

    /// # Arguments
    /// * `model` - The model advancing one step per batch, already in train mode.
    /// * `stream` - The training stream; reset here for a fresh traversal.
    /// * `coefficient` - The annealing weight, constant for this epoch.
    /// * `opt` - The optimizer handle threaded through each step.
    /// * `epoch` - The 1-based epoch, for error context only.
    pub fn run<M, S>(
        &self,
        model: &mut M,
        stream: &mut S,
        coefficient: f64,
        opt: &mut M::Opt,
        epoch: usize,
    ) -> Result<EpochReport>
    where
        M: Model,
        S: BatchStream<Batch = M::Batch>,
    {
        stream.reset();

        let mut total = 0.0;
        let mut batches = 0;
        while let Some(batch) = stream.next_batch() {
            let bound = model
                .step(batch, coefficient, opt, CLIP_GRADIENTS)
                .map_err(|source| TrainErr::Step {
                    epoch,
                    batch: batches,
                    source,
                })?;
            total += bound;
            batches += 1;
        }

        Ok(EpochReport { total, batches })
    }
}
