use std::num::NonZeroUsize;

use crate::{
    anneal::AnnealingSchedule,
    checkpoint::CheckpointWriter,
    data::BatchStream,
    epoch::EpochRunner,
    error::{Result, TrainErr},
    eval::EvaluationPass,
    model::{Mode, Model},
    schedule::IntervalSchedule,
    sink::{CheckpointSink, VisualSink},
};

/// What a completed run leaves behind, for callers and logs.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Mean lower bound per epoch, in epoch order.
    pub bounds: Vec<f64>,
    /// The annealing coefficient after the final advance.
    pub coefficient: f64,
}

/// The top-level training loop.
///
/// Owns the model, the optimizer, both batch streams and both sinks for the
/// run's duration; nothing mutates them concurrently. Everything is
/// sequenced on one thread — training, evaluation and checkpointing are
/// blocking calls, so every artifact reflects a fully-settled model state.
///
/// Per epoch `e` in `1..=N`:
/// 1. train mode, one full traversal of the training stream,
/// 2. report the normalized running lower bound,
/// 3. halve the annealing coefficient (unconditionally, last epoch included),
/// 4. eval mode,
/// 5. evaluation pass if the visualization schedule fires for `e`,
/// 6. checkpoint write if the checkpoint schedule fires for `e`.
pub struct TrainingRun<M, T, H, V, C>
where
    M: Model,
    T: BatchStream<Batch = M::Batch>,
    H: BatchStream<Batch = M::Batch>,
    V: VisualSink<Artifact = M::Artifact>,
    C: CheckpointSink<State = M::State>,
{
    model: M,
    optimizer: M::Opt,
    train_stream: T,
    held_out: H,
    eval: EvaluationPass<V>,
    checkpoints: CheckpointWriter<C>,
    anneal: AnnealingSchedule,
    viz_schedule: IntervalSchedule,
    save_schedule: IntervalSchedule,
    epochs: NonZeroUsize,
}

impl<M, T, H, V, C> TrainingRun<M, T, H, V, C>
where
    M: Model,
    T: BatchStream<Batch = M::Batch>,
    H: BatchStream<Batch = M::Batch>,
    V: VisualSink<Artifact = M::Artifact>,
    C: CheckpointSink<State = M::State>,
{
    /// # Arguments
    /// * `model` - The model under training.
    /// * `optimizer` - The opaque optimizer handle threaded through the steps.
    /// * `train_stream` - The training split, reshuffled on every reset.
    /// * `held_out` - The held-out split, fixed order.
    /// * `viz_sink` - Destination for visualization artifacts.
    /// * `ckpt_sink` - Destination for checkpoint blobs.
    /// * `epochs` - Total epoch count `N`.
    /// * `viz_interval` - Visualization cadence; `None` fires once, at epoch `N`.
    /// * `save_interval` - Checkpoint cadence; `None` fires once, at epoch `N`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        model: M,
        optimizer: M::Opt,
        train_stream: T,
        held_out: H,
        viz_sink: V,
        ckpt_sink: C,
        epochs: NonZeroUsize,
        viz_interval: Option<NonZeroUsize>,
        save_interval: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            model,
            optimizer,
            train_stream,
            held_out,
            eval: EvaluationPass::new(viz_sink),
            checkpoints: CheckpointWriter::new(ckpt_sink),
            anneal: AnnealingSchedule::new(),
            viz_schedule: IntervalSchedule::new(viz_interval, epochs),
            save_schedule: IntervalSchedule::new(save_interval, epochs),
            epochs,
        }
    }

    /// Runs the loop to completion. Any failure is fatal and propagates;
    /// artifacts from intervals that already fired stay on their sinks.
    pub fn run(mut self) -> Result<RunReport> {
        let total = self.epochs.get();
        let runner = EpochRunner::new();
        let mut bounds = Vec::with_capacity(total);

        for epoch in 1..=total {
            self.model.set_mode(Mode::Train);
            let report = runner.run(
                &mut self.model,
                &mut self.train_stream,
                self.anneal.current(),
                &mut self.optimizer,
                epoch,
            )?;

            let vlb = report.mean_bound();
            log::info!("epoch {epoch}/{total} VLB: {vlb:.3}");
            bounds.push(vlb);

            self.anneal.advance();

            self.model.set_mode(Mode::Eval);
            if self.viz_schedule.should_fire(epoch) {
                self.eval.run(&mut self.model, &mut self.held_out, epoch)?;
            }
            if self.save_schedule.should_fire(epoch) {
                self.checkpoints
                    .write(&self.model, &self.optimizer, epoch)?;
            }
        }

        Ok(RunReport {
            bounds,
            coefficient: self.anneal.current(),
        })
    }
}

/// The restore path: loads prior parameters into a freshly constructed model
/// and stops. Mutually exclusive with running the loop — exactly one of the
/// two happens per invocation. Optimizer state in the blob is discarded;
/// this path reuses a trained model, it does not resume training.
pub fn restore<M: Model>(model: &mut M, state: M::State) -> Result<()> {
    model
        .load_state(state)
        .map_err(|source| TrainErr::Restore { source })
}
