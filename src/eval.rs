use crate::{
    data::BatchStream,
    error::{Result, TrainErr},
    model::Model,
    sink::VisualSink,
};

/// Conditional-sampling evaluation against the held-out stream.
///
/// Draws exactly one batch per tick (the first of a fresh traversal; the
/// rest is discarded), samples conditioned on it, and hands both artifacts
/// to the sink keyed by the epoch. The model must already be in eval mode —
/// the run switches modes around this call, never inside it.
#[derive(Debug)]
pub struct EvaluationPass<V> {
    sink: V,
}

impl<V: VisualSink> EvaluationPass<V> {
    pub fn new(sink: V) -> Self {
        Self { sink }
    }

    pub fn run<M, S>(&mut self, model: &mut M, held_out: &mut S, epoch: usize) -> Result<()>
    where
        M: Model<Artifact = V::Artifact>,
        S: BatchStream<Batch = M::Batch>,
    {
        held_out.reset();
        // An empty held-out stream is a configuration error, not a skippable tick.
        let batch = held_out
            .next_batch()
            .ok_or(TrainErr::EmptyHeldOut { epoch })?;

        let (inputs, samples) = model
            .sample_conditioned(batch)
            .map_err(|source| TrainErr::Sample { epoch, source })?;
        self.sink.put(&inputs, &samples, epoch)?;
        Ok(())
    }
}
