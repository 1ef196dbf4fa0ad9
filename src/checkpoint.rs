use crate::{
    error::{Result, TrainErr},
    model::Model,
    sink::CheckpointSink,
};

/// Persists model parameters plus optimizer state at interval ticks.
///
/// The blob is opaque to the loop: the model serializes, the sink stores it
/// keyed by the 1-based epoch. Blobs are write-once and never read back
/// within a training run; only a separate restore invocation consumes them.
#[derive(Debug)]
pub struct CheckpointWriter<C> {
    sink: C,
}

impl<C: CheckpointSink> CheckpointWriter<C> {
    pub fn new(sink: C) -> Self {
        Self { sink }
    }

    pub fn write<M>(&mut self, model: &M, opt: &M::Opt, epoch: usize) -> Result<()>
    where
        M: Model<State = C::State>,
    {
        let state = model
            .save(opt)
            .map_err(|source| TrainErr::Save { epoch, source })?;
        self.sink.put(&state, epoch)?;
        Ok(())
    }
}
