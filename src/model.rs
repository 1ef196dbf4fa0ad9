use std::{error::Error, fmt};

/// Whether the model applies gradient updates (`Train`) or runs pure
/// inference (`Eval`). The two are never interleaved within one phase of an
/// epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Train,
    Eval,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Train => write!(f, "train"),
            Mode::Eval => write!(f, "eval"),
        }
    }
}

/// Failures raised by a model implementation.
#[derive(Debug)]
pub enum ModelErr {
    /// The loss left the finite range. Not transient, never retried.
    Diverged { loss: f64 },
    /// A capability was invoked in the wrong mode.
    WrongMode { expected: Mode, got: Mode },
    /// A state blob could not be produced or applied.
    InvalidState(String),
}

impl fmt::Display for ModelErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelErr::Diverged { loss } => write!(f, "loss diverged to {loss}"),
            ModelErr::WrongMode { expected, got } => {
                write!(f, "model is in {got} mode, expected {expected}")
            }
            ModelErr::InvalidState(msg) => write!(f, "invalid state: {msg}"),
        }
    }
}

impl Error for ModelErr {}

/// Capability set of a trainable generative model.
///
/// The loop never looks inside the model: architecture, loss computation,
/// gradient math and sampling all live behind this trait, so the
/// orchestration is fully testable against a stub returning deterministic
/// scalars and artifacts. The optimizer is an opaque handle of type `Opt`,
/// threaded through `step` and `save` and never inspected here.
pub trait Model {
    /// One mini-batch as produced by a batch stream.
    type Batch;
    /// An opaque rendered output of conditional sampling.
    type Artifact;
    /// An opaque checkpoint blob covering parameters and optimizer state.
    type State;
    /// The optimizer handle.
    type Opt;

    fn set_mode(&mut self, mode: Mode);

    /// Performs a single optimization step over `batch`.
    ///
    /// # Arguments
    /// * `batch` - The mini-batch to train on.
    /// * `coefficient` - The annealing weight for the regularizing loss term,
    ///   constant within an epoch.
    /// * `opt` - The optimizer advancing the parameters.
    /// * `clip_gradients` - Whether gradients are clipped before the update.
    ///
    /// # Returns
    /// The batch's contribution to the variational lower bound, or
    /// `ModelErr::Diverged` on numerical failure.
    fn step(
        &mut self,
        batch: &Self::Batch,
        coefficient: f64,
        opt: &mut Self::Opt,
        clip_gradients: bool,
    ) -> Result<f64, ModelErr>;

    /// Samples conditioned on `batch`. Callable only in eval mode.
    ///
    /// # Returns
    /// The raw-input artifact and the generated-sample artifact.
    fn sample_conditioned(
        &mut self,
        batch: &Self::Batch,
    ) -> Result<(Self::Artifact, Self::Artifact), ModelErr>;

    /// Serializes parameters plus optimizer state into an opaque blob.
    fn save(&self, opt: &Self::Opt) -> Result<Self::State, ModelErr>;

    /// Loads parameters from an opaque blob. Optimizer state in the blob is
    /// ignored; restoring is for inference reuse, not for resuming training.
    fn load_state(&mut self, state: Self::State) -> Result<(), ModelErr>;
}
