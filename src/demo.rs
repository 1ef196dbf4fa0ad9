//! A deliberately small model/optimizer pair exercising the full capability
//! surface, used by the binary's smoke run. It fits the mean of a Gaussian
//! with a two-term loss: squared reconstruction error plus an annealed
//! quadratic penalty pulling the mean toward zero early in training.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::model::{Mode, Model, ModelErr};

/// Plain SGD over the single parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToySgd {
    pub lr: f32,
}

impl ToySgd {
    pub fn new(lr: f32) -> Self {
        Self { lr }
    }

    #[inline]
    fn apply(&self, param: &mut f32, grad: f32) {
        *param -= self.lr * grad;
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ToyState {
    mu: f32,
    optimizer: ToySgd,
}

/// One-parameter Gaussian-mean model.
#[derive(Debug)]
pub struct ToyModel {
    mu: f32,
    mode: Mode,
}

impl ToyModel {
    pub fn new() -> Self {
        Self {
            mu: 0.0,
            mode: Mode::Train,
        }
    }

    #[inline]
    pub fn mu(&self) -> f32 {
        self.mu
    }
}

impl Default for ToyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for ToyModel {
    type Batch = Vec<f32>;
    type Artifact = Vec<u8>;
    type State = Vec<u8>;
    type Opt = ToySgd;

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn step(
        &mut self,
        batch: &Vec<f32>,
        coefficient: f64,
        opt: &mut ToySgd,
        clip_gradients: bool,
    ) -> Result<f64, ModelErr> {
        if self.mode != Mode::Train {
            return Err(ModelErr::WrongMode {
                expected: Mode::Train,
                got: self.mode,
            });
        }

        let n = batch.len() as f32;
        let mean = batch.iter().sum::<f32>() / n;
        let recon = batch.iter().map(|x| (x - self.mu).powi(2)).sum::<f32>() / n;
        let penalty = coefficient as f32 * self.mu * self.mu;
        let loss = recon + penalty;
        if !loss.is_finite() {
            return Err(ModelErr::Diverged { loss: f64::from(loss) });
        }

        let mut grad = 2.0 * (self.mu - mean) + 2.0 * coefficient as f32 * self.mu;
        if clip_gradients {
            grad = grad.clamp(-1.0, 1.0);
        }
        opt.apply(&mut self.mu, grad);

        // the loss is a negated lower bound
        Ok(f64::from(-loss))
    }

    fn sample_conditioned(&mut self, batch: &Vec<f32>) -> Result<(Vec<u8>, Vec<u8>), ModelErr> {
        if self.mode != Mode::Eval {
            return Err(ModelErr::WrongMode {
                expected: Mode::Eval,
                got: self.mode,
            });
        }

        let inputs: Vec<u8> = batch.iter().flat_map(|x| x.to_le_bytes()).collect();
        // deterministic spread around the fitted mean
        let samples: Vec<u8> = (0..batch.len())
            .map(|i| self.mu + 0.1 * (i as f32 / batch.len() as f32 - 0.5))
            .flat_map(|x| x.to_le_bytes())
            .collect();
        Ok((inputs, samples))
    }

    fn save(&self, opt: &ToySgd) -> Result<Vec<u8>, ModelErr> {
        let state = ToyState {
            mu: self.mu,
            optimizer: opt.clone(),
        };
        serde_json::to_vec(&state).map_err(|e| ModelErr::InvalidState(e.to_string()))
    }

    fn load_state(&mut self, state: Vec<u8>) -> Result<(), ModelErr> {
        let state: ToyState =
            serde_json::from_slice(&state).map_err(|e| ModelErr::InvalidState(e.to_string()))?;
        // parameters only, the serialized optimizer is dropped
        self.mu = state.mu;
        Ok(())
    }
}

/// Draws `n` observations around a fixed mean for the smoke run's dataset.
pub fn synthetic_samples(n: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| 0.7 + rng.random_range(-0.3..0.3)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_pull_the_mean_toward_the_data() {
        let mut model = ToyModel::new();
        let mut opt = ToySgd::new(0.1);
        let batch = vec![1.0f32; 8];

        let mut prev_gap = (1.0 - model.mu()).abs();
        for _ in 0..50 {
            model.step(&batch, 0.0, &mut opt, true).unwrap();
            let gap = (1.0 - model.mu()).abs();
            assert!(gap <= prev_gap);
            prev_gap = gap;
        }
        assert!(prev_gap < 0.05);
    }

    #[test]
    fn penalty_term_scales_with_the_coefficient() {
        let mut model = ToyModel::new();
        let mut opt = ToySgd::new(0.0); // no parameter movement, isolate the loss
        let batch = vec![0.0f32; 4];
        model.mu = 1.0;

        let heavy = model.step(&batch, 1.0, &mut opt, true).unwrap();
        let light = model.step(&batch, 0.25, &mut opt, true).unwrap();
        // recon is 1.0 in both; the annealed penalty adds 1.0 vs 0.25
        assert_eq!(heavy, -2.0);
        assert_eq!(light, -1.25);
    }

    #[test]
    fn stepping_in_eval_mode_is_rejected() {
        let mut model = ToyModel::new();
        model.set_mode(Mode::Eval);
        let err = model
            .step(&vec![0.0], 1.0, &mut ToySgd::new(0.1), true)
            .unwrap_err();
        assert!(matches!(
            err,
            ModelErr::WrongMode {
                expected: Mode::Train,
                got: Mode::Eval
            }
        ));
    }

    #[test]
    fn sampling_requires_eval_mode() {
        let mut model = ToyModel::new();
        assert!(model.sample_conditioned(&vec![0.0]).is_err());

        model.set_mode(Mode::Eval);
        let (inputs, samples) = model.sample_conditioned(&vec![0.5, 0.5]).unwrap();
        assert_eq!(inputs.len(), 8);
        assert_eq!(samples.len(), 8);
    }

    #[test]
    fn save_then_load_restores_parameters_only() {
        let mut model = ToyModel::new();
        model.mu = 0.42;
        let blob = model.save(&ToySgd::new(0.05)).unwrap();

        let mut fresh = ToyModel::new();
        fresh.load_state(blob).unwrap();
        assert_eq!(fresh.mu(), 0.42);
    }

    #[test]
    fn garbage_blob_fails_to_load() {
        let mut model = ToyModel::new();
        let err = model.load_state(b"not json".to_vec()).unwrap_err();
        assert!(matches!(err, ModelErr::InvalidState(_)));
    }

    #[test]
    fn synthetic_samples_are_seed_deterministic() {
        assert_eq!(synthetic_samples(16, 3), synthetic_samples(16, 3));
        assert_eq!(synthetic_samples(16, 3).len(), 16);
    }
}
