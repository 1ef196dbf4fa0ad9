/// Decaying weight for the regularizing term of the two-term loss.
///
/// Starts at 1.0 so the regularizer dominates early training, then fades
/// geometrically: the coefficient is halved exactly once after every
/// completed epoch. After `n` epochs the value is `1.0 / 2^n` (powers of two
/// are exact in binary floating point). Owned by the run; read once per
/// batch, written only between epochs.
#[derive(Debug, Clone)]
pub struct AnnealingSchedule {
    coefficient: f64,
}

impl AnnealingSchedule {
    pub fn new() -> Self {
        Self { coefficient: 1.0 }
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.coefficient
    }

    /// Halves the coefficient. Total over all reachable states.
    #[inline]
    pub fn advance(&mut self) {
        self.coefficient *= 0.5;
    }
}

impl Default for AnnealingSchedule {
    fn default() -> Self {
        Self::new()
    }
}
