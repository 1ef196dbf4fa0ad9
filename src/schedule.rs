use std::num::NonZeroUsize;

/// Defines on which epochs a periodic action fires.
///
/// Two independent instances exist per run, one for visualization and one
/// for checkpointing, so the two cadences may coincide or diverge freely.
#[derive(Debug, Clone, Copy)]
pub struct IntervalSchedule {
    every: NonZeroUsize,
}

impl IntervalSchedule {
    /// Creates a schedule firing every `interval` epochs. When `interval` is
    /// `None` the schedule fires once, at the final epoch of the run.
    pub fn new(interval: Option<NonZeroUsize>, total_epochs: NonZeroUsize) -> Self {
        Self {
            every: interval.unwrap_or(total_epochs),
        }
    }

    /// Returns true if the action fires on this 1-based epoch.
    #[inline]
    pub fn should_fire(&self, epoch: usize) -> bool {
        epoch % self.every.get() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn fires_on_multiples_of_interval() {
        let s = IntervalSchedule::new(Some(nz(3)), nz(10));
        let fired: Vec<usize> = (1..=10).filter(|&e| s.should_fire(e)).collect();
        assert_eq!(fired, vec![3, 6, 9]);
    }

    #[test]
    fn interval_one_fires_every_epoch() {
        let s = IntervalSchedule::new(Some(nz(1)), nz(5));
        assert!((1..=5).all(|e| s.should_fire(e)));
    }

    #[test]
    fn default_fires_only_at_completion() {
        let s = IntervalSchedule::new(None, nz(7));
        let fired: Vec<usize> = (1..=7).filter(|&e| s.should_fire(e)).collect();
        assert_eq!(fired, vec![7]);
    }
}
