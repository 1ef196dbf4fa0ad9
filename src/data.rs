use std::num::NonZeroUsize;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// A finite, re-iterable sequence of batches.
///
/// `reset` begins a fresh traversal; the training stream reshuffles on every
/// reset while the held-out stream keeps a fixed order. A traversal ends
/// when `next_batch` returns `None`.
pub trait BatchStream {
    type Batch;

    fn reset(&mut self);

    fn next_batch(&mut self) -> Option<&Self::Batch>;

    /// Number of batches a full traversal yields.
    fn batches_per_epoch(&self) -> usize;
}

/// Groups `samples` into whole batches of `batch_size`, dropping the trailing
/// partial batch.
pub fn batchify<S: Clone>(samples: &[S], batch_size: NonZeroUsize) -> Vec<Vec<S>> {
    samples
        .chunks_exact(batch_size.get())
        .map(<[S]>::to_vec)
        .collect()
}

/// Batch stream over pre-built in-memory batches.
#[derive(Debug)]
pub struct InMemoryBatches<B> {
    batches: Vec<B>,
    order: Vec<usize>,
    cursor: usize,
    /// Present on training streams; each reset reshuffles the order.
    rng: Option<StdRng>,
}

impl<B> InMemoryBatches<B> {
    /// Creates a stream that traverses the batches in the given order on
    /// every reset. Used for the held-out split.
    pub fn fixed(batches: Vec<B>) -> Self {
        let order = (0..batches.len()).collect();
        Self {
            batches,
            order,
            cursor: 0,
            rng: None,
        }
    }

    /// Creates a stream that reshuffles the traversal order on every reset.
    /// Used for the training split.
    pub fn shuffled(batches: Vec<B>, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            rng: Some(rng),
            ..Self::fixed(batches)
        }
    }
}

impl<B> BatchStream for InMemoryBatches<B> {
    type Batch = B;

    fn reset(&mut self) {
        self.cursor = 0;
        if let Some(rng) = &mut self.rng {
            self.order.shuffle(rng);
        }
    }

    fn next_batch(&mut self) -> Option<&B> {
        let idx = *self.order.get(self.cursor)?;
        self.cursor += 1;
        Some(&self.batches[idx])
    }

    fn batches_per_epoch(&self) -> usize {
        self.batches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn drain(stream: &mut InMemoryBatches<i32>) -> Vec<i32> {
        let mut out = Vec::new();
        while let Some(&b) = stream.next_batch() {
            out.push(b);
        }
        out
    }

    #[test]
    fn batchify_drops_trailing_partial_batch() {
        let samples: Vec<u8> = (0..10).collect();
        let batches = batchify(&samples, nz(4));
        assert_eq!(batches, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]]);
    }

    #[test]
    fn fixed_stream_keeps_order_across_resets() {
        let mut s = InMemoryBatches::fixed(vec![10, 20, 30]);
        s.reset();
        assert_eq!(drain(&mut s), vec![10, 20, 30]);
        s.reset();
        assert_eq!(drain(&mut s), vec![10, 20, 30]);
    }

    #[test]
    fn exhausted_stream_stays_empty_until_reset() {
        let mut s = InMemoryBatches::fixed(vec![1]);
        s.reset();
        assert_eq!(s.next_batch(), Some(&1));
        assert_eq!(s.next_batch(), None);
        assert_eq!(s.next_batch(), None);
        s.reset();
        assert_eq!(s.next_batch(), Some(&1));
    }

    #[test]
    fn shuffled_stream_is_a_permutation_every_epoch() {
        let mut s = InMemoryBatches::shuffled((0..50).collect(), Some(7));
        for _ in 0..5 {
            s.reset();
            let mut epoch = drain(&mut s);
            assert_eq!(epoch.len(), 50);
            epoch.sort_unstable();
            assert_eq!(epoch, (0..50).collect::<Vec<i32>>());
        }
    }

    #[test]
    fn same_seed_gives_same_traversals() {
        let mut a = InMemoryBatches::shuffled((0..20).collect(), Some(42));
        let mut b = InMemoryBatches::shuffled((0..20).collect(), Some(42));
        for _ in 0..3 {
            a.reset();
            b.reset();
            assert_eq!(drain(&mut a), drain(&mut b));
        }
    }
}
