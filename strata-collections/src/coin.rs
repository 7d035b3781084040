//! Height policy for skip list towers.
//!
//! Every insert of a new key flips a coin until it comes up tails; each
//! heads promotes the key's tower one level higher. The coin is owned by the
//! skip list and passed in at construction, never taken from a process-wide
//! source, so tests can replay an exact flip sequence.

use rand_core::RngCore;

/// A source of independent promotion decisions.
pub trait Coin {
    /// Returns `true` if the tower being built should grow one more level.
    fn flip(&mut self) -> bool;
}

/// Any random number generator is a fair coin.
///
/// One bit of a fresh `u32` per flip, so each flip succeeds with
/// probability 1/2 independent of the previous ones.
impl<R: RngCore> Coin for R {
    #[inline]
    fn flip(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }
}

/// A scripted coin that replays a fixed sequence of flips.
///
/// Once the sequence is exhausted every further flip is `false`, so towers
/// stop growing.
///
/// # Example
///
/// ```
/// use strata_collections::{Coin, FlipSequence};
///
/// let mut coin = FlipSequence::new([true, true, false]);
/// assert!(coin.flip());
/// assert!(coin.flip());
/// assert!(!coin.flip());
/// assert!(!coin.flip());
/// assert_eq!(coin.consumed(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct FlipSequence {
    flips: Vec<bool>,
    pos: usize,
}

impl FlipSequence {
    /// Creates a coin that yields `flips` in order.
    pub fn new(flips: impl IntoIterator<Item = bool>) -> Self {
        Self {
            flips: flips.into_iter().collect(),
            pos: 0,
        }
    }

    /// Creates a coin producing the given tower heights, in insertion order.
    ///
    /// A height of `h` is `h - 1` heads followed by one tails. Heights of 0
    /// are treated as 1.
    pub fn from_heights(heights: impl IntoIterator<Item = usize>) -> Self {
        let mut flips = Vec::new();
        for height in heights {
            flips.extend(core::iter::repeat_n(true, height.saturating_sub(1)));
            flips.push(false);
        }
        Self::new(flips)
    }

    /// Number of flips taken so far, including those past the end.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl Coin for FlipSequence {
    fn flip(&mut self) -> bool {
        let flip = self.flips.get(self.pos).copied().unwrap_or(false);
        self.pos += 1;
        flip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn rng_coin_is_roughly_fair() {
        let mut coin = SmallRng::seed_from_u64(12345);
        let heads = (0..10_000).filter(|_| coin.flip()).count();
        assert!((4_500..5_500).contains(&heads), "heads = {}", heads);
    }

    #[test]
    fn same_seed_same_flips() {
        let mut a = SmallRng::seed_from_u64(7);
        let mut b = SmallRng::seed_from_u64(7);
        for _ in 0..256 {
            assert_eq!(a.flip(), b.flip());
        }
    }

    #[test]
    fn heights_expand_to_flips() {
        let mut coin = FlipSequence::from_heights([3, 1, 2]);
        let flips: Vec<bool> = (0..6).map(|_| coin.flip()).collect();
        assert_eq!(flips, vec![true, true, false, false, true, false]);
    }

    #[test]
    fn zero_height_is_base_only() {
        let mut coin = FlipSequence::from_heights([0]);
        assert!(!coin.flip());
    }

    #[test]
    fn exhausted_sequence_stops_growth() {
        let mut coin = FlipSequence::new([]);
        assert!(!coin.flip());
        assert!(!coin.flip());
        assert_eq!(coin.consumed(), 2);
    }
}
