//! Score tally

use serde::{Deserialize, Serialize};

/// A running point tally.
///
/// Only grows through [`ScoreCounter::increment`]; the display hook lives on
/// the stage, which the controller refreshes after every change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCounter {
    points: i64,
}

impl ScoreCounter {
    pub fn new() -> Self {
        Self { points: 0 }
    }

    #[inline]
    pub fn points(&self) -> i64 {
        self.points
    }

    /// Add `delta` points and return the new total
    pub fn increment(&mut self, delta: i64) -> i64 {
        self.points += delta;
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_increment() {
        let mut score = ScoreCounter::new();
        assert_eq!(score.points(), 0);
        assert_eq!(score.increment(1), 1);
        assert_eq!(score.increment(4), 5);
    }

    #[test]
    fn test_negative_delta_allowed() {
        let mut score = ScoreCounter::new();
        score.increment(3);
        assert_eq!(score.increment(-2), 1);
    }

    proptest! {
        #[test]
        fn prop_non_negative_deltas_never_decrease(deltas in proptest::collection::vec(0i64..100, 0..50)) {
            let mut score = ScoreCounter::new();
            let mut last = score.points();
            for delta in deltas {
                let total = score.increment(delta);
                prop_assert!(total >= last);
                last = total;
            }
        }
    }
}
