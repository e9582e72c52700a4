//! Session high score
//!
//! Kept in memory only; a page reload starts again from zero.

use serde::{Deserialize, Serialize};

use crate::sim::ScoreCounter;

/// Best run of the session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: ScoreCounter,
}

impl HighScore {
    pub fn new() -> Self {
        Self {
            best: ScoreCounter::new(),
        }
    }

    pub fn points(&self) -> i64 {
        self.best.points()
    }

    /// A run only counts when it strictly beats the current best
    pub fn qualifies(&self, points: i64) -> bool {
        points > self.best.points()
    }

    /// Replace the best with `run` if it qualifies.
    /// Returns true when the high score changed.
    pub fn fold(&mut self, run: &ScoreCounter) -> bool {
        if !self.qualifies(run.points()) {
            return false;
        }

        let previous = self.best.points();
        self.best = ScoreCounter::new();
        self.best.increment(run.points());
        log::info!("New high score: {} (was {})", self.best.points(), previous);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(points: i64) -> ScoreCounter {
        let mut score = ScoreCounter::new();
        score.increment(points);
        score
    }

    #[test]
    fn test_starts_at_zero() {
        let high = HighScore::new();
        assert_eq!(high.points(), 0);
        assert!(!high.qualifies(0));
    }

    #[test]
    fn test_fold_replaces_not_adds() {
        let mut high = HighScore::new();
        assert!(high.fold(&run_with(3)));
        assert!(high.fold(&run_with(5)));
        assert_eq!(high.points(), 5);
    }

    #[test]
    fn test_equal_or_lower_run_ignored() {
        let mut high = HighScore::new();
        high.fold(&run_with(4));
        assert!(!high.fold(&run_with(4)));
        assert!(!high.fold(&run_with(1)));
        assert_eq!(high.points(), 4);
    }
}
