//! Demo steering for headless runs
//!
//! Holds the input while the avatar sits below the centre of the next gap.

use std::cmp::Ordering;

use crate::platform::Layout;
use crate::sim::{ObstaclePair, Run};

/// First pair whose right edge is not yet behind the avatar
pub fn next_pair<'a, L: Layout + ?Sized>(run: &'a Run, layout: &L) -> Option<&'a ObstaclePair> {
    let avatar_left = layout.avatar_left();
    run.obstacles
        .pairs()
        .iter()
        .filter(|pair| pair.x() + pair.width() >= avatar_left)
        .min_by(|a, b| a.x().partial_cmp(&b.x()).unwrap_or(Ordering::Equal))
}

/// Input to feed the avatar this tick
pub fn steer<L: Layout + ?Sized>(run: &Run, layout: &L) -> bool {
    let Some(pair) = next_pair(run, layout) else {
        return false;
    };

    // Screen space: larger y is lower
    let gap_center = pair.top_height() + pair.gap() / 2.0;
    run.avatar_bounds(layout).center().y > gap_center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FixedLayout;
    use crate::settings::Settings;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn run() -> (Run, FixedLayout) {
        let settings = Settings::default();
        let layout = FixedLayout::from_settings(&settings.layout);
        let mut rng = Pcg32::seed_from_u64(42);
        let run = Run::new(&settings, &layout, &mut rng).unwrap();
        (run, layout)
    }

    #[test]
    fn test_skips_pairs_behind_avatar() {
        let (mut run, layout) = run();
        run.obstacles.pairs_mut()[0].set_x(-100.0);
        run.obstacles.pairs_mut()[2].set_x(300.0);
        let next = next_pair(&run, &layout).unwrap();
        assert_eq!(next.x(), 300.0);
    }

    #[test]
    fn test_rises_toward_higher_gap() {
        let (mut run, layout) = run();
        // Avatar centre at y = 600 - 275 - 22 = 303; gap centre at 100
        run.obstacles.pairs_mut()[0].set_x(300.0);
        run.obstacles.pairs_mut()[0].set_top_height(0.0);
        assert!(steer(&run, &layout));
    }

    #[test]
    fn test_falls_toward_lower_gap() {
        let (mut run, layout) = run();
        // Gap centre at 500
        run.obstacles.pairs_mut()[0].set_x(300.0);
        run.obstacles.pairs_mut()[0].set_top_height(400.0);
        assert!(!steer(&run, &layout));
    }
}
