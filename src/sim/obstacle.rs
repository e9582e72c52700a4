//! Obstacle pairs and the rolling set that scrolls them
//!
//! A pair is a top and a bottom segment separated by a gap. The set keeps
//! `PAIR_COUNT` pairs alive, moves them left every tick and sends each pair
//! that leaves the play area back to the right with a new gap.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Size};
use crate::consts::{PAIR_COUNT, POINTS_PER_PAIR};
use crate::error::GameError;
use crate::platform::Layout;

/// One gapped obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Left edge
    x: f32,
    /// Last rendered width read from the layout
    width: f32,
    gap: f32,
    top_height: f32,
    bottom_height: f32,
    play_height: f32,
}

impl ObstaclePair {
    /// Create a pair at `x` with a random gap position
    pub fn new<R: Rng + ?Sized>(
        x: f32,
        width: f32,
        gap: f32,
        play_height: f32,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if !(gap < play_height) {
            return Err(GameError::GapTooLarge {
                gap,
                height: play_height,
            });
        }

        let mut pair = Self {
            x,
            width,
            gap,
            top_height: 0.0,
            bottom_height: 0.0,
            play_height,
        };
        pair.regap(rng);
        Ok(pair)
    }

    /// Draw a new gap position. The segments always fill the play height.
    pub fn regap<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let span = self.play_height - self.gap;
        self.top_height = rng.random_range(0.0..span);
        self.bottom_height = self.play_height - self.gap - self.top_height;
    }

    /// Place the gap so the top segment is `top` tall, clamped to the
    /// drawable range
    #[cfg(test)]
    pub(crate) fn set_top_height(&mut self, top: f32) {
        self.top_height = top.clamp(0.0, self.play_height - self.gap);
        self.bottom_height = self.play_height - self.gap - self.top_height;
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn gap(&self) -> f32 {
        self.gap
    }

    #[inline]
    pub fn top_height(&self) -> f32 {
        self.top_height
    }

    #[inline]
    pub fn bottom_height(&self) -> f32 {
        self.bottom_height
    }

    /// Fully past the left edge of the play area
    #[inline]
    pub fn has_exited(&self) -> bool {
        self.x + self.width < 0.0
    }

    /// Top segment, hanging from the ceiling
    pub fn top_bounds(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top_height)
    }

    /// Bottom segment, resting on the floor
    pub fn bottom_bounds(&self) -> Rect {
        Rect::new(
            self.x,
            self.play_height - self.bottom_height,
            self.width,
            self.bottom_height,
        )
    }
}

/// The rolling window of obstacle pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSet {
    pairs: Vec<ObstaclePair>,
    spacing: f32,
    speed: f32,
}

impl ObstacleSet {
    /// Stagger `PAIR_COUNT` pairs to the right of the visible area, `spacing`
    /// apart.
    ///
    /// Fails when the gap leaves no room for segments or when more than one
    /// pair could cross the midline in one tick.
    pub fn new<L: Layout + ?Sized, R: Rng + ?Sized>(
        gap: f32,
        spacing: f32,
        speed: f32,
        layout: &L,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if !(spacing > speed) {
            return Err(GameError::SpacingTooTight { spacing, speed });
        }

        let Size { width, height } = layout.play_area();
        let pairs = (0..PAIR_COUNT)
            .map(|i| {
                let x = width + spacing * i as f32;
                ObstaclePair::new(x, layout.obstacle_width(i), gap, height, rng)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            pairs,
            spacing,
            speed,
        })
    }

    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    pub fn pairs_mut(&mut self) -> &mut [ObstaclePair] {
        &mut self.pairs
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Move every pair one tick to the left.
    ///
    /// Pairs that left the play area are regapped and moved to
    /// `spacing * PAIR_COUNT - width`. That only keeps spacing even when
    /// every pair has the same width. `on_score` gets `POINTS_PER_PAIR` for
    /// each pair whose left edge crossed the midline this tick.
    pub fn step<L, R, F>(&mut self, layout: &L, rng: &mut R, mut on_score: F)
    where
        L: Layout + ?Sized,
        R: Rng + ?Sized,
        F: FnMut(i64),
    {
        let mid = layout.play_area().width / 2.0;
        let back = self.spacing * self.pairs.len() as f32;

        for (index, pair) in self.pairs.iter_mut().enumerate() {
            pair.x -= self.speed;
            pair.width = layout.obstacle_width(index);

            if pair.has_exited() {
                pair.regap(rng);
                pair.x = back - pair.width;
                log::debug!(
                    "Pair {} recycled to x={} (top={:.1}, bottom={:.1})",
                    index,
                    pair.x,
                    pair.top_height,
                    pair.bottom_height
                );
            }

            if pair.x + self.speed >= mid && pair.x < mid {
                log::debug!("Pair {} crossed the midline", index);
                on_score(POINTS_PER_PAIR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GAP_SIZE, OBSTACLE_SPEED, PAIR_SPACING};
    use crate::platform::FixedLayout;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn layout(width: f32, height: f32, obstacle_width: f32) -> FixedLayout {
        FixedLayout {
            play_area: Size::new(width, height),
            obstacle_width,
            ..FixedLayout::default()
        }
    }

    fn assert_fills_height(pair: &ObstaclePair, height: f32) {
        let total = pair.top_height() + pair.gap() + pair.bottom_height();
        assert!((total - height).abs() < 1e-3, "total {total} != {height}");
        assert!(pair.top_height() >= 0.0);
        assert!(pair.bottom_height() >= 0.0);
    }

    #[test]
    fn test_regap_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pair = ObstaclePair::new(0.0, 80.0, 200.0, 500.0, &mut rng).unwrap();
        for _ in 0..1000 {
            pair.regap(&mut rng);
            assert!(pair.top_height() >= 0.0 && pair.top_height() < 300.0);
            assert_eq!(pair.bottom_height(), 300.0 - pair.top_height());
            assert_fills_height(&pair, 500.0);
        }
    }

    #[test]
    fn test_gap_as_tall_as_play_area_fails() {
        let mut rng = Pcg32::seed_from_u64(1);
        let result = ObstaclePair::new(0.0, 80.0, 500.0, 500.0, &mut rng);
        assert!(matches!(result, Err(GameError::GapTooLarge { .. })));
    }

    #[test]
    fn test_segment_bounds() {
        let mut rng = Pcg32::seed_from_u64(3);
        let pair = ObstaclePair::new(40.0, 80.0, 200.0, 600.0, &mut rng).unwrap();
        let top = pair.top_bounds();
        let bottom = pair.bottom_bounds();
        assert_eq!(top.top(), 0.0);
        assert_eq!(top.left(), 40.0);
        assert!((bottom.bottom() - 600.0).abs() < 1e-3);
        assert!((bottom.top() - top.bottom() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_set_top_height_keeps_segments_filled() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pair = ObstaclePair::new(0.0, 80.0, 200.0, 600.0, &mut rng).unwrap();
        pair.set_top_height(100.0);
        assert_eq!(pair.bottom_height(), 300.0);
        pair.set_top_height(1000.0);
        assert_eq!(pair.top_height(), 400.0);
        assert_eq!(pair.bottom_height(), 0.0);
    }

    #[test]
    fn test_exit_threshold() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pair = ObstaclePair::new(-5.0, 10.0, 200.0, 600.0, &mut rng).unwrap();
        assert!(!pair.has_exited());
        pair.set_x(-11.0);
        assert!(pair.has_exited());
    }

    #[test]
    fn test_initial_stagger() {
        let mut rng = Pcg32::seed_from_u64(11);
        let layout = layout(800.0, 600.0, 80.0);
        let set = ObstacleSet::new(GAP_SIZE, PAIR_SPACING, OBSTACLE_SPEED, &layout, &mut rng)
            .unwrap();
        let xs: Vec<f32> = set.pairs().iter().map(|p| p.x()).collect();
        assert_eq!(xs, vec![800.0, 1200.0, 1600.0, 2000.0]);
    }

    #[test]
    fn test_spacing_not_above_speed_fails() {
        let mut rng = Pcg32::seed_from_u64(11);
        let layout = layout(800.0, 600.0, 80.0);
        let result = ObstacleSet::new(GAP_SIZE, 2.5, 2.5, &layout, &mut rng);
        assert!(matches!(result, Err(GameError::SpacingTooTight { .. })));
    }

    #[test]
    fn test_step_moves_pairs_left() {
        let mut rng = Pcg32::seed_from_u64(11);
        let layout = layout(800.0, 600.0, 80.0);
        let mut set =
            ObstacleSet::new(GAP_SIZE, PAIR_SPACING, OBSTACLE_SPEED, &layout, &mut rng).unwrap();
        set.step(&layout, &mut rng, |_| panic!("no pair is near the midline"));
        let xs: Vec<f32> = set.pairs().iter().map(|p| p.x()).collect();
        assert_eq!(xs, vec![797.5, 1197.5, 1597.5, 1997.5]);
    }

    #[test]
    fn test_recycle_only_past_left_edge() {
        let mut rng = Pcg32::seed_from_u64(13);
        let layout = layout(500.0, 600.0, 10.0);
        let mut set =
            ObstacleSet::new(GAP_SIZE, PAIR_SPACING, OBSTACLE_SPEED, &layout, &mut rng).unwrap();

        // Lands on x = -5: still partly visible
        set.pairs_mut()[0].set_x(-2.5);
        let before = set.pairs()[0].top_height();
        set.step(&layout, &mut rng, |_| {});
        assert_eq!(set.pairs()[0].x(), -5.0);
        assert_eq!(set.pairs()[0].top_height(), before);

        // Lands on x = -11: gone, goes to the back
        set.pairs_mut()[0].set_x(-8.5);
        set.step(&layout, &mut rng, |_| {});
        assert_eq!(set.pairs()[0].x(), PAIR_SPACING * PAIR_COUNT as f32 - 10.0);
        assert!(set.pairs()[0].x() > 0.0);
    }

    #[test]
    fn test_recycle_draws_new_gap() {
        let mut rng = Pcg32::seed_from_u64(17);
        let layout = layout(500.0, 600.0, 80.0);
        let mut set =
            ObstacleSet::new(GAP_SIZE, PAIR_SPACING, OBSTACLE_SPEED, &layout, &mut rng).unwrap();

        let mut changed = false;
        for _ in 0..20 {
            let before = set.pairs()[0].top_height();
            set.pairs_mut()[0].set_x(-80.0);
            set.step(&layout, &mut rng, |_| {});
            assert_fills_height(&set.pairs()[0], 600.0);
            changed |= set.pairs()[0].top_height() != before;
        }
        assert!(changed);
    }

    #[test]
    fn test_midline_crossing_scores_once() {
        let mut rng = Pcg32::seed_from_u64(19);
        let layout = layout(500.0, 600.0, 80.0);
        let mut set =
            ObstacleSet::new(GAP_SIZE, PAIR_SPACING, OBSTACLE_SPEED, &layout, &mut rng).unwrap();

        // Lands on x = 248 with mid = 250
        set.pairs_mut()[0].set_x(250.5);
        let mut events = Vec::new();
        set.step(&layout, &mut rng, |delta| events.push(delta));
        assert_eq!(set.pairs()[0].x(), 248.0);
        assert_eq!(events, vec![1]);

        // Already past the midline: no repeat
        events.clear();
        set.step(&layout, &mut rng, |delta| events.push(delta));
        assert!(events.is_empty());
    }

    #[test]
    fn test_steady_state_one_point_per_pair() {
        let mut rng = Pcg32::seed_from_u64(23);
        let layout = layout(800.0, 600.0, 80.0);
        let mut set =
            ObstacleSet::new(GAP_SIZE, PAIR_SPACING, OBSTACLE_SPEED, &layout, &mut rng).unwrap();

        // 400 / 2.5 ticks between consecutive pairs reaching the midline
        let mut points = 0;
        let mut max_per_tick = 0;
        let ticks_to_first = ((800.0 - 400.0) / OBSTACLE_SPEED) as usize;
        for _ in 0..ticks_to_first + 160 * 12 {
            let mut this_tick = 0;
            set.step(&layout, &mut rng, |delta| this_tick += delta);
            points += this_tick;
            max_per_tick = max_per_tick.max(this_tick);
        }
        assert_eq!(max_per_tick, 1);
        assert!(points >= 10, "only {points} points");
    }

    proptest! {
        #[test]
        fn prop_regap_fills_height(seed in any::<u64>(), height in 50.0f32..2000.0, ratio in 0.0f32..0.95) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let gap = height * ratio;
            let mut pair = ObstaclePair::new(0.0, 80.0, gap, height, &mut rng).unwrap();
            pair.regap(&mut rng);
            let total = pair.top_height() + pair.gap() + pair.bottom_height();
            prop_assert!((total - height).abs() <= height * 1e-5);
            prop_assert!(pair.top_height() >= 0.0);
            prop_assert!(pair.bottom_height() >= 0.0);
        }
    }
}
