//! Fixed-period simulation tick
//!
//! One tick = avatar step, obstacle step (which may score), collision check.
//! A collision stops the run before the next tick can fire.

use super::collision::{Tolerance, collides};
use super::state::{Game, GamePhase, Run};
use crate::platform::{Layout, Stage};

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing was simulated
    Idle,
    /// Simulated, no collision
    Continue,
    /// Avatar hit obstacle pair `pair`; the run is now stopped
    Collided { pair: usize },
}

/// Advance the game by one tick
pub fn tick<L, S>(game: &mut Game, layout: &L, stage: &mut S) -> TickOutcome
where
    L: Layout + ?Sized,
    S: Stage + ?Sized,
{
    if game.phase != GamePhase::Playing {
        return TickOutcome::Idle;
    }

    let tolerance = game.tolerance();
    let Some(run) = game.run.as_mut() else {
        return TickOutcome::Idle;
    };

    run.ticks += 1;
    run.avatar.step();

    let score = &mut run.score;
    run.obstacles.step(layout, &mut game.rng, |delta| {
        let total = score.increment(delta);
        stage.show_score(total);
    });

    if let Some(pair) = check_collision(run, layout, tolerance) {
        log::info!("Avatar hit pair {} at tick {}", pair, run.ticks);
        game.stop();
        return TickOutcome::Collided { pair };
    }

    TickOutcome::Continue
}

/// Index of the first obstacle pair the avatar touches, if any.
/// Bottom segment is checked before the top one.
pub fn check_collision<L: Layout + ?Sized>(
    run: &Run,
    layout: &L,
    tolerance: Tolerance,
) -> Option<usize> {
    let avatar = run.avatar_bounds(layout);
    run.obstacles.pairs().iter().position(|pair| {
        collides(&avatar, &pair.bottom_bounds(), tolerance)
            || collides(&avatar, &pair.top_bounds(), tolerance)
    })
}
