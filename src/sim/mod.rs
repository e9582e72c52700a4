//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (pairs in set order)
//! - No DOM or platform dependencies beyond the `platform` traits

pub mod avatar;
pub mod collision;
pub mod geometry;
pub mod obstacle;
pub mod score;
pub mod state;
pub mod tick;

pub use avatar::Avatar;
pub use collision::{Tolerance, collides, overlaps};
pub use geometry::{Rect, Size};
pub use obstacle::{ObstaclePair, ObstacleSet};
pub use score::ScoreCounter;
pub use state::{Game, GamePhase, Run};
pub use tick::{TickOutcome, check_collision, tick};
