//! Flappy Arcade - guide the bird through the gaps
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar, obstacles, collisions, run state)
//! - `platform`: Layout/stage ports the presentation layer implements
//! - `settings`: Data-driven game tuning
//! - `highscores`: Best run of the session (in memory only)
//! - `autopilot`: Simple steering policy for headless runs

pub mod autopilot;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use highscores::HighScore;
pub use settings::{LayoutSettings, Settings};

/// Game configuration constants
pub mod consts {
    /// Tick period in milliseconds (50 Hz)
    pub const TICK_PERIOD_MS: u32 = 20;

    /// Obstacle pairs alive at any time
    pub const PAIR_COUNT: usize = 4;
    /// Vertical opening between the top and bottom segment
    pub const GAP_SIZE: f32 = 200.0;
    /// Horizontal distance between consecutive pairs
    pub const PAIR_SPACING: f32 = 400.0;
    /// Horizontal obstacle travel per tick
    pub const OBSTACLE_SPEED: f32 = 2.5;

    /// Avatar climb per tick while input is held
    pub const RISE_RATE: f32 = 8.0;
    /// Avatar drop per tick while input is released
    pub const FALL_RATE: f32 = 5.0;
    /// Space kept free above the avatar's ceiling
    pub const CEILING_MARGIN: f32 = 50.0;

    /// Forgiveness on the avatar's trailing (right) edge
    pub const TRAILING_TOLERANCE: f32 = 10.0;
    /// Forgiveness on the avatar's bottom edge
    pub const VERTICAL_TOLERANCE: f32 = 1.0;

    /// Points awarded per midline crossing
    pub const POINTS_PER_PAIR: i64 = 1;
}
