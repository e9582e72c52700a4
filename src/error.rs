//! Error types
//!
//! Only configuration and controller misuse are errors. Collisions, bound
//! hits and obstacle recycling are ordinary simulation events.

use thiserror::Error;

use crate::sim::GamePhase;

#[derive(Debug, Error)]
pub enum GameError {
    /// The gap would leave no room for the segments (empty draw range)
    #[error("gap size {gap} must be smaller than the play area height {height}")]
    GapTooLarge { gap: f32, height: f32 },

    /// More than one pair could cross the midline in a single tick
    #[error("pair spacing {spacing} must exceed the per-tick obstacle speed {speed}")]
    SpacingTooTight { spacing: f32, speed: f32 },

    #[error("setting `{name}` has invalid value {value}")]
    InvalidSetting { name: &'static str, value: f32 },

    #[error("cannot {action} while in phase {phase:?}")]
    InvalidTransition {
        phase: GamePhase,
        action: &'static str,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
}
