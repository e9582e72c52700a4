//! Platform abstraction layer
//!
//! The simulation never touches the DOM. It reads geometry through [`Layout`]
//! and announces visual lifecycle changes through [`Stage`]:
//! - Play-area and element sizes
//! - Mount/unmount of entity visuals
//! - Score and high-score displays

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{FixedLayout, RecordingStage};

use crate::sim::geometry::Size;

/// Something with a visual representation on the play surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    /// Title art and play button
    Menu,
    Avatar,
    /// Obstacle pair by index in its set
    Obstacle(usize),
    Score,
    HighScore,
    RestartButton,
}

/// Geometry as currently rendered by the presentation layer
pub trait Layout {
    /// Size of the visible play surface
    fn play_area(&self) -> Size;

    /// Rendered width of obstacle pair `index`
    fn obstacle_width(&self, index: usize) -> f32;

    /// Rendered size of the avatar
    fn avatar_size(&self) -> Size;

    /// Distance from the play area's left edge to the avatar
    fn avatar_left(&self) -> f32;
}

/// Visual side effects requested by the game controller
pub trait Stage {
    fn mount(&mut self, entity: Entity);

    fn unmount(&mut self, entity: Entity);

    /// Score display hook, called whenever the run score changes
    fn show_score(&mut self, points: i64);

    fn show_high_score(&mut self, points: i64);
}
