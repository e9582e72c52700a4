//! Headless collaborators for native runs and tests

use std::collections::BTreeSet;

use super::{Entity, Layout, Stage};
use crate::settings::LayoutSettings;
use crate::sim::geometry::Size;

/// Layout with fixed geometry taken from settings
#[derive(Debug, Clone)]
pub struct FixedLayout {
    pub play_area: Size,
    pub obstacle_width: f32,
    pub avatar_size: Size,
    pub avatar_left: f32,
}

impl FixedLayout {
    pub fn from_settings(layout: &LayoutSettings) -> Self {
        Self {
            play_area: Size::new(layout.play_width, layout.play_height),
            obstacle_width: layout.obstacle_width,
            avatar_size: Size::new(layout.avatar_width, layout.avatar_height),
            avatar_left: layout.avatar_left,
        }
    }
}

impl Default for FixedLayout {
    fn default() -> Self {
        Self::from_settings(&LayoutSettings::default())
    }
}

impl Layout for FixedLayout {
    fn play_area(&self) -> Size {
        self.play_area
    }

    fn obstacle_width(&self, _index: usize) -> f32 {
        self.obstacle_width
    }

    fn avatar_size(&self) -> Size {
        self.avatar_size
    }

    fn avatar_left(&self) -> f32 {
        self.avatar_left
    }
}

/// Stage that remembers what is on screen instead of drawing it
#[derive(Debug, Clone, Default)]
pub struct RecordingStage {
    pub mounted: BTreeSet<Entity>,
    pub score: Option<i64>,
    pub high_score: Option<i64>,
    /// Number of score display refreshes
    pub score_updates: usize,
}

impl RecordingStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self, entity: Entity) -> bool {
        self.mounted.contains(&entity)
    }
}

impl Stage for RecordingStage {
    fn mount(&mut self, entity: Entity) {
        if !self.mounted.insert(entity) {
            log::warn!("{:?} mounted twice", entity);
        }
    }

    fn unmount(&mut self, entity: Entity) {
        if !self.mounted.remove(&entity) {
            log::warn!("{:?} unmounted while not on stage", entity);
        }
    }

    fn show_score(&mut self, points: i64) {
        self.score = Some(points);
        self.score_updates += 1;
    }

    fn show_high_score(&mut self, points: i64) {
        self.high_score = Some(points);
    }
}
