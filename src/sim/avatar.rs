//! The player's bird

use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Size};

/// The player-controlled avatar.
///
/// Moves a fixed amount per tick depending only on the current input. There
/// is no velocity: releasing the input switches straight from climbing to
/// falling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Height above the floor (bottom edge of the avatar)
    y: f32,
    /// Input signal, true while the player holds a key
    rising: bool,
    /// Highest allowed `y`
    max_height: f32,
    rise_rate: f32,
    fall_rate: f32,
}

impl Avatar {
    /// Create an avatar halfway up its allowed range
    pub fn new(max_height: f32, rise_rate: f32, fall_rate: f32) -> Self {
        Self {
            y: max_height / 2.0,
            rising: false,
            max_height,
            rise_rate,
            fall_rate,
        }
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Place the avatar, clamped to `[0, max_height]`
    #[cfg(test)]
    pub(crate) fn set_y(&mut self, y: f32) {
        self.y = y.clamp(0.0, self.max_height);
    }

    #[inline]
    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    #[inline]
    pub fn is_rising(&self) -> bool {
        self.rising
    }

    /// Input port: press sets, release clears
    pub fn set_rising(&mut self, rising: bool) {
        self.rising = rising;
    }

    /// Advance one tick
    pub fn step(&mut self) {
        let next = if self.rising {
            self.y + self.rise_rate
        } else {
            self.y - self.fall_rate
        };

        self.y = if next < 0.0 {
            0.0
        } else if next >= self.max_height {
            self.max_height
        } else {
            next
        };
    }

    /// Bounding box in play-area space (`y` counts up from the floor)
    pub fn bounds(&self, left: f32, size: Size, play_height: f32) -> Rect {
        let top = play_height - self.y - size.height;
        Rect::new(left, top, size.width, size.height)
    }
}
