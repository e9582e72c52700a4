//! Collision detection between the avatar and obstacle segments
//!
//! Plain box overlap, with a little forgiveness on the avatar's right and
//! bottom edges so that grazing an obstacle does not end the run.

use super::geometry::Rect;
use crate::consts::{TRAILING_TOLERANCE, VERTICAL_TOLERANCE};

/// Forgiveness applied to the first box of a collision test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Pulled in from the right edge
    pub trailing: f32,
    /// Pulled in from the bottom edge
    pub vertical: f32,
}

impl Tolerance {
    /// Exact overlap (edges touching counts as a hit)
    pub const NONE: Tolerance = Tolerance {
        trailing: 0.0,
        vertical: 0.0,
    };
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            trailing: TRAILING_TOLERANCE,
            vertical: VERTICAL_TOLERANCE,
        }
    }
}

/// Check whether `a` (the avatar) hits `b` (an obstacle segment).
///
/// The tolerance only shrinks `a`, so the test is asymmetric unless
/// `tolerance` is [`Tolerance::NONE`].
pub fn collides(a: &Rect, b: &Rect, tolerance: Tolerance) -> bool {
    let horizontal = a.right() - tolerance.trailing >= b.left() && b.right() >= a.left();
    let vertical = a.bottom() - tolerance.vertical >= b.top() && b.bottom() >= a.top();
    horizontal && vertical
}

/// Symmetric overlap test (touching edges overlap)
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    collides(a, b, Tolerance::NONE)
}
