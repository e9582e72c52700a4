//! Game settings and tuning
//!
//! Defaults mirror `consts`. Settings can be overridden from JSON; any field
//! left out keeps its default.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Fixed play-area geometry used when nothing is measured from a real surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub play_width: f32,
    pub play_height: f32,
    /// Rendered width of one obstacle pair
    pub obstacle_width: f32,
    /// Avatar's fixed distance from the left edge
    pub avatar_left: f32,
    pub avatar_width: f32,
    pub avatar_height: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            play_width: 800.0,
            play_height: 600.0,
            obstacle_width: 80.0,
            avatar_left: 100.0,
            avatar_width: 60.0,
            avatar_height: 44.0,
        }
    }
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Obstacles ===
    pub gap_size: f32,
    pub pair_spacing: f32,
    pub obstacle_speed: f32,

    // === Avatar ===
    pub rise_rate: f32,
    pub fall_rate: f32,
    /// Play height minus this is the highest the avatar can go
    pub ceiling_margin: f32,

    // === Collision forgiveness ===
    pub trailing_tolerance: f32,
    pub vertical_tolerance: f32,

    // === Loop ===
    pub tick_period_ms: u32,

    pub layout: LayoutSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gap_size: GAP_SIZE,
            pair_spacing: PAIR_SPACING,
            obstacle_speed: OBSTACLE_SPEED,

            rise_rate: RISE_RATE,
            fall_rate: FALL_RATE,
            ceiling_margin: CEILING_MARGIN,

            trailing_tolerance: TRAILING_TOLERANCE,
            vertical_tolerance: VERTICAL_TOLERANCE,

            tick_period_ms: TICK_PERIOD_MS,

            layout: LayoutSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check tuning values that do not depend on the measured play area.
    ///
    /// The gap-vs-height check is repeated against the real surface when a
    /// run is built, since the play area may differ from `layout`.
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("gap_size", self.gap_size),
            ("pair_spacing", self.pair_spacing),
            ("obstacle_speed", self.obstacle_speed),
            ("rise_rate", self.rise_rate),
            ("fall_rate", self.fall_rate),
            ("play_width", self.layout.play_width),
            ("play_height", self.layout.play_height),
            ("obstacle_width", self.layout.obstacle_width),
            ("avatar_width", self.layout.avatar_width),
            ("avatar_height", self.layout.avatar_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(GameError::InvalidSetting { name, value });
            }
        }

        let non_negative = [
            ("ceiling_margin", self.ceiling_margin),
            ("trailing_tolerance", self.trailing_tolerance),
            ("vertical_tolerance", self.vertical_tolerance),
            ("avatar_left", self.layout.avatar_left),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(GameError::InvalidSetting { name, value });
            }
        }

        if self.tick_period_ms == 0 {
            return Err(GameError::InvalidSetting {
                name: "tick_period_ms",
                value: 0.0,
            });
        }

        if self.ceiling_margin >= self.layout.play_height {
            return Err(GameError::InvalidSetting {
                name: "ceiling_margin",
                value: self.ceiling_margin,
            });
        }

        // A recycled pair must land right of the left edge
        if self.pair_spacing * PAIR_COUNT as f32 <= self.layout.obstacle_width {
            return Err(GameError::InvalidSetting {
                name: "pair_spacing",
                value: self.pair_spacing,
            });
        }

        if self.pair_spacing <= self.obstacle_speed {
            return Err(GameError::SpacingTooTight {
                spacing: self.pair_spacing,
                speed: self.obstacle_speed,
            });
        }

        if self.gap_size >= self.layout.play_height {
            return Err(GameError::GapTooLarge {
                gap: self.gap_size,
                height: self.layout.play_height,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.gap_size, 200.0);
        assert_eq!(settings.pair_spacing, 400.0);
        assert_eq!(settings.tick_period_ms, 20);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "gap_size": 150, "layout": { "play_height": 500 } }"#)
            .expect("valid settings");
        assert_eq!(settings.gap_size, 150.0);
        assert_eq!(settings.layout.play_height, 500.0);
        assert_eq!(settings.layout.play_width, 800.0);
        assert_eq!(settings.rise_rate, RISE_RATE);
    }

    #[test]
    fn test_gap_as_tall_as_play_area_is_rejected() {
        let result = Settings::from_json(r#"{ "gap_size": 600 }"#);
        assert!(matches!(result, Err(GameError::GapTooLarge { .. })));
    }

    #[test]
    fn test_spacing_not_above_speed_is_rejected() {
        let mut settings = Settings::default();
        settings.pair_spacing = 2.0;
        settings.layout.obstacle_width = 1.0;
        assert!(matches!(
            settings.validate(),
            Err(GameError::SpacingTooTight { .. })
        ));
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let mut settings = Settings::default();
        settings.fall_rate = -5.0;
        assert!(matches!(
            settings.validate(),
            Err(GameError::InvalidSetting { name: "fall_rate", .. })
        ));
    }

    #[test]
    fn test_ceiling_margin_at_play_height_is_rejected() {
        let mut settings = Settings::default();
        settings.ceiling_margin = settings.layout.play_height;
        assert!(matches!(
            settings.validate(),
            Err(GameError::InvalidSetting { name: "ceiling_margin", .. })
        ));
    }

    #[test]
    fn test_recycle_point_left_of_play_area_is_rejected() {
        let mut settings = Settings::default();
        // 4 * 20 == 80: a recycled pair would land at x = 0
        settings.pair_spacing = 20.0;
        settings.layout.obstacle_width = 80.0;
        assert!(matches!(
            settings.validate(),
            Err(GameError::InvalidSetting { name: "pair_spacing", .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        let result = Settings::from_json("{ gap_size: ");
        assert!(matches!(result, Err(GameError::Json(_))));
    }
}
