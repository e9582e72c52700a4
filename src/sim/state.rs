//! Game state and the run lifecycle
//!
//! `Menu -> Playing -> Stopped -> Playing (restart) -> ...`
//! Every start or restart builds a fresh [`Run`]; nothing carries over from
//! one run to the next except the high score.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::collision::Tolerance;
use super::geometry::Rect;
use super::obstacle::ObstacleSet;
use super::score::ScoreCounter;
use crate::consts::PAIR_COUNT;
use crate::error::GameError;
use crate::highscores::HighScore;
use crate::platform::{Entity, Layout, Stage};
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for "Play"
    Menu,
    /// Ticks are running
    Playing,
    /// Run ended on a collision; score frozen until restart
    Stopped,
}

/// Everything that belongs to a single attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub avatar: Avatar,
    pub obstacles: ObstacleSet,
    pub score: ScoreCounter,
    /// Ticks simulated in this run
    pub ticks: u64,
}

impl Run {
    pub fn new<L: Layout + ?Sized, R: Rng + ?Sized>(
        settings: &Settings,
        layout: &L,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let max_height = layout.play_area().height - settings.ceiling_margin;
        if !(max_height > 0.0) {
            return Err(GameError::InvalidSetting {
                name: "ceiling_margin",
                value: settings.ceiling_margin,
            });
        }

        let obstacles = ObstacleSet::new(
            settings.gap_size,
            settings.pair_spacing,
            settings.obstacle_speed,
            layout,
            rng,
        )?;

        Ok(Self {
            avatar: Avatar::new(max_height, settings.rise_rate, settings.fall_rate),
            obstacles,
            score: ScoreCounter::new(),
            ticks: 0,
        })
    }

    /// Avatar bounding box in play-area space
    pub fn avatar_bounds<L: Layout + ?Sized>(&self, layout: &L) -> Rect {
        self.avatar.bounds(
            layout.avatar_left(),
            layout.avatar_size(),
            layout.play_area().height,
        )
    }
}

/// The game controller: owns the current run and the session high score
#[derive(Debug, Clone)]
pub struct Game {
    pub settings: Settings,
    pub phase: GamePhase,
    /// Present once the first run started; kept after a stop so the final
    /// frame stays visible
    pub run: Option<Run>,
    pub high_score: HighScore,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(super) rng: Pcg32,
}

impl Game {
    /// Create a game sitting on the menu
    pub fn new(settings: Settings, seed: u64) -> Result<Self, GameError> {
        settings.validate()?;
        Ok(Self {
            settings,
            phase: GamePhase::Menu,
            run: None,
            high_score: HighScore::new(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Show the title screen
    pub fn present_menu<S: Stage + ?Sized>(&self, stage: &mut S) {
        stage.mount(Entity::Menu);
    }

    /// Leave the menu and begin the first run
    pub fn start<L, S>(&mut self, layout: &L, stage: &mut S) -> Result<(), GameError>
    where
        L: Layout + ?Sized,
        S: Stage + ?Sized,
    {
        if self.phase != GamePhase::Menu {
            return Err(GameError::InvalidTransition {
                phase: self.phase,
                action: "start",
            });
        }

        let run = Run::new(&self.settings, layout, &mut self.rng)?;
        stage.unmount(Entity::Menu);
        self.play(run, stage);
        Ok(())
    }

    /// End the current run. Nothing else is simulated until a restart.
    pub fn stop(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Stopped;
        log::info!(
            "Run stopped after {} ticks with score {}",
            self.run.as_ref().map_or(0, |run| run.ticks),
            self.score()
        );
    }

    /// Throw away the current run (keeping its score if it is a new best)
    /// and begin another one
    pub fn restart<L, S>(&mut self, layout: &L, stage: &mut S) -> Result<(), GameError>
    where
        L: Layout + ?Sized,
        S: Stage + ?Sized,
    {
        if self.phase == GamePhase::Menu {
            return Err(GameError::InvalidTransition {
                phase: self.phase,
                action: "restart",
            });
        }

        // A run that cannot be built leaves the current one on screen
        let next = Run::new(&self.settings, layout, &mut self.rng)?;

        if let Some(run) = &self.run {
            self.high_score.fold(&run.score);
        }
        self.stop();

        if self.run.take().is_some() {
            unmount_run(stage);
        }

        self.play(next, stage);
        Ok(())
    }

    /// Input port, written by the presentation layer on key press/release
    pub fn set_rising(&mut self, rising: bool) {
        if let Some(run) = self.run.as_mut() {
            run.avatar.set_rising(rising);
        }
    }

    /// Current run score (0 before the first run)
    pub fn score(&self) -> i64 {
        self.run.as_ref().map_or(0, |run| run.score.points())
    }

    pub fn tolerance(&self) -> Tolerance {
        Tolerance {
            trailing: self.settings.trailing_tolerance,
            vertical: self.settings.vertical_tolerance,
        }
    }

    fn play<S: Stage + ?Sized>(&mut self, run: Run, stage: &mut S) {
        stage.mount(Entity::HighScore);
        stage.show_high_score(self.high_score.points());
        stage.mount(Entity::Avatar);
        for index in 0..PAIR_COUNT {
            stage.mount(Entity::Obstacle(index));
        }
        stage.mount(Entity::Score);
        stage.show_score(run.score.points());
        stage.mount(Entity::RestartButton);

        self.run = Some(run);
        self.phase = GamePhase::Playing;
        log::info!("Run started (high score {})", self.high_score.points());
    }
}

fn unmount_run<S: Stage + ?Sized>(stage: &mut S) {
    stage.unmount(Entity::Avatar);
    stage.unmount(Entity::Score);
    stage.unmount(Entity::RestartButton);
    stage.unmount(Entity::HighScore);
    for index in 0..PAIR_COUNT {
        stage.unmount(Entity::Obstacle(index));
    }
}
