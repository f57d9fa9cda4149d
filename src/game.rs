//! Game session controller
//!
//! Owns one [`GameState`], the seeded RNG, both periodic drivers and the
//! renderer, and runs the Idle → Playing ⇄ Paused → Won/Lost state machine.
//! The shell feeds it wall-clock time, taps and menu actions, and reads back
//! [`GameEvent`]s to switch screens.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::MAX_FRAME_DT;
use crate::driver::Driver;
use crate::error::GameError;
use crate::renderer::{Frame, Renderer};
use crate::sim::{self, Field, GameState, HitOutcome};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu, nothing running
    Idle,
    Playing,
    Paused,
    /// Target score reached
    Won,
    /// Score fell to the lose threshold
    Lost,
}

/// Notifications for the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    ScoreChanged { score: i64 },
    /// The round was won; the win screen follows after the settle delay
    Won { score: i64 },
    /// Settle delay elapsed, show the win screen
    ShowWinScreen,
    /// The round was lost; the shell shows a blocking notice, then calls `show_menu`
    Lost { score: i64 },
    ShowMenu,
}

/// One game session bound to a drawing surface
pub struct Game<R: Renderer> {
    config: GameConfig,
    /// Tuning queued by `set_config`, swapped in by the next `start`
    pending_config: Option<GameConfig>,
    field: Field,
    state: GameState,
    phase: GamePhase,
    rng: Pcg32,
    spawn_driver: Driver,
    tick_driver: Driver,
    /// Seconds left before the win screen is announced
    settle_timer: Option<f32>,
    events: Vec<GameEvent>,
    renderer: R,
}

impl<R: Renderer> Game<R> {
    /// Create an idle session. Fails when the renderer has no usable surface.
    pub fn new(config: GameConfig, renderer: R, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let size = renderer
            .surface_size()
            .ok_or(GameError::MissingSurface {
                width: 0.0,
                height: 0.0,
            })?;
        let field = Field::new(size.x, size.y)?;

        log::info!(
            "Game created: field {}x{}, target {}, seed {}",
            field.width,
            field.height,
            config.target_score,
            seed
        );

        Ok(Self {
            state: GameState::new(&config),
            phase: GamePhase::Idle,
            rng: Pcg32::seed_from_u64(seed),
            spawn_driver: Driver::new(config.spawn_interval_secs),
            tick_driver: Driver::new(config.tick_dt()),
            settle_timer: None,
            events: Vec::new(),
            pending_config: None,
            config,
            field,
            renderer,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Whether either periodic driver is running
    pub fn drivers_armed(&self) -> bool {
        self.spawn_driver.is_armed() || self.tick_driver.is_armed()
    }

    /// Snapshot for drawing
    pub fn frame(&self) -> Frame<'_> {
        Frame::capture(&self.state, self.phase, self.field)
    }

    /// Take all pending shell notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replace the tuning. Takes effect from the next `start`; a running
    /// round keeps the tuning it started with.
    pub fn set_config(&mut self, config: GameConfig) -> Result<(), GameError> {
        config.validate()?;
        log::debug!("Config queued for next round");
        self.pending_config = Some(config);
        Ok(())
    }

    /// Begin a fresh round from any phase
    pub fn start(&mut self) {
        self.spawn_driver.disarm();
        self.tick_driver.disarm();
        self.settle_timer = None;

        if let Some(config) = self.pending_config.take() {
            self.spawn_driver.set_interval(config.spawn_interval_secs);
            self.tick_driver.set_interval(config.tick_dt());
            self.config = config;
        }

        self.state.reset(&self.config);
        self.phase = GamePhase::Playing;

        self.spawn_driver.arm();
        self.tick_driver.arm();

        log::info!("Game started (target {})", self.state.target_score);
        self.events.push(GameEvent::Started);
        self.render();
    }

    /// Pause or resume. Ignored outside Playing/Paused.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.state.paused = true;
                log::info!("Paused at tick {}", self.state.time_ticks);
                self.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.state.paused = false;
                log::info!("Resumed");
                self.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    /// Abandon whatever is running and go back to the menu
    pub fn show_menu(&mut self) {
        self.spawn_driver.disarm();
        self.tick_driver.disarm();
        self.settle_timer = None;

        self.state = GameState::new(&self.config);
        self.phase = GamePhase::Idle;

        log::info!("Back to menu");
        self.events.push(GameEvent::ShowMenu);
        self.render();
    }

    /// Alias for [`Game::show_menu`]
    pub fn stop(&mut self) {
        self.show_menu();
    }

    /// Leave a finished round for the menu. Ignored while a round is running.
    pub fn restart(&mut self) {
        match self.phase {
            GamePhase::Won | GamePhase::Lost => self.show_menu(),
            phase => log::debug!("Restart ignored in {:?}", phase),
        }
    }

    /// Track a new surface size. Entities keep their positions.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), GameError> {
        self.field = Field::new(width, height)?;
        log::debug!("Field resized to {}x{}", width, height);
        self.render();
        Ok(())
    }

    /// Apply a tap in field coordinates
    pub fn handle_tap(&mut self, x: f32, y: f32) -> Option<HitOutcome> {
        if self.phase != GamePhase::Playing {
            return None;
        }

        let hit = sim::handle_tap(&mut self.state, Vec2::new(x, y), &self.config, &mut self.rng)?;
        self.events.push(GameEvent::ScoreChanged { score: hit.score });
        self.check_outcome();
        self.render();
        Some(hit)
    }

    /// Feed wall-clock time (seconds) to both drivers and run whatever is due
    pub fn advance(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        let dt = dt.min(MAX_FRAME_DT);

        if let Some(remaining) = self.settle_timer.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.settle_timer = None;
                log::info!("Showing win screen");
                self.events.push(GameEvent::ShowWinScreen);
            }
        }

        let spawns = self.spawn_driver.accumulate(dt);
        let ticks = self.tick_driver.accumulate(dt);

        // Paused fires are dropped, not queued
        if !self.state.is_live() {
            return;
        }

        for _ in 0..spawns {
            sim::spawn(&mut self.state, &self.config, &self.field, &mut self.rng);
        }
        for _ in 0..ticks {
            let report = sim::step(&mut self.state, &self.config, &self.field);
            if report.hearts_missed > 0 {
                log::debug!(
                    "Missed {} heart(s), {} total",
                    report.hearts_missed,
                    self.state.hearts_missed
                );
            }
            if report.bombs_dropped > 0 {
                log::trace!("{} bomb(s) fell through", report.bombs_dropped);
            }
            self.render();
        }
    }

    /// Win beats lose when both thresholds are crossed at once
    fn check_outcome(&mut self) {
        let score = self.state.score;
        if score >= self.state.target_score {
            self.finish(GamePhase::Won);
            self.settle_timer = Some(self.config.win_settle_secs);
            log::info!("Won with {} points", score);
            self.events.push(GameEvent::Won { score });
        } else if score <= self.config.lose_threshold {
            self.finish(GamePhase::Lost);
            log::info!("Lost with {} points", score);
            self.events.push(GameEvent::Lost { score });
        }
    }

    /// Stop the round before anything is announced
    fn finish(&mut self, phase: GamePhase) {
        self.state.active = false;
        self.spawn_driver.disarm();
        self.tick_driver.disarm();
        self.phase = phase;
    }

    fn render(&mut self) {
        let frame = Frame::capture(&self.state, self.phase, self.field);
        self.renderer.render(&frame);
    }
}
