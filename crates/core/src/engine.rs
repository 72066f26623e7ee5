//! Engine module - owns the complete game state and applies commands
//!
//! The engine ties together the grid, the active and next pieces, the piece
//! generator and scoring. It never owns a timer: it reports the gravity period
//! for the current level and expects an external scheduler to call
//! [`Engine::tick`] at that cadence while [`Engine::wants_ticks`] is true.
//!
//! Every command returns whether it was applied. Commands issued in the wrong
//! phase (moving while paused, ticking after game over, ...) are rejected and
//! leave the state untouched.

use std::time::Duration;

use tracing::{debug, trace};

use crate::config::{ConfigError, EngineConfig};
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::rng::PieceGenerator;
use crate::scoring::{apply_clear, tick_period_ms};
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, LockEvent, Phase, TickResult};

/// Complete game state
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    grid: Grid,
    /// Falling piece; `None` only after game over.
    current: Option<Piece>,
    next: Piece,
    generator: PieceGenerator,
    score: u32,
    level: u32,
    /// Total rows cleared this game (display only; level follows score).
    lines: u32,
    phase: Phase,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl Engine {
    /// Create a stopped game after validating `config`.
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Create a stopped game with the classic 10x20 configuration.
    pub fn classic(seed: u32) -> Self {
        Self::build(EngineConfig::default(), seed)
    }

    fn build(config: EngineConfig, seed: u32) -> Self {
        let mut generator = PieceGenerator::new(seed);
        let current = generator.draw(&config.shapes, config.palette_size, config.grid_width);
        let next = generator.draw(&config.shapes, config.palette_size, config.grid_width);

        Self {
            grid: Grid::new(config.grid_width, config.grid_height),
            current: Some(current),
            next,
            generator,
            score: 0,
            level: 1,
            lines: 0,
            phase: Phase::Stopped,
            last_event: None,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the external scheduler should be calling [`Engine::tick`].
    pub fn wants_ticks(&self) -> bool {
        self.phase.is_playing()
    }

    /// Gravity period for the current level, in milliseconds.
    pub fn tick_period_ms(&self) -> u32 {
        tick_period_ms(self.level, self.config.base_tick_ms)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms() as u64)
    }

    /// Where the current piece would land if dropped now.
    pub fn ghost_piece(&self) -> Option<Piece> {
        let mut ghost = self.current?;
        loop {
            let below = ghost.translated(0, 1);
            if self.grid.collides(&below) {
                return Some(ghost);
            }
            ghost = below;
        }
    }

    pub fn last_event(&self) -> Option<LockEvent> {
        self.last_event
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        self.grid.write_u8_cells(&mut out.grid);
        out.active = self.current;
        out.ghost = self.ghost_piece();
        out.next = Some(self.next);
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.tick_ms = self.tick_period_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!(from = self.phase.as_str(), to = phase.as_str(), "phase change");
        self.phase = phase;
    }

    /// Start a stopped game (or continue a paused one).
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Stopped | Phase::Paused => {
                self.set_phase(Phase::Playing);
                true
            }
            _ => {
                trace!(phase = self.phase.as_str(), "start rejected");
                false
            }
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Playing {
            trace!(phase = self.phase.as_str(), "pause rejected");
            return false;
        }
        self.set_phase(Phase::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            trace!(phase = self.phase.as_str(), "resume rejected");
            return false;
        }
        self.set_phase(Phase::Playing);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Playing => self.pause(),
            Phase::Paused => self.resume(),
            _ => {
                trace!(phase = self.phase.as_str(), "toggle pause rejected");
                false
            }
        }
    }

    /// Reset to a fresh stopped game with the same configuration.
    ///
    /// The piece sequence continues from the current RNG state.
    pub fn restart(&mut self) {
        let seed = self.generator.seed();
        let config = std::mem::take(&mut self.config);
        *self = Self::build(config, seed);
        debug!(seed, "restart");
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row. Never locks; a blocked soft drop is just rejected.
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Rotate 90° clockwise in place. No wall kicks: a colliding rotation is rejected.
    pub fn rotate(&mut self) -> bool {
        self.try_commit(Piece::rotated)
    }

    /// Drop to the landing row and lock immediately.
    pub fn hard_drop(&mut self) -> Option<LockEvent> {
        if !self.phase.is_playing() {
            trace!(phase = self.phase.as_str(), "hard drop rejected");
            return None;
        }
        let mut rows = 0u32;
        while self.try_move(0, 1) {
            rows += 1;
        }
        trace!(rows, "hard drop");
        Some(self.lock_current())
    }

    /// One gravity step: fall a row, or lock when the piece cannot fall.
    pub fn tick(&mut self) -> TickResult {
        if !self.phase.is_playing() {
            trace!(phase = self.phase.as_str(), "tick rejected");
            return TickResult::Rejected;
        }
        if self.try_move(0, 1) {
            return TickResult::Fell;
        }
        TickResult::Locked(self.lock_current())
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Start => self.start(),
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        self.try_commit(|p| p.translated(dx, dy))
    }

    /// Replace the current piece with `transform(current)` unless that collides.
    fn try_commit(&mut self, transform: impl FnOnce(&Piece) -> Piece) -> bool {
        if !self.phase.is_playing() {
            trace!(phase = self.phase.as_str(), "move rejected");
            return false;
        }
        let Some(active) = self.current else {
            return false;
        };

        let candidate = transform(&active);
        if self.grid.collides(&candidate) {
            return false;
        }
        self.current = Some(candidate);
        true
    }

    /// Lock the current piece, clear rows, score, then spawn or end the game.
    fn lock_current(&mut self) -> LockEvent {
        let Some(active) = self.current.take() else {
            return LockEvent::default();
        };

        self.grid.lock(&active);
        let lines_cleared = self.grid.clear_full_rows();
        let mut event = LockEvent {
            lines_cleared,
            ..LockEvent::default()
        };

        if lines_cleared > 0 {
            let result = apply_clear(
                &self.config.line_scores,
                self.config.points_per_level,
                self.score,
                self.level,
                lines_cleared,
            );
            self.score = result.score;
            self.level = result.level;
            self.lines = self.lines.saturating_add(lines_cleared);
            event.score_awarded = result.awarded;
            event.level_changed = result.level_changed;

            if result.level_changed {
                debug!(
                    level = self.level,
                    tick_ms = self.tick_period_ms(),
                    "level changed"
                );
            }
        }

        if self.grid.is_row_occupied(0) {
            event.game_over = true;
        } else {
            let fresh = self.generator.draw(
                &self.config.shapes,
                self.config.palette_size,
                self.config.grid_width,
            );
            let spawned = std::mem::replace(&mut self.next, fresh);
            if self.grid.collides(&spawned) {
                event.game_over = true;
            } else {
                self.current = Some(spawned);
            }
        }

        debug!(
            lines = event.lines_cleared,
            awarded = event.score_awarded,
            score = self.score,
            game_over = event.game_over,
            "piece locked"
        );

        if event.game_over {
            self.set_phase(Phase::GameOver);
        }
        self.last_event = Some(event);
        event
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::classic(1)
    }
}
