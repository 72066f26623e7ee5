//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the game: the grid of locked cells, shapes
//! and rotation, random piece generation, scoring and level progression, and
//! the [`Engine`] that ties them into a phase machine. It performs no I/O and
//! owns no timer. A front end feeds it commands and calls [`Engine::tick`] at
//! the period it reports.
//!
//! # Module Structure
//!
//! - [`grid`]: W×H board with collision detection and line clearing
//! - [`pieces`]: shape matrices, the classic catalog and placed pieces
//! - [`rng`]: seeded uniform shape and color selection
//! - [`scoring`]: line-clear scores, score-derived levels and gravity
//! - [`config`]: validated engine configuration
//! - [`engine`]: complete game state and command handling
//! - [`snapshot`]: read-only state for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::Engine;
//! use blockfall_core::types::{GameAction, Phase};
//!
//! let mut game = Engine::classic(12345);
//! assert_eq!(game.phase(), Phase::Stopped);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! let event = game.hard_drop().unwrap();
//!
//! assert_eq!(event.lines_cleared, 0);
//! assert_eq!(game.score(), 0); // Only line clears score
//! ```

pub mod config;
pub mod engine;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use engine::Engine;
pub use grid::Grid;
pub use pieces::{Piece, PieceKind, Shape, ShapeCatalog, ShapeError};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{apply_clear, calculate_level, calculate_line_score, tick_period_ms, ScoreResult};
pub use snapshot::GameSnapshot;
