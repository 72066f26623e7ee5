//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the terminal renderer and the input layer alike.
//!
//! # Grid Dimensions
//!
//! Baseline playfield dimensions (the engine accepts others via configuration):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: horizontally centered on row 0
//!
//! # Timing
//!
//! The engine never owns a timer. It only declares the gravity period:
//!
//! | Level | Period |
//! |-------|--------|
//! | 1 | 1000ms |
//! | 2 | 500ms |
//! | 3 | 333ms |
//! | n | 1000ms / n |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{ColorIndex, GameAction, Phase, GRID_HEIGHT, GRID_WIDTH};
//!
//! // Parse game action
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//!
//! // Grid cells store a tagged color; 0 is reserved for "empty" when encoded
//! let color = ColorIndex::new(0);
//! assert_eq!(color.encode(), 1);
//! assert_eq!(ColorIndex::decode(0), None);
//!
//! assert_eq!(Phase::Stopped.as_str(), "stopped");
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Baseline grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Baseline grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Gravity period at level 1 (1000ms = 1 second per row)
pub const BASE_TICK_MS: u32 = 1000;

/// Score needed per level step (`level = score / POINTS_PER_LEVEL + 1`)
pub const POINTS_PER_LEVEL: u32 = 1000;

/// Number of colors in the default palette
pub const PALETTE_SIZE: u8 = 7;

/// Largest shape bounding box (rows and columns) a piece may have
pub const MAX_SHAPE_DIM: usize = 4;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines with a single lock:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by the current level (which starts at 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Names of the default palette, indexed by [`ColorIndex`]
pub const PALETTE_NAMES: [&str; PALETTE_SIZE as usize] =
    ["cyan", "blue", "orange", "yellow", "green", "purple", "red"];


/// Index into the color palette.
///
/// Pieces carry a 0-based index. The grid stores it as a tagged optional
/// ([`Cell`]); only the encoded `u8` form uses `0` for "empty" and `index + 1`
/// for an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorIndex(u8);

impl ColorIndex {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Encode as a non-zero byte (`index + 1`).
    pub const fn encode(self) -> u8 {
        self.0.saturating_add(1)
    }

    /// Decode a byte produced by [`ColorIndex::encode`]; `0` means empty.
    pub const fn decode(value: u8) -> Option<Self> {
        match value {
            0 => None,
            v => Some(Self(v - 1)),
        }
    }

    /// Name in the default palette, if the index is part of it.
    pub fn name(self) -> Option<&'static str> {
        PALETTE_NAMES.get(self.0 as usize).copied()
    }
}

/// A cell on the game grid
///
/// - `None`: Empty cell
/// - `Some(ColorIndex)`: Locked cell with the color of the piece that filled it
pub type Cell = Option<ColorIndex>;

/// Encode a cell for snapshots and renderers (`0` = empty).
pub fn encode_cell(cell: Cell) -> u8 {
    cell.map_or(0, ColorIndex::encode)
}

/// Game lifecycle phase
///
/// - **Stopped**: Fresh game, waiting for `start`
/// - **Playing**: Gravity runs and moves are accepted
/// - **Paused**: Frozen; only `resume`/`start`/`restart` are accepted
/// - **GameOver**: Terminal until `restart`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Stopped,
    Playing,
    Paused,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Stopped => "stopped",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::GameOver => "gameover",
        }
    }

    /// Whether the external scheduler should be invoking `tick`.
    pub fn is_playing(&self) -> bool {
        matches!(self, Phase::Playing)
    }
}

/// Game actions that can be applied to modify game state
///
/// Input handling maps raw key events into these; the engine dispatches them
/// through `Engine::apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (never locks)
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Start a stopped game (or resume a paused one)
    Start,
    /// Pause a running game
    Pause,
    /// Resume a paused game
    Resume,
    /// Pause when playing, resume when paused
    TogglePause,
    /// Reset to a fresh, stopped game
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "start" => Some(GameAction::Start),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            "togglepause" => Some(GameAction::TogglePause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Start => "start",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::TogglePause => "togglePause",
            GameAction::Restart => "restart",
        }
    }
}

/// Event emitted when a piece locks into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    /// Rows removed by this lock (0-4 with the classic catalog).
    pub lines_cleared: u32,
    /// Points added to the score by this lock.
    pub score_awarded: u32,
    /// The level changed; the scheduler should re-read the tick period.
    pub level_changed: bool,
    /// The lock ended the game.
    pub game_over: bool,
}

/// Outcome of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// The engine is not playing; nothing changed.
    Rejected,
    /// The active piece fell one row.
    Fell,
    /// The active piece could not fall and was locked.
    Locked(LockEvent),
}

impl TickResult {
    pub fn accepted(&self) -> bool {
        !matches!(self, TickResult::Rejected)
    }

    pub fn locked(&self) -> bool {
        matches!(self, TickResult::Locked(_))
    }

    pub fn lock_event(&self) -> Option<LockEvent> {
        match self {
            TickResult::Locked(ev) => Some(*ev),
            _ => None,
        }
    }
}
