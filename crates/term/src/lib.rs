//! Terminal front end for the game.
//!
//! Renders [`core::GameSnapshot`]s into a simple framebuffer that is flushed
//! to the terminal with `crossterm`. No widget toolkit is involved, which
//! keeps precise control over the cell aspect ratio (2 columns per grid cell
//! by default).

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{color_rgb, AnchorY, GameView, Viewport, PALETTE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
