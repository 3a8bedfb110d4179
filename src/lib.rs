// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Hextowns: a deterministic turn-based territory game engine.
//!
//! Players own towers and units on a hex or square grid. Units move one cell
//! per turn, fight by strength subtraction and merge with friends; towers
//! pay out resources that buy new units. A player who loses a tower is
//! out, and the last player standing wins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI / Tournament Runner           │
//! ├─────────────────────────────────────┤
//! │   Movers (scripted, greedy)         │
//! ├─────────────────────────────────────┤
//! │   Game controller + Rotation        │
//! ├─────────────────────────────────────┤
//! │   Map engine (cells, combat, income)│
//! └─────────────────────────────────────┘
//! ```
//!
//! Movers never touch the live game: each turn they receive a copy of the
//! board and answer with a lazy stream of [`MoveVector`]s.

pub mod agents;
pub mod config;
pub mod error;
pub mod game;
pub mod render;
pub mod tournament;

pub use error::{GameError, GameResult, MoverError, RuleViolation};

// Re-export key game types at crate root for convenience
pub use game::{
    Cell, CellType, CellUpdate, Color, Coord, Game, Map, MoveVector, Mover, Outcome, Player,
    Rotation, Topology,
};
