//! Game layer for Hextowns.
//!
//! Implements the rules of the territory game:
//! - Map of cells on a hex or square grid, with towers, units and terrain
//! - Combat by strength subtraction and merging of friendly units
//! - Resource income from territory and towers
//! - Players, turn rotation and the game controller
//! - The command stream protocol spoken by movers

mod cell;
mod combat;
mod economy;
mod invariants;
mod map;
mod mover;
mod moves;
mod player;
mod rotation;
mod state;

pub use cell::{Cell, CellType, Color, MAX_PLAYERS, Rgb, TOWER_RESOURCES, Topology};
pub use combat::{CombatResult, Engagement};
pub use economy::Income;
pub use invariants::{InvariantViolation, assert_invariants, check_invariants, check_map_invariants};
pub use map::{CellUpdate, Coord, Map};
pub use mover::{MoveStream, Mover, TurnView};
pub use moves::{MoveKind, MoveVector};
pub use player::Player;
pub use rotation::Rotation;
pub use state::{Game, Outcome, TurnReport};
