//! Error types for the game engine.
//!
//! Every fallible operation validates its inputs completely before touching
//! any state, so an `Err` always means nothing was mutated.

use thiserror::Error;

use crate::game::{Color, Coord};

/// Domain-rule failures: the input was well formed but the move is illegal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    /// The two cells are not neighbors.
    #[error("cells {from} and {to} are not adjacent")]
    NotAdjacent {
        /// Origin of the move.
        from: Coord,
        /// Attempted destination.
        to: Coord,
    },
    /// Units cannot enter a disabled cell.
    #[error("cell {0} is disabled")]
    DisabledTarget(Coord),
    /// Only units can be moved.
    #[error("cell {0} does not hold a unit")]
    NotAUnit(Coord),
    /// A unit tried to merge into a tower of its own color.
    #[error("unit cannot move into its own tower at {0}")]
    MergeIntoOwnTower(Coord),
    /// The unit belongs to someone other than the current player.
    #[error("cell {at} is not owned by {expected}")]
    WrongOwner {
        /// Cell that was addressed.
        at: Coord,
        /// Color of the player whose turn it is.
        expected: Color,
    },
    /// The unit already arrived at this cell during the current turn.
    #[error("unit at {0} has already moved this turn")]
    AlreadyMoved(Coord),
    /// Not enough resources to pay for the action.
    #[error("insufficient resources: need {needed}, have {available}")]
    InsufficientResources {
        /// Cost of the action.
        needed: u32,
        /// Current balance.
        available: u32,
    },
    /// Units can only be built on empty cells.
    #[error("cell {0} is not empty")]
    TargetNotEmpty(Coord),
    /// Units can only be built next to the player's tower.
    #[error("cell {at} is not adjacent to the tower at {tower}")]
    NotAdjacentToTower {
        /// Requested build site.
        at: Coord,
        /// Position of the current player's tower.
        tower: Coord,
    },
    /// A resource change would drive the balance below zero.
    #[error("resource balance {balance} cannot absorb change of {delta}")]
    NegativeBalance {
        /// Balance before the change.
        balance: u32,
        /// Requested change.
        delta: i64,
    },
    /// The rotation has no players in it.
    #[error("rotation is empty")]
    EmptyRotation,
    /// No player is active, so no move can be attributed.
    #[error("no active player")]
    NoActivePlayer,
}

/// Failures in the command stream protocol between the game and a mover.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoverError {
    /// The mover returned no move stream at all.
    #[error("mover for {0} did not produce a move stream")]
    NoMoveStream(Color),
    /// The stream ran dry before an end-turn command was applied.
    #[error("move stream for {0} ended before the turn was ended")]
    ExhaustedWithoutEndTurn(Color),
}

/// Errors produced by the game engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Malformed input, such as a negative index or a mismatched move payload.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// An index lies outside the grid or the rotation.
    #[error("out of range: {0}")]
    OutOfRange(String),
    /// The request breaks a game rule.
    #[error("invalid state: {0}")]
    InvalidState(#[from] RuleViolation),
    /// A tower or player color could not be located.
    #[error("not found: {0}")]
    NotFound(String),
    /// Internal bookkeeping disagrees with the grid. Not recoverable.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
    /// The mover broke the command stream protocol.
    #[error("mover protocol: {0}")]
    Mover(#[from] MoverError),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
