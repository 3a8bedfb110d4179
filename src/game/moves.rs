//! Move vectors: the commands a mover hands to the game.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::game::Coord;

/// Tag of a move vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Finish the current turn.
    EndTurn,
    /// Move a unit to a neighboring cell.
    MoveUnit,
    /// Build a unit next to the player's tower.
    MakeUnit,
}

/// A single validated command.
///
/// The payload always matches the tag. Values are immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveVector {
    /// Finish the current turn.
    EndTurn,
    /// Move the unit at `from` into `to`.
    MoveUnit {
        /// Origin cell.
        from: Coord,
        /// Destination cell.
        to: Coord,
    },
    /// Place a new unit at `pos`.
    MakeUnit {
        /// Build site.
        pos: Coord,
    },
}

impl MoveVector {
    /// Build a move vector from a tag and a raw position payload.
    ///
    /// `EndTurn` takes no positions, `MoveUnit` exactly two and `MakeUnit`
    /// exactly one; every position must have two components.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the payload shape does not match the tag.
    pub fn new(kind: MoveKind, payload: &[&[i32]]) -> GameResult<Self> {
        let expected = match kind {
            MoveKind::EndTurn => 0,
            MoveKind::MakeUnit => 1,
            MoveKind::MoveUnit => 2,
        };
        if payload.len() != expected {
            return Err(GameError::InvalidArgument(format!(
                "{kind:?} takes {expected} position(s), got {}",
                payload.len()
            )));
        }
        let coords = payload
            .iter()
            .map(|p| match p {
                [row, col] => Ok(Coord::new(*row, *col)),
                _ => Err(GameError::InvalidArgument(format!(
                    "{kind:?} positions need 2 components, got {}",
                    p.len()
                ))),
            })
            .collect::<GameResult<Vec<_>>>()?;

        Ok(match (kind, coords.as_slice()) {
            (MoveKind::MoveUnit, &[from, to]) => Self::MoveUnit { from, to },
            (MoveKind::MakeUnit, &[pos]) => Self::MakeUnit { pos },
            _ => Self::EndTurn,
        })
    }

    /// End the turn.
    #[must_use]
    pub const fn end_turn() -> Self {
        Self::EndTurn
    }

    /// Move a unit.
    #[must_use]
    pub const fn move_unit(from: Coord, to: Coord) -> Self {
        Self::MoveUnit { from, to }
    }

    /// Build a unit.
    #[must_use]
    pub const fn make_unit(pos: Coord) -> Self {
        Self::MakeUnit { pos }
    }

    /// Tag of this vector.
    #[must_use]
    pub const fn kind(&self) -> MoveKind {
        match self {
            Self::EndTurn => MoveKind::EndTurn,
            Self::MoveUnit { .. } => MoveKind::MoveUnit,
            Self::MakeUnit { .. } => MoveKind::MakeUnit,
        }
    }

    /// Positions carried by this vector, in payload order.
    #[must_use]
    pub fn payload(&self) -> Vec<Coord> {
        match *self {
            Self::EndTurn => Vec::new(),
            Self::MoveUnit { from, to } => vec![from, to],
            Self::MakeUnit { pos } => vec![pos],
        }
    }
}

impl fmt::Display for MoveVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndTurn => write!(f, "end turn"),
            Self::MoveUnit { from, to } => write!(f, "move {from} -> {to}"),
            Self::MakeUnit { pos } => write!(f, "make unit at {pos}"),
        }
    }
}
