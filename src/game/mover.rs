//! The command stream protocol between the game and its movers.
//!
//! At the start of a turn the game hands the current mover a [`TurnView`]
//! holding a private copy of the map. The mover answers with a lazy stream of
//! [`MoveVector`]s, which the game pulls one at a time and applies in order
//! until an end-turn command lands.

use crate::game::{Color, Map, MoveVector};

/// Lazily produced commands for a single turn.
pub type MoveStream<'a> = Box<dyn Iterator<Item = MoveVector> + 'a>;

/// What a mover sees when asked for its turn.
#[derive(Debug, Clone)]
pub struct TurnView {
    /// Color of the player to move.
    pub color: Color,
    /// Resource balance at the start of the turn.
    pub resources: u32,
    /// Snapshot of the board. Changes to it never reach the live game.
    pub map: Map,
}

/// A source of moves for one player.
pub trait Mover {
    /// Plan a turn for `view.color`.
    ///
    /// The stream should yield any number of unit moves and builds followed
    /// by exactly one end-turn. Returning `None` is a protocol failure.
    fn plan_turn(&mut self, view: TurnView) -> Option<MoveStream<'_>>;
}
