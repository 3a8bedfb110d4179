//! Turn order: a ring of active players.
//!
//! Seats live in a slot vector and link to each other by index, so the ring
//! can be walked in both directions without shared mutable references.
//! A color index gives O(log n) lookup of a player's seat.

use std::collections::BTreeMap;

use crate::error::{GameError, GameResult, RuleViolation};
use crate::game::{Color, Player};

/// One entry of the ring.
#[derive(Debug, Clone)]
struct Seat {
    /// Occupying player.
    player: Player,
    /// Slot of the next seat in turn order.
    next: usize,
    /// Slot of the previous seat in turn order.
    prev: usize,
}

/// Circular turn order of the players still in the game.
#[derive(Debug, Clone, Default)]
pub struct Rotation {
    /// Seat storage; `None` marks a freed slot.
    slots: Vec<Option<Seat>>,
    /// Slot of each active color.
    by_color: BTreeMap<Color, usize>,
    /// Slot of the player whose turn it is.
    current: Option<usize>,
    /// Color that `reset` returns to.
    initial: Option<Color>,
}

impl Rotation {
    /// Create an empty rotation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rotation from players in turn order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a color appears twice.
    pub fn from_players(players: impl IntoIterator<Item = Player>) -> GameResult<Self> {
        let mut rotation = Self::new();
        for player in players {
            rotation.append(player)?;
        }
        Ok(rotation)
    }

    fn seat(&self, slot: usize) -> &Seat {
        self.slots[slot]
            .as_ref()
            .unwrap_or_else(|| unreachable!("ring links point at freed slot {slot}"))
    }

    fn seat_mut(&mut self, slot: usize) -> &mut Seat {
        self.slots[slot]
            .as_mut()
            .unwrap_or_else(|| unreachable!("ring links point at freed slot {slot}"))
    }

    /// Store a seat in a free slot and return the slot.
    fn alloc(&mut self, seat: Seat) -> usize {
        if let Some(slot) = self.slots.iter().position(Option::is_none) {
            self.slots[slot] = Some(seat);
            slot
        } else {
            self.slots.push(Some(seat));
            self.slots.len() - 1
        }
    }

    /// Link a new player into the ring just before `anchor`.
    fn link_before(&mut self, anchor: usize, player: Player) -> usize {
        let prev = self.seat(anchor).prev;
        let slot = self.alloc(Seat {
            player,
            next: anchor,
            prev,
        });
        self.seat_mut(prev).next = slot;
        self.seat_mut(anchor).prev = slot;
        self.by_color.insert(player.color(), slot);
        slot
    }

    fn ensure_absent(&self, color: Color) -> GameResult<()> {
        if self.by_color.contains_key(&color) {
            return Err(GameError::InvalidArgument(format!(
                "{color} is already in the rotation"
            )));
        }
        Ok(())
    }

    /// Slot reached by walking `steps` seats forward from the current one.
    fn walk(&self, steps: usize) -> Option<usize> {
        let mut slot = self.current?;
        for _ in 0..steps {
            slot = self.seat(slot).next;
        }
        Some(slot)
    }

    /// Add a player at the end of the turn order, just before the current seat.
    ///
    /// The first player added becomes current and the reset target.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the color is already present.
    pub fn append(&mut self, player: Player) -> GameResult<()> {
        self.ensure_absent(player.color())?;
        match self.current {
            None => self.seat_alone(player),
            Some(current) => {
                self.link_before(current, player);
            }
        }
        Ok(())
    }

    /// Make `player` the only seat of an empty ring.
    fn seat_alone(&mut self, player: Player) {
        self.slots.clear();
        self.slots.push(Some(Seat {
            player,
            next: 0,
            prev: 0,
        }));
        self.by_color.insert(player.color(), 0);
        self.current = Some(0);
        self.initial = Some(player.color());
    }

    /// Insert a player `index` seats after the current one.
    ///
    /// Index 0 places the player in front of everyone: it becomes current and
    /// the new reset target. Index `len` is the same as [`Rotation::append`].
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the color is already present
    /// - `OutOfRange` if `index > len`
    pub fn insert_at(&mut self, player: Player, index: usize) -> GameResult<()> {
        self.ensure_absent(player.color())?;
        if index > self.len() {
            return Err(GameError::OutOfRange(format!(
                "insert index {index} exceeds rotation size {}",
                self.len()
            )));
        }
        let Some(anchor) = self.walk(index) else {
            self.seat_alone(player);
            return Ok(());
        };
        let slot = self.link_before(anchor, player);
        if index == 0 {
            self.current = Some(slot);
            self.initial = Some(player.color());
        }
        Ok(())
    }

    /// Take a player out of the ring and hand it back.
    ///
    /// If it was the current player, the turn passes to the next seat first.
    /// Removing the last player leaves the rotation empty.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the color is not in the rotation.
    pub fn remove(&mut self, color: Color) -> GameResult<Player> {
        let Some(&slot) = self.by_color.get(&color) else {
            return Err(GameError::NotFound(format!("{color} is not in the rotation")));
        };

        if self.by_color.len() == 1 {
            let player = self.seat(slot).player;
            self.slots.clear();
            self.by_color.clear();
            self.current = None;
            return Ok(player);
        }

        let Seat { player, next, prev } = self.seat(slot).clone();
        if self.current == Some(slot) {
            self.current = Some(next);
        }
        self.seat_mut(prev).next = next;
        self.seat_mut(next).prev = prev;
        self.slots[slot] = None;
        self.by_color.remove(&color);
        Ok(player)
    }

    /// Pass the turn to the next player and return it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the rotation is empty.
    pub fn rotate(&mut self) -> GameResult<&Player> {
        let current = self.current.ok_or(RuleViolation::EmptyRotation)?;
        let next = self.seat(current).next;
        self.current = Some(next);
        Ok(&self.seat(next).player)
    }

    /// Hand the turn back to the previous player and return it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the rotation is empty.
    pub fn rotate_back(&mut self) -> GameResult<&Player> {
        let current = self.current.ok_or(RuleViolation::EmptyRotation)?;
        let prev = self.seat(current).prev;
        self.current = Some(prev);
        Ok(&self.seat(prev).player)
    }

    /// Rotate until the initial color is current again.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the rotation is empty
    /// - `NotFound` if the initial color has left the rotation
    pub fn reset(&mut self) -> GameResult<()> {
        if self.current.is_none() {
            return Err(RuleViolation::EmptyRotation.into());
        }
        let initial = self
            .initial
            .filter(|c| self.by_color.contains_key(c))
            .ok_or_else(|| GameError::NotFound("initial player has left the rotation".into()))?;
        while self.current_color() != Some(initial) {
            self.rotate()?;
        }
        Ok(())
    }

    /// The player `index` seats after the current one.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` unless `index < len`.
    pub fn player(&self, index: usize) -> GameResult<&Player> {
        if index >= self.len() {
            return Err(GameError::OutOfRange(format!(
                "player index {index} with {} players",
                self.len()
            )));
        }
        self.walk(index)
            .map(|slot| &self.seat(slot).player)
            .ok_or(RuleViolation::EmptyRotation.into())
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.current.map(|slot| &self.seat(slot).player)
    }

    /// Mutable access to the player whose turn it is.
    #[must_use]
    pub fn current_player_mut(&mut self) -> Option<&mut Player> {
        let slot = self.current?;
        Some(&mut self.seat_mut(slot).player)
    }

    /// Color of the player whose turn it is.
    #[must_use]
    pub fn current_color(&self) -> Option<Color> {
        self.current_player().map(Player::color)
    }

    /// Color that [`Rotation::reset`] returns to.
    #[must_use]
    pub const fn initial_color(&self) -> Option<Color> {
        self.initial
    }

    /// Look up an active player by color.
    #[must_use]
    pub fn get(&self, color: Color) -> Option<&Player> {
        self.by_color.get(&color).map(|&slot| &self.seat(slot).player)
    }

    /// Number of active players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_color.len()
    }

    /// Check if no players remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_color.is_empty()
    }

    /// Check if `color` is still in the rotation.
    #[must_use]
    pub fn has_color(&self, color: Color) -> bool {
        self.by_color.contains_key(&color)
    }

    /// Active colors in turn order, starting with the current player.
    #[must_use]
    pub fn colors(&self) -> Vec<Color> {
        (0..self.len())
            .filter_map(|i| self.walk(i))
            .map(|slot| self.seat(slot).player.color())
            .collect()
    }
}
