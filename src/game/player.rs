//! Player state management.

use crate::error::{GameError, GameResult, RuleViolation};
use crate::game::Color;

/// A player: a fixed color and a resource balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    /// Color this player controls.
    color: Color,
    /// Current resource balance.
    resources: u32,
}

impl Player {
    /// Create a new player with an empty balance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `color` is not a player color.
    pub fn new(color: Color) -> GameResult<Self> {
        Self::with_resources(color, 0)
    }

    /// Create a new player with a starting balance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `color` is not a player color.
    pub fn with_resources(color: Color, resources: u32) -> GameResult<Self> {
        if !color.is_player() {
            return Err(GameError::InvalidArgument(format!(
                "{color} is not a player color"
            )));
        }
        Ok(Self { color, resources })
    }

    /// Color of this player.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Current resource balance.
    #[must_use]
    pub const fn resources(&self) -> u32 {
        self.resources
    }

    /// Add `delta` to the balance.
    ///
    /// The change is all-or-nothing: on error the balance is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the balance would go negative or overflow.
    pub fn change_resources(&mut self, delta: i64) -> GameResult<u32> {
        let updated = i64::from(self.resources)
            .checked_add(delta)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or(RuleViolation::NegativeBalance {
                balance: self.resources,
                delta,
            })?;
        self.resources = updated;
        Ok(updated)
    }

    /// Zero the balance.
    pub fn reset_resources(&mut self) {
        self.resources = 0;
    }
}
