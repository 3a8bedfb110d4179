//! Colors, cell types and the per-cell record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Maximum number of players in a game (one per player color).
pub const MAX_PLAYERS: usize = 4;

/// Resources credited per tower at the end of its owner's turn.
pub const TOWER_RESOURCES: u32 = 5;

/// Faction color of a cell or player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Unowned.
    Empty,
    /// Red faction.
    Red,
    /// Green faction.
    Green,
    /// Blue faction.
    Blue,
    /// Yellow faction.
    Yellow,
}

impl Color {
    /// Colors that can be taken by a player, in default turn order.
    pub const PLAYERS: [Color; MAX_PLAYERS] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    /// Check if a player can take on this color.
    #[must_use]
    pub const fn is_player(self) -> bool {
        !matches!(self, Color::Empty)
    }

    /// Lowercase name of the color.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Empty => "empty",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        }
    }

    /// Display color for a cell of this color.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Color::Empty => Rgb::WHITE,
            Color::Red => Rgb::new(255, 0, 0),
            Color::Green => Rgb::new(0, 128, 0),
            Color::Blue => Rgb::new(0, 0, 255),
            Color::Yellow => Rgb::new(255, 255, 0),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "empty" => Ok(Color::Empty),
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            "yellow" => Ok(Color::Yellow),
            other => Err(GameError::InvalidArgument(format!("unknown color {other:?}"))),
        }
    }
}

/// An RGB triple handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Background of an empty cell.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Any disabled cell.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a new color triple.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// What occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    /// Nothing.
    Empty,
    /// A mobile unit.
    Unit,
    /// A player's capital.
    Tower,
}

/// Grid topology, which decides the neighbor relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Offset-coordinate hexagons, six neighbors.
    #[default]
    Hex,
    /// Four-neighbor squares.
    Square,
}

impl FromStr for Topology {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" | "hexagon" | "hexagonal" => Ok(Topology::Hex),
            "square" => Ok(Topology::Square),
            other => Err(GameError::InvalidArgument(format!("unknown grid type {other:?}"))),
        }
    }
}

/// A single cell of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Owning faction (territory color for empty cells).
    pub color: Color,
    /// Occupant.
    pub cell_type: CellType,
    /// Strength of the occupant; zero exactly when the cell is empty.
    pub strength: u32,
    /// Resources produced per turn for the owning color.
    pub resource_rate: u32,
    /// Disabled cells are holes in the grid.
    pub disabled: bool,
}

impl Cell {
    /// An empty, enabled, unowned cell.
    pub const EMPTY: Cell = Cell {
        color: Color::Empty,
        cell_type: CellType::Empty,
        strength: 0,
        resource_rate: 0,
        disabled: false,
    };

    /// Check if nothing occupies this cell.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.cell_type, CellType::Empty)
    }

    /// Clear the occupant, keeping terrain (resource rate, disabled flag).
    pub fn vacate(&mut self) {
        self.color = Color::Empty;
        self.cell_type = CellType::Empty;
        self.strength = 0;
    }

    /// Display color of this cell.
    #[must_use]
    pub const fn rgb(&self) -> Rgb {
        if self.disabled { Rgb::BLACK } else { self.color.rgb() }
    }

    /// Describe why this cell breaks the occupancy rules, if it does.
    #[must_use]
    pub(crate) fn occupancy_error(&self) -> Option<&'static str> {
        match (self.cell_type, self.strength) {
            (CellType::Empty, s) if s > 0 => Some("an empty cell must have zero strength"),
            (CellType::Unit | CellType::Tower, 0) => Some("an occupied cell must have positive strength"),
            (CellType::Unit | CellType::Tower, _) if !self.color.is_player() => {
                Some("an occupied cell must carry a player color")
            }
            _ => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}
