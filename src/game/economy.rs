//! Resource income.
//!
//! A color earns the resource rate of every cell it holds, plus a flat
//! bonus per tower. Income is credited when its owner ends their turn.

use std::collections::BTreeMap;

use crate::game::{CellType, Color, Map, TOWER_RESOURCES};

/// Breakdown of a color's income for one turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Income {
    /// Sum of resource rates over cells of the color.
    pub territory: u32,
    /// Number of towers held.
    pub towers: u32,
}

impl Income {
    /// Total resources collected.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.territory
            .saturating_add(self.towers.saturating_mul(TOWER_RESOURCES))
    }
}

impl Map {
    /// Income breakdown for `color`.
    #[must_use]
    pub fn income(&self, color: Color) -> Income {
        self.cells_of(color).fold(Income::default(), |mut acc, (_, cell)| {
            acc.territory = acc.territory.saturating_add(cell.resource_rate);
            if cell.cell_type == CellType::Tower {
                acc.towers += 1;
            }
            acc
        })
    }

    /// Resources `color` collects at the end of its turn.
    #[must_use]
    pub fn collect_player_resources(&self, color: Color) -> u32 {
        self.income(color).total()
    }

    /// Resources every player color would collect right now.
    #[must_use]
    pub fn collect_resources(&self) -> BTreeMap<Color, u32> {
        Color::PLAYERS
            .iter()
            .map(|&color| (color, self.collect_player_resources(color)))
            .collect()
    }
}
