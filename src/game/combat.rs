//! Combat and merge resolution.
//!
//! A unit moving into a cell either reinforces a friendly unit or fights
//! whatever is there. Fights subtract: the weaker side is destroyed and the
//! stronger side keeps the difference. Equal strengths annihilate each other.

use std::cmp::Ordering;

use crate::error::{GameResult, RuleViolation};
use crate::game::{Cell, CellType, Color, Coord, Map};

/// How a move was resolved at its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engagement {
    /// Joined a friendly unit (or moved onto friendly ground).
    Merged,
    /// Moved into an unoccupied cell.
    Advanced,
    /// The defender survived with reduced strength.
    Repelled,
    /// The attacker destroyed the defender and took the cell.
    Captured,
    /// Both sides were destroyed; the cell is now empty.
    Annihilated,
}

/// Result of resolving a single move on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatResult {
    /// Resolution kind.
    pub engagement: Engagement,
    /// Color holding the destination afterwards (`Empty` if annihilated).
    pub holder: Color,
    /// Strength left at the destination.
    pub remaining_strength: u32,
    /// Occupant of the destination before the move.
    pub defender_type: CellType,
    /// Color of the destination before the move.
    pub defender_color: Color,
}

impl CombatResult {
    /// Check if this move knocked out a tower of another color.
    #[must_use]
    pub fn destroyed_tower(&self) -> bool {
        self.defender_type == CellType::Tower && self.engagement != Engagement::Merged
    }
}

/// Compute what the destination cell becomes when `attacker` moves into `defender`.
///
/// The caller has already checked that `attacker` is a unit and that a
/// same-color destination is not a tower.
#[must_use]
fn resolve(attacker: Cell, defender: Cell) -> (Cell, Engagement) {
    if attacker.color == defender.color {
        let merged = Cell {
            cell_type: CellType::Unit,
            strength: defender.strength.saturating_add(attacker.strength),
            ..defender
        };
        return (merged, Engagement::Merged);
    }

    match defender.strength.cmp(&attacker.strength) {
        Ordering::Greater => {
            // Defender holds; a tower that survives this way is reduced to a unit.
            let held = Cell {
                cell_type: CellType::Unit,
                strength: defender.strength - attacker.strength,
                ..defender
            };
            (held, Engagement::Repelled)
        }
        Ordering::Less => {
            let taken = Cell {
                color: attacker.color,
                cell_type: CellType::Unit,
                strength: attacker.strength - defender.strength,
                ..defender
            };
            let engagement = if defender.is_empty() {
                Engagement::Advanced
            } else {
                Engagement::Captured
            };
            (taken, engagement)
        }
        Ordering::Equal => {
            let mut cleared = defender;
            cleared.vacate();
            (cleared, Engagement::Annihilated)
        }
    }
}

impl Map {
    /// Move the unit at `from` into the adjacent cell `to`.
    ///
    /// Friendly destinations absorb the unit's strength. Anything else is
    /// fought by strength subtraction. The origin is always left empty.
    /// Whether a tower fell is reported through [`CombatResult`]; acting on
    /// it is up to the caller.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument`/`OutOfRange` for bad coordinates
    /// - `InvalidState` if `to` is disabled, the cells are not adjacent,
    ///   `from` holds no unit, or the unit would merge into its own tower
    pub fn make_move(&mut self, from: Coord, to: Coord) -> GameResult<CombatResult> {
        let attacker = self.cell(from)?;
        let defender = self.cell(to)?;

        if defender.disabled {
            return Err(RuleViolation::DisabledTarget(to).into());
        }
        if !self.are_adjacent(from, to)? {
            return Err(RuleViolation::NotAdjacent { from, to }.into());
        }
        if attacker.cell_type != CellType::Unit {
            return Err(RuleViolation::NotAUnit(from).into());
        }
        if attacker.color == defender.color && defender.cell_type == CellType::Tower {
            return Err(RuleViolation::MergeIntoOwnTower(to).into());
        }

        let (destination, engagement) = resolve(attacker, defender);
        let mut origin = attacker;
        origin.vacate();

        self.write_raw(to, destination)?;
        self.write_raw(from, origin)?;

        Ok(CombatResult {
            engagement,
            holder: destination.color,
            remaining_strength: destination.strength,
            defender_type: defender.cell_type,
            defender_color: defender.color,
        })
    }
}

/// Kani formal verification proofs.
///
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    /// Prove that strength subtraction never underflows.
    #[kani::proof]
    fn prove_combat_subtraction_safe() {
        let attacking: u32 = kani::any();
        let defending: u32 = kani::any();

        if defending > attacking {
            let remaining = defending - attacking;
            assert!(remaining < defending);
        } else if attacking > defending {
            let remaining = attacking - defending;
            assert!(remaining < attacking);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::game::{CellUpdate, Topology};

    fn place(map: &mut Map, coord: Coord, color: Color, cell_type: CellType, strength: u32) {
        map.set_cell(
            coord,
            CellUpdate::new()
                .color(color)
                .cell_type(cell_type)
                .strength(strength),
        )
        .unwrap();
    }

    fn square_map() -> Map {
        Map::new(5, 5, Topology::Square).unwrap()
    }

    #[test]
    fn test_advance_into_empty_cell() {
        let mut map = square_map();
        let (from, to) = (Coord::new(2, 2), Coord::new(2, 3));
        place(&mut map, from, Color::Red, CellType::Unit, 3);

        let result = map.make_move(from, to).unwrap();
        assert_eq!(result.engagement, Engagement::Advanced);
        assert_eq!(map.color(to).unwrap(), Color::Red);
        assert_eq!(map.strength(to).unwrap(), 3);
        assert_eq!(map.cell_type(to).unwrap(), CellType::Unit);
        assert!(map.cell(from).unwrap().is_empty());
        assert_eq!(map.color(from).unwrap(), Color::Empty);
    }

    #[test]
    fn test_merge_same_color() {
        let mut map = square_map();
        let (from, to) = (Coord::new(1, 1), Coord::new(1, 2));
        place(&mut map, from, Color::Green, CellType::Unit, 2);
        place(&mut map, to, Color::Green, CellType::Unit, 5);

        let result = map.make_move(from, to).unwrap();
        assert_eq!(result.engagement, Engagement::Merged);
        assert_eq!(map.strength(to).unwrap(), 7);
        assert!(map.cell(from).unwrap().is_empty());
    }

    #[test]
    fn test_merge_onto_own_territory_becomes_unit() {
        let mut map = square_map();
        let (from, to) = (Coord::new(1, 1), Coord::new(2, 1));
        place(&mut map, from, Color::Blue, CellType::Unit, 2);
        map.set_color(to, Color::Blue).unwrap();

        map.make_move(from, to).unwrap();
        assert_eq!(map.cell_type(to).unwrap(), CellType::Unit);
        assert_eq!(map.strength(to).unwrap(), 2);
    }

    #[test]
    fn test_merge_into_own_tower_rejected() {
        let mut map = square_map();
        let (from, to) = (Coord::new(0, 0), Coord::new(0, 1));
        place(&mut map, from, Color::Red, CellType::Unit, 1);
        place(&mut map, to, Color::Red, CellType::Tower, 2);
        let before = map.clone();

        let err = map.make_move(from, to).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidState(RuleViolation::MergeIntoOwnTower(to))
        );
        assert_eq!(map, before);
    }

    #[test]
    fn test_defender_holds() {
        let mut map = square_map();
        let (from, to) = (Coord::new(3, 3), Coord::new(3, 4));
        place(&mut map, from, Color::Red, CellType::Unit, 2);
        place(&mut map, to, Color::Blue, CellType::Unit, 5);

        let result = map.make_move(from, to).unwrap();
        assert_eq!(result.engagement, Engagement::Repelled);
        assert_eq!(map.color(to).unwrap(), Color::Blue);
        assert_eq!(map.strength(to).unwrap(), 3);
        assert!(map.cell(from).unwrap().is_empty());
    }

    #[test]
    fn test_surviving_tower_downgraded() {
        let mut map = square_map();
        let (from, to) = (Coord::new(2, 2), Coord::new(1, 2));
        place(&mut map, from, Color::Red, CellType::Unit, 1);
        place(&mut map, to, Color::Yellow, CellType::Tower, 4);

        let result = map.make_move(from, to).unwrap();
        assert!(result.destroyed_tower());
        assert_eq!(map.cell_type(to).unwrap(), CellType::Unit);
        assert_eq!(map.color(to).unwrap(), Color::Yellow);
        assert_eq!(map.strength(to).unwrap(), 3);
        assert!(map.tower_positions().is_empty());
    }

    #[test]
    fn test_attacker_captures() {
        let mut map = square_map();
        let (from, to) = (Coord::new(2, 2), Coord::new(2, 1));
        place(&mut map, from, Color::Blue, CellType::Unit, 3);
        place(&mut map, to, Color::Red, CellType::Tower, 2);

        let result = map.make_move(from, to).unwrap();
        assert_eq!(result.engagement, Engagement::Captured);
        assert_eq!(result.holder, Color::Blue);
        assert!(result.destroyed_tower());
        assert_eq!(map.cell_type(to).unwrap(), CellType::Unit);
        assert_eq!(map.strength(to).unwrap(), 1);
        assert!(map.tower_positions().is_empty());
    }

    #[test]
    fn test_equal_strength_annihilates() {
        let mut map = square_map();
        let (from, to) = (Coord::new(4, 4), Coord::new(3, 4));
        place(&mut map, from, Color::Green, CellType::Unit, 4);
        place(&mut map, to, Color::Yellow, CellType::Unit, 4);
        map.set_resources(to, 2).unwrap();

        let result = map.make_move(from, to).unwrap();
        assert_eq!(result.engagement, Engagement::Annihilated);
        assert_eq!(result.holder, Color::Empty);
        assert_eq!(map.cell(to).unwrap().cell_type, CellType::Empty);
        assert_eq!(map.strength(to).unwrap(), 0);
        assert_eq!(map.resource_rate(to).unwrap(), 2);
        assert!(map.cell(from).unwrap().is_empty());
    }

    #[test]
    fn test_move_rejections_leave_map_untouched() {
        let mut map = square_map();
        let from = Coord::new(2, 2);
        place(&mut map, from, Color::Red, CellType::Unit, 2);
        place(&mut map, Coord::new(0, 0), Color::Red, CellType::Tower, 2);
        map.set_disabled(Coord::new(2, 3), true).unwrap();
        let before = map.clone();

        assert!(matches!(
            map.make_move(from, Coord::new(4, 4)),
            Err(GameError::InvalidState(RuleViolation::NotAdjacent { .. }))
        ));
        assert!(matches!(
            map.make_move(from, Coord::new(2, 3)),
            Err(GameError::InvalidState(RuleViolation::DisabledTarget(_)))
        ));
        assert!(matches!(
            map.make_move(Coord::new(0, 0), Coord::new(0, 1)),
            Err(GameError::InvalidState(RuleViolation::NotAUnit(_)))
        ));
        assert!(matches!(
            map.make_move(from, Coord::new(2, 9)),
            Err(GameError::OutOfRange(_))
        ));
        assert_eq!(map, before);
    }
}
