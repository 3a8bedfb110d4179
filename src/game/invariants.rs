//! Game invariants - sanity checks that detect bugs.
//!
//! Every public operation keeps these true, so a violation always points at
//! a bug in the engine rather than at a bad move.

use thiserror::Error;

use crate::game::{CellType, Game, Map, MAX_PLAYERS};

/// Invariant violation error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check the board on its own.
///
/// Covers cell occupancy, the tower index and adjacency symmetry.
#[must_use]
pub fn check_map_invariants(map: &Map) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for (coord, cell) in map.iter() {
        if let Some(problem) = cell.occupancy_error() {
            violations.push(violation(format!("Cell {coord}: {problem}")));
        }

        let indexed = map.tower_positions().contains(&coord);
        if indexed != (cell.cell_type == CellType::Tower) {
            violations.push(violation(format!(
                "Cell {coord} holds {:?} but tower index says {indexed}",
                cell.cell_type
            )));
        }

        let Ok(neighbors) = map.adjacent(coord) else {
            violations.push(violation(format!("Cell {coord} has no adjacency list")));
            continue;
        };
        if cell.disabled && !neighbors.is_empty() {
            violations.push(violation(format!(
                "Disabled cell {coord} still lists {} neighbors",
                neighbors.len()
            )));
        }
        for &other in neighbors {
            match map.adjacent(other) {
                Ok(back) if back.contains(&coord) => {}
                _ => violations.push(violation(format!(
                    "Adjacency {coord} -> {other} is not symmetric"
                ))),
            }
            if map.is_disabled(other).unwrap_or(true) {
                violations.push(violation(format!(
                    "Cell {coord} lists disabled or missing neighbor {other}"
                )));
            }
        }
    }

    // Every indexed tower must lie on the board.
    for &coord in map.tower_positions() {
        if !map.in_bounds(coord) {
            violations.push(violation(format!("Tower index holds off-board {coord}")));
        }
    }

    violations
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(game: &Game) -> Vec<InvariantViolation> {
    let mut violations = check_map_invariants(game.map());
    let rotation = game.rotation();

    if rotation.len() > MAX_PLAYERS {
        violations.push(violation(format!(
            "Rotation holds {} players, more than {MAX_PLAYERS}",
            rotation.len()
        )));
    }

    let colors = rotation.colors();
    for (i, color) in colors.iter().enumerate() {
        if colors[..i].contains(color) {
            violations.push(violation(format!("{color} is seated twice")));
        }
        if !color.is_player() {
            violations.push(violation(format!("{color} is not a player color")));
        }
    }

    // Eliminated colors leave nothing behind.
    for &color in game.seated_colors() {
        if !rotation.has_color(color) {
            let cells = game.map().cells_of(color).count();
            if cells > 0 {
                violations.push(violation(format!(
                    "Eliminated player {color} still owns {cells} cells"
                )));
            }
        }
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(game: &Game) {
    let violations = check_invariants(game);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_game: &Game) {}
