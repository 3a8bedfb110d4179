//! Deterministic map generation for tournaments.

// Map generation uses intentional casts for coordinate/RNG operations
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss
)]

use thiserror::Error;

use crate::config::MatchConfig;
use crate::error::GameError;
use crate::game::{CellType, CellUpdate, Color, Coord, Map};

/// Strength of a starting tower.
pub const STARTING_TOWER_STRENGTH: u32 = 2;

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random u32 in [0, max).
    fn next_u32(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(max)) as u32
    }

    /// Generate random f64 in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() as f64) / (u64::MAX as f64)
    }
}

/// Error type for map generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapGenError {
    /// The configuration cannot produce a fair board.
    #[error("map generation error: {0}")]
    Config(String),
    /// The engine rejected a generated cell.
    #[error("map generation error: {0}")]
    Game(#[from] GameError),
}

/// Generate a starting board for the seated colors of `config`.
///
/// Every cell gets a resource rate of 0 to 2, about one cell in twelve is
/// disabled, and each color gets a tower of strength
/// [`STARTING_TOWER_STRENGTH`] with its open neighbors as territory. Towers
/// are spread evenly around the center of the board.
///
/// # Errors
///
/// Returns an error if the board is too small or too crowded to seat every
/// color.
pub fn generate_map(seed: u64, config: &MatchConfig) -> Result<Map, MapGenError> {
    let seats = config.colors.len();
    if seats < 2 {
        return Err(MapGenError::Config(format!(
            "Need at least 2 players, got {seats}"
        )));
    }

    let mut rng = Rng::new(seed);
    let mut map = Map::new(config.rows, config.cols, config.topology)?;

    generate_terrain(&mut map, &mut rng)?;
    let positions = find_starting_positions(&map, seats, &mut rng)?;
    for (&color, &coord) in config.colors.iter().zip(&positions) {
        place_tower(&mut map, color, coord)?;
    }

    Ok(map)
}

/// Roll resource rates and punch holes (~8% of cells).
fn generate_terrain(map: &mut Map, rng: &mut Rng) -> Result<(), MapGenError> {
    let (rows, cols) = map.dimensions();
    for row in 0..i32::from(rows) {
        for col in 0..i32::from(cols) {
            let coord = Coord::new(row, col);
            let rate = rng.next_u32(3);
            let disabled = rng.next_f64() < 0.08;
            map.set_cell(coord, CellUpdate::new().resource_rate(rate).disabled(disabled))?;
        }
    }
    Ok(())
}

/// Find starting positions (spread out, equidistant).
fn find_starting_positions(
    map: &Map,
    seats: usize,
    rng: &mut Rng,
) -> Result<Vec<Coord>, MapGenError> {
    let (rows, cols) = map.dimensions();
    let valid: Vec<Coord> = map
        .iter()
        .filter(|(_, cell)| !cell.disabled)
        .map(|(coord, _)| coord)
        .collect();

    if valid.len() < seats {
        return Err(MapGenError::Config(format!(
            "Not enough open cells: need {seats}, have {}",
            valid.len()
        )));
    }

    // Use angular placement around center for fairness
    let center_row = f64::from(rows - 1) / 2.0;
    let center_col = f64::from(cols - 1) / 2.0;
    let radius = f64::from(rows.min(cols)) * 0.4;

    let mut positions: Vec<Coord> = Vec::with_capacity(seats);
    let angle_step = std::f64::consts::TAU / (seats as f64);
    let angle_offset = rng.next_f64() * std::f64::consts::TAU; // Random rotation

    for i in 0..seats {
        let angle = angle_offset + (i as f64) * angle_step;
        let target_row = center_row + radius * angle.sin();
        let target_col = center_col + radius * angle.cos();

        // Nearest open cell to the target that no other tower touches
        let best = valid
            .iter()
            .copied()
            .filter(|&coord| {
                positions
                    .iter()
                    .all(|&p| p != coord && !map.are_adjacent(p, coord).unwrap_or(true))
            })
            .min_by_key(|&coord| {
                let dr = f64::from(coord.row) - target_row;
                let dc = f64::from(coord.col) - target_col;
                #[allow(clippy::cast_sign_loss)]
                {
                    ((dr * dr + dc * dc) * 1000.0) as u64
                }
            })
            .ok_or_else(|| MapGenError::Config("Failed to find starting position".into()))?;

        positions.push(best);
    }

    Ok(positions)
}

/// Place a tower for `color` and claim its open, unclaimed neighbors.
fn place_tower(map: &mut Map, color: Color, coord: Coord) -> Result<(), MapGenError> {
    map.set_cell(
        coord,
        CellUpdate::new()
            .color(color)
            .cell_type(CellType::Tower)
            .strength(STARTING_TOWER_STRENGTH),
    )?;
    let neighbors = map.adjacent(coord)?.to_vec();
    for adj in neighbors {
        if map.color(adj)? == Color::Empty {
            map.set_color(adj, color)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Topology, check_map_invariants};

    fn config(rows: u16, cols: u16, colors: &[Color]) -> MatchConfig {
        MatchConfig {
            rows,
            cols,
            colors: colors.to_vec(),
            ..MatchConfig::default()
        }
    }

    #[test]
    fn test_rng_determinism() {
        let mut rng1 = Rng::new(12345);
        let mut rng2 = Rng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = Rng::new(12345);
        let mut rng2 = Rng::new(54321);

        // Very unlikely to be equal with different seeds
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_map_generation_determinism() {
        let cfg = MatchConfig::default();
        let map1 = generate_map(42, &cfg).unwrap();
        let map2 = generate_map(42, &cfg).unwrap();
        assert_eq!(map1, map2);
    }

    #[test]
    fn test_map_generation_different_seeds() {
        let cfg = config(16, 16, &Color::PLAYERS);
        let map1 = generate_map(42, &cfg).unwrap();
        let map2 = generate_map(43, &cfg).unwrap();
        assert_ne!(map1, map2);
    }

    #[test]
    fn test_every_color_gets_one_tower() {
        for seats in 2..=4 {
            let cfg = config(10, 10, &Color::PLAYERS[..seats]);
            let map = generate_map(7, &cfg).unwrap();
            assert_eq!(map.tower_positions().len(), seats);
            for &color in &Color::PLAYERS[..seats] {
                let tower = map.tower(color).unwrap();
                assert_eq!(map.strength(tower).unwrap(), STARTING_TOWER_STRENGTH);
                assert!(!map.is_disabled(tower).unwrap());
            }
        }
    }

    #[test]
    fn test_starting_territory() {
        let cfg = config(12, 12, &[Color::Red, Color::Blue]);
        let map = generate_map(42, &cfg).unwrap();

        for color in [Color::Red, Color::Blue] {
            let tower = map.tower(color).unwrap();
            for &adj in map.adjacent(tower).unwrap() {
                assert_eq!(map.color(adj).unwrap(), color);
            }
        }
    }

    #[test]
    fn test_generated_maps_are_consistent() {
        for topology in [Topology::Hex, Topology::Square] {
            for seed in 0..20 {
                let cfg = MatchConfig {
                    topology,
                    ..MatchConfig::default()
                };
                let map = generate_map(seed, &cfg).unwrap();
                assert!(check_map_invariants(&map).is_empty(), "seed {seed}");
            }
        }
    }

    #[test]
    fn test_map_generation_too_few_players() {
        let result = generate_map(42, &config(8, 8, &[Color::Red]));
        assert!(matches!(result, Err(MapGenError::Config(_))));
    }

    #[test]
    fn test_board_too_small() {
        let result = generate_map(42, &config(2, 2, &Color::PLAYERS));
        assert!(result.is_err());
    }
}
