//! Tournament runner for Hextowns games.
//!
//! Provides a pure function interface: `(seed, config) -> MatchResult`
//!
//! The tournament runner handles:
//! - Deterministic map generation
//! - Seating one greedy mover per color and driving turns until one color
//!   is left or the turn limit is hit
//! - Running many seeds in parallel with rayon and folding the results

mod mapgen;

pub use mapgen::{MapGenError, STARTING_TOWER_STRENGTH, generate_map};

use std::collections::BTreeMap;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use crate::agents::GreedyMover;
use crate::config::{ConfigError, MatchConfig};
use crate::error::GameError;
use crate::game::{CellType, Color, Game, Map, Player, assert_invariants};

/// Error type for tournament operations.
#[derive(Error, Debug)]
pub enum TournamentError {
    /// The match configuration is unusable.
    #[error("invalid match config: {0}")]
    Config(#[from] ConfigError),
    /// Map generation failed.
    #[error("map generation failed: {0}")]
    MapGeneration(#[from] MapGenError),
    /// The engine rejected a move during play.
    #[error("game {seed} failed: {source}")]
    Game {
        /// Seed of the failing match.
        seed: u64,
        /// Engine error.
        source: GameError,
    },
}

/// A color knocked out of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elimination {
    /// Eliminated color.
    pub color: Color,
    /// Turn (counted in end-turns, from 1) during which it happened.
    pub turn: u32,
}

/// Statistics for a single seated color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStats {
    /// Player color.
    pub color: Color,
    /// Resource balance at the end (0 once eliminated).
    pub resources: u32,
    /// Cells of this color on the final board.
    pub cells: usize,
    /// Units of this color on the final board.
    pub units: usize,
    /// Turn the color was eliminated (None if it survived).
    pub eliminated_turn: Option<u32>,
}

/// Final result of a match.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// The seed used for this match.
    pub seed: u64,
    /// The last color standing (None if the turn limit was hit first).
    pub winner: Option<Color>,
    /// Total end-turns applied.
    pub turns_played: u32,
    /// Eliminations, first one first.
    pub elimination_order: Vec<Elimination>,
    /// Per-color statistics in seating order.
    pub players: Vec<PlayerStats>,
    /// Board at the end of the match.
    pub final_map: Map,
}

/// Run a complete match with the given seed.
///
/// Given the same seed and config, this function always produces the same
/// result.
///
/// # Errors
///
/// Returns an error if the config is invalid, the map cannot be generated,
/// or the engine rejects a move.
pub fn run_match(seed: u64, config: &MatchConfig) -> Result<MatchResult, TournamentError> {
    config.validate()?;
    let map = generate_map(seed, config)?;
    let game_err = |source| TournamentError::Game { seed, source };
    let mut game = Game::with_rules(map, &config.colors, config.rules).map_err(game_err)?;

    let mut movers: BTreeMap<Color, GreedyMover> = config
        .colors
        .iter()
        .map(|&color| (color, GreedyMover::new(config.rules)))
        .collect();
    let mut elimination_order = Vec::new();

    while !game.game_over() && game.turns_played() < config.max_turns {
        let mover = game
            .current_color()
            .and_then(|color| movers.get_mut(&color))
            .ok_or_else(|| game_err(GameError::NotFound("no mover for current player".into())))?;
        let report = game.query_current_player(mover).map_err(game_err)?;
        let turn = game.turns_played();
        elimination_order.extend(
            report
                .eliminated
                .into_iter()
                .map(|color| Elimination { color, turn }),
        );
        assert_invariants(&game);
    }

    debug!(
        seed,
        turns = game.turns_played(),
        winner = ?game.winner(),
        "Match finished"
    );
    Ok(build_result(seed, &game, elimination_order, &config.colors))
}

/// Build the final match result.
fn build_result(
    seed: u64,
    game: &Game,
    elimination_order: Vec<Elimination>,
    colors: &[Color],
) -> MatchResult {
    let map = game.map();
    let players = colors
        .iter()
        .map(|&color| PlayerStats {
            color,
            resources: game.rotation().get(color).map_or(0, Player::resources),
            cells: map.cells_of(color).count(),
            units: map
                .cells_of(color)
                .filter(|(_, c)| c.cell_type == CellType::Unit)
                .count(),
            eliminated_turn: elimination_order
                .iter()
                .find(|e| e.color == color)
                .map(|e| e.turn),
        })
        .collect();

    MatchResult {
        seed,
        winner: game.winner(),
        turns_played: game.turns_played(),
        elimination_order,
        players,
        final_map: map.clone(),
    }
}

/// Running totals for one seated color.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeatTotals {
    /// Matches won.
    pub wins: u64,
    /// Matches in which the color was eliminated.
    pub eliminations: u64,
    /// Sum of final resource balances.
    pub total_resources: u64,
    /// Sum of final cell counts.
    pub total_cells: u64,
}

/// Aggregated results of many matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TournamentStats {
    /// Matches that ran to completion.
    pub games_played: u64,
    /// Matches that returned an error.
    pub games_failed: u64,
    /// Matches that hit the turn limit.
    pub draws: u64,
    /// Sum of match lengths in turns.
    pub total_turns: u64,
    /// Totals per color.
    pub seats: BTreeMap<Color, SeatTotals>,
}

impl TournamentStats {
    /// Add a match result to the stats.
    pub fn add_result(&mut self, result: &MatchResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns_played);
        if result.winner.is_none() {
            self.draws += 1;
        }
        for player in &result.players {
            let seat = self.seats.entry(player.color).or_default();
            if result.winner == Some(player.color) {
                seat.wins += 1;
            }
            if player.eliminated_turn.is_some() {
                seat.eliminations += 1;
            }
            seat.total_resources += u64::from(player.resources);
            seat.total_cells += player.cells as u64;
        }
    }

    /// Merge stats gathered on another thread.
    pub fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.games_failed += other.games_failed;
        self.draws += other.draws;
        self.total_turns += other.total_turns;
        for (&color, theirs) in &other.seats {
            let seat = self.seats.entry(color).or_default();
            seat.wins += theirs.wins;
            seat.eliminations += theirs.eliminations;
            seat.total_resources += theirs.total_resources;
            seat.total_cells += theirs.total_cells;
        }
    }

    /// Win rate for a color (0.0-1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_rate(&self, color: Color) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.seats.get(&color).map_or(0, |s| s.wins) as f64 / self.games_played as f64
    }

    /// Average final resource balance for a color.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_resources(&self, color: Color) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.seats.get(&color).map_or(0, |s| s.total_resources) as f64 / self.games_played as f64
    }

    /// Average final cell count for a color.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_cells(&self, color: Color) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.seats.get(&color).map_or(0, |s| s.total_cells) as f64 / self.games_played as f64
    }

    /// Average match length.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_turns(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games_played as f64
    }
}

/// Run `games` matches with seeds `base_seed, base_seed + 1, ...` in parallel.
///
/// `on_match` is called once per finished or failed match, from whichever
/// worker thread ran it.
pub fn run_tournament<F>(base_seed: u64, games: u64, config: &MatchConfig, on_match: F) -> TournamentStats
where
    F: Fn(u64) + Sync,
{
    // Each thread folds into its own stats; results are merged at the end.
    (0..games)
        .into_par_iter()
        .fold(TournamentStats::default, |mut local, i| {
            let seed = base_seed.wrapping_add(i);
            match run_match(seed, config) {
                Ok(result) => local.add_result(&result),
                Err(e) => {
                    warn!(seed, error = %e, "Match failed");
                    local.games_failed += 1;
                }
            }
            on_match(seed);
            local
        })
        .reduce(TournamentStats::default, |mut a, b| {
            a.merge(&b);
            a
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn small_config() -> MatchConfig {
        MatchConfig {
            max_turns: 60,
            ..MatchConfig::default()
        }
    }

    #[test]
    fn test_tournament_error_display() {
        let err = TournamentError::from(MapGenError::Config("too small".into()));
        assert!(err.to_string().contains("map generation failed"));

        let err = TournamentError::Game {
            seed: 9,
            source: GameError::NotFound("x".into()),
        };
        assert!(err.to_string().contains("game 9 failed"));
    }

    #[test]
    fn test_run_match_rejects_bad_config() {
        let config = MatchConfig {
            colors: vec![Color::Red],
            ..MatchConfig::default()
        };
        assert!(matches!(
            run_match(1, &config),
            Err(TournamentError::Config(_))
        ));
    }

    #[test]
    fn test_run_match_deterministic() {
        let config = small_config();
        let a = run_match(42, &config).unwrap();
        let b = run_match(42, &config).unwrap();
        assert_eq!(a.winner, b.winner);
        assert_eq!(a.turns_played, b.turns_played);
        assert_eq!(a.elimination_order, b.elimination_order);
        assert_eq!(a.players, b.players);
        assert_eq!(a.final_map, b.final_map);
    }

    #[test]
    fn test_run_match_respects_turn_limit() {
        let config = small_config();
        let result = run_match(7, &config).unwrap();
        assert!(result.turns_played <= config.max_turns);
        assert_eq!(result.players.len(), 4);
        if result.winner.is_none() {
            assert_eq!(result.turns_played, config.max_turns);
        }
        for elimination in &result.elimination_order {
            let stats = result
                .players
                .iter()
                .find(|p| p.color == elimination.color)
                .unwrap();
            assert_eq!(stats.eliminated_turn, Some(elimination.turn));
            assert_eq!(stats.cells, 0);
        }
    }

    #[test]
    fn test_stats_merge() {
        let config = small_config();
        let r1 = run_match(1, &config).unwrap();
        let r2 = run_match(2, &config).unwrap();

        let mut combined = TournamentStats::default();
        combined.add_result(&r1);
        combined.add_result(&r2);

        let mut a = TournamentStats::default();
        a.add_result(&r1);
        let mut b = TournamentStats::default();
        b.add_result(&r2);
        a.merge(&b);

        assert_eq!(a, combined);
        assert_eq!(a.games_played, 2);
    }

    #[test]
    fn test_run_tournament_counts_every_match() {
        let calls = AtomicU64::new(0);
        let stats = run_tournament(100, 8, &small_config(), |_| {
            calls.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(stats.games_played + stats.games_failed, 8);
        assert_eq!(stats.games_failed, 0);
        assert_eq!(calls.load(Ordering::Relaxed), 8);
        let wins: u64 = stats.seats.values().map(|s| s.wins).sum();
        assert_eq!(wins + stats.draws, stats.games_played);
    }

    #[test]
    fn test_empty_stats() {
        let stats = TournamentStats::default();
        assert!(stats.win_rate(Color::Red).abs() < f64::EPSILON);
        assert!(stats.avg_turns().abs() < f64::EPSILON);
    }
}
