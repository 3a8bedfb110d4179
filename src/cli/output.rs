//! Output formatting utilities for CLI.

// Allow format! with push_str for readability
#![allow(clippy::format_push_string, clippy::cast_precision_loss)]

use hextowns::Color;
use hextowns::tournament::{MatchResult, TournamentStats};
use serde::Serialize;

/// JSON-serializable match result.
#[derive(Debug, Serialize)]
pub(super) struct JsonMatchResult {
    /// Random seed used.
    seed: u64,
    /// Winning color (null if draw).
    winner: Option<Color>,
    /// Total turns played.
    turns_played: u32,
    /// Eliminated colors, first one first.
    eliminations: Vec<Color>,
    /// Per-player results.
    players: Vec<JsonPlayerResult>,
}

/// JSON-serializable player result.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayerResult {
    /// Player color.
    color: Color,
    /// Final resource balance.
    resources: u32,
    /// Cells owned at the end.
    cells: usize,
    /// Units on the board at the end.
    units: usize,
    /// Turn eliminated (null if survived).
    eliminated_turn: Option<u32>,
}

impl JsonMatchResult {
    /// Create from a `MatchResult`.
    pub(super) fn from_match_result(result: &MatchResult) -> Self {
        Self {
            seed: result.seed,
            winner: result.winner,
            turns_played: result.turns_played,
            eliminations: result.elimination_order.iter().map(|e| e.color).collect(),
            players: result
                .players
                .iter()
                .map(|ps| JsonPlayerResult {
                    color: ps.color,
                    resources: ps.resources,
                    cells: ps.cells,
                    units: ps.units,
                    eliminated_turn: ps.eliminated_turn,
                })
                .collect(),
        }
    }
}

/// Format a match result as human-readable text.
pub(super) fn format_text(result: &MatchResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Match Result (seed: {})\n", result.seed));
    match result.winner {
        Some(winner) => output.push_str(&format!("  Winner: {winner}\n")),
        None => output.push_str("  Winner: Draw\n"),
    }
    output.push_str(&format!("  Turns: {}\n\n", result.turns_played));

    for stats in &result.players {
        output.push_str(&format!(
            "  {:<7} {} resources, {} cells, {} units",
            stats.color.name(),
            stats.resources,
            stats.cells,
            stats.units
        ));
        if let Some(turn) = stats.eliminated_turn {
            output.push_str(&format!(" [eliminated turn {turn}]"));
        }
        output.push('\n');
    }

    output
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Total games played.
    games_played: u64,
    /// Games that failed to complete.
    games_failed: u64,
    /// Per-player statistics.
    players: Vec<JsonTournamentPlayer>,
    /// Number of draws.
    draws: u64,
    /// Average game length in turns.
    avg_turns: f64,
}

/// JSON-serializable per-player tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentPlayer {
    /// Player color.
    color: Color,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Number of games in which the color was eliminated.
    eliminations: u64,
    /// Average final resources.
    avg_resources: f64,
    /// Average final cell count.
    avg_cells: f64,
}

impl JsonTournamentResult {
    /// Create from stats and seated colors.
    pub(super) fn from_stats(stats: &TournamentStats, colors: &[Color]) -> Self {
        let players = colors
            .iter()
            .map(|&color| {
                let seat = stats.seats.get(&color).copied().unwrap_or_default();
                JsonTournamentPlayer {
                    color,
                    wins: seat.wins,
                    win_rate: stats.win_rate(color),
                    eliminations: seat.eliminations,
                    avg_resources: stats.avg_resources(color),
                    avg_cells: stats.avg_cells(color),
                }
            })
            .collect();

        Self {
            games_played: stats.games_played,
            games_failed: stats.games_failed,
            players,
            draws: stats.draws,
            avg_turns: stats.avg_turns(),
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats, colors: &[Color]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Tournament Results ({} games)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for &color in colors {
        let wins = stats.seats.get(&color).map_or(0, |s| s.wins);
        let rate = stats.win_rate(color) * 100.0;
        output.push_str(&format!("  {:<7} {rate:.1}% ({wins} wins)\n", color.name()));
    }
    let draw_rate = if stats.games_played == 0 {
        0.0
    } else {
        stats.draws as f64 / stats.games_played as f64 * 100.0
    };
    output.push_str(&format!("  Draws:  {} ({draw_rate:.1}%)\n\n", stats.draws));

    output.push_str("Average Final Position:\n");
    for &color in colors {
        output.push_str(&format!(
            "  {:<7} {:.1} resources, {:.1} cells\n",
            color.name(),
            stats.avg_resources(color),
            stats.avg_cells(color)
        ));
    }

    output.push_str(&format!("\nAverage Game Length: {:.0} turns\n", stats.avg_turns()));
    if stats.games_failed > 0 {
        output.push_str(&format!("Failed games: {}\n", stats.games_failed));
    }

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats, colors: &[Color]) -> String {
    let mut output = String::new();

    // Header
    output.push_str("color,wins,win_rate,eliminations,avg_resources,avg_cells\n");

    // Data rows
    for &color in colors {
        let seat = stats.seats.get(&color).copied().unwrap_or_default();
        output.push_str(&format!(
            "{},{},{:.4},{},{:.2},{:.2}\n",
            color.name(),
            seat.wins,
            stats.win_rate(color),
            seat.eliminations,
            stats.avg_resources(color),
            stats.avg_cells(color)
        ));
    }

    output
}
