//! Multi-turn integration tests for game mechanics.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use hextowns::agents::{GreedyMover, ScriptedMover};
use hextowns::config::MatchConfig;
use hextowns::game::{Engagement, assert_invariants, check_invariants};
use hextowns::tournament::run_match;
use hextowns::{
    CellType, CellUpdate, Color, Coord, Game, GameError, Map, MoveVector, Outcome, RuleViolation,
    Topology,
};

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

/// 8x7 hex board, every cell producing one resource, Red tower at (1,1)
/// with a Red unit below it.
fn red_outpost() -> Map {
    let mut map = Map::new(8, 7, Topology::Hex).unwrap();
    for row in 0..8 {
        for col in 0..7 {
            map.set_resources(Coord::new(row, col), 1).unwrap();
        }
    }
    place(&mut map, Coord::new(1, 1), Color::Red, CellType::Tower, 2);
    place(&mut map, Coord::new(2, 1), Color::Red, CellType::Unit, 1);
    map
}

#[test]
fn test_end_turn_credits_territory_and_tower_bonus() {
    let map = red_outpost();
    let red_cells = u32::try_from(map.cells_of(Color::Red).count()).unwrap();
    let mut game = Game::new(map, &[Color::Red, Color::Blue]).unwrap();

    let outcome = game.make_move(MoveVector::end_turn()).unwrap();

    assert_eq!(red_cells, 2);
    assert_eq!(
        outcome,
        Outcome::TurnEnded {
            color: Color::Red,
            collected: red_cells + 5,
            next: Color::Blue,
        }
    );
    assert_eq!(game.rotation().get(Color::Red).unwrap().resources(), 7);
    assert_eq!(game.current_color(), Some(Color::Blue));
}

#[test]
fn test_capturing_last_tower_eliminates_owner() {
    let mut map = red_outpost();
    // (1,2) is an eastern neighbor of (1,1) on an odd row.
    place(&mut map, Coord::new(1, 2), Color::Blue, CellType::Unit, 3);
    let mut game = Game::new(map, &[Color::Blue, Color::Red]).unwrap();

    let outcome = game
        .make_move(MoveVector::move_unit(Coord::new(1, 2), Coord::new(1, 1)))
        .unwrap();

    let Outcome::Moved { combat, eliminated } = outcome else {
        panic!("expected a unit move, got {outcome:?}");
    };
    assert_eq!(combat.engagement, Engagement::Captured);
    assert_eq!(eliminated, Some(Color::Red));

    let taken = game.map().cell(Coord::new(1, 1)).unwrap();
    assert_eq!(taken.color, Color::Blue);
    assert_eq!(taken.cell_type, CellType::Unit);
    assert_eq!(taken.strength, 1);

    assert!(matches!(game.map().tower(Color::Red), Err(GameError::NotFound(_))));
    assert!(!game.rotation().has_color(Color::Red));
    assert_eq!(game.map().cells_of(Color::Red).count(), 0);
    assert!(game.game_over());
    assert_eq!(game.winner(), Some(Color::Blue));
    assert!(check_invariants(&game).is_empty());
}

#[test]
fn test_losing_any_tower_eliminates_owner() {
    let mut map = red_outpost();
    place(&mut map, Coord::new(6, 5), Color::Red, CellType::Tower, 2);
    place(&mut map, Coord::new(1, 2), Color::Blue, CellType::Unit, 3);
    let mut game = Game::new(map, &[Color::Blue, Color::Red]).unwrap();

    let outcome = game
        .make_move(MoveVector::move_unit(Coord::new(1, 2), Coord::new(1, 1)))
        .unwrap();

    let Outcome::Moved { eliminated, .. } = outcome else {
        panic!("expected a unit move, got {outcome:?}");
    };
    assert_eq!(eliminated, Some(Color::Red));
    // The untouched second tower goes with the rest of the color.
    assert!(game.map().cell(Coord::new(6, 5)).unwrap().is_empty());
    assert!(!game.rotation().has_color(Color::Red));
    assert_eq!(game.map().cells_of(Color::Red).count(), 0);
    assert_eq!(game.winner(), Some(Color::Blue));
    assert!(check_invariants(&game).is_empty());
}

#[test]
fn test_downgraded_tower_still_eliminates_owner() {
    let mut map = red_outpost();
    place(&mut map, Coord::new(1, 2), Color::Blue, CellType::Unit, 1);
    let mut game = Game::new(map, &[Color::Blue, Color::Red]).unwrap();

    let outcome = game
        .make_move(MoveVector::move_unit(Coord::new(1, 2), Coord::new(1, 1)))
        .unwrap();

    let Outcome::Moved { combat, eliminated } = outcome else {
        panic!("expected a unit move, got {outcome:?}");
    };
    assert_eq!(combat.engagement, Engagement::Repelled);
    assert_eq!((combat.holder, combat.remaining_strength), (Color::Red, 1));
    assert_eq!(eliminated, Some(Color::Red));
    // The purge clears the surviving Red unit too.
    assert!(game.map().cell(Coord::new(1, 1)).unwrap().is_empty());
    assert!(!game.rotation().has_color(Color::Red));
}

#[test]
fn test_scripted_turns_alternate_and_build() {
    let mut map = red_outpost();
    place(&mut map, Coord::new(6, 5), Color::Blue, CellType::Tower, 2);
    let mut game = Game::new(map, &[Color::Red, Color::Blue]).unwrap();

    let mut red = ScriptedMover::new([
        vec![MoveVector::move_unit(Coord::new(2, 1), Coord::new(3, 1)), MoveVector::end_turn()],
        vec![MoveVector::make_unit(Coord::new(1, 0)), MoveVector::end_turn()],
    ]);
    let mut blue = ScriptedMover::new([vec![MoveVector::end_turn()]]);

    let first = game.query_current_player(&mut red).unwrap();
    assert_eq!(first.outcomes.len(), 2);
    // The vacated cell goes back to neutral, so Red still holds two cells.
    assert_eq!(first.collected, 2 + 5);

    game.query_current_player(&mut blue).unwrap();
    let second = game.query_current_player(&mut red).unwrap();
    assert!(second.outcomes.contains(&Outcome::Built { at: Coord::new(1, 0) }));
    assert_eq!(game.map().cell_type(Coord::new(1, 0)).unwrap(), CellType::Unit);
    assert_eq!(game.turns_played(), 3);
    assert_eq!(game.history().len(), 5);
    assert_eq!(red.remaining(), 0);
}

#[test]
fn test_rejected_move_leaves_game_untouched() {
    let mut game = Game::new(red_outpost(), &[Color::Red, Color::Blue]).unwrap();
    let before = game.map().clone();

    let err = game
        .make_move(MoveVector::make_unit(Coord::new(1, 0)))
        .unwrap_err();

    assert!(matches!(
        err,
        GameError::InvalidState(RuleViolation::InsufficientResources { needed: 5, available: 0 })
    ));
    assert_eq!(game.map(), &before);
    assert!(game.history().is_empty());
}

#[test]
fn test_greedy_movers_play_to_a_finish() {
    let mut map = Map::new(6, 6, Topology::Hex).unwrap();
    for row in 0..6 {
        for col in 0..6 {
            map.set_resources(Coord::new(row, col), 1).unwrap();
        }
    }
    place(&mut map, Coord::new(0, 0), Color::Red, CellType::Tower, 2);
    place(&mut map, Coord::new(5, 5), Color::Green, CellType::Tower, 2);
    let mut game = Game::new(map, &[Color::Red, Color::Green]).unwrap();
    let mut red = GreedyMover::default();
    let mut green = GreedyMover::default();

    for _ in 0..400 {
        if game.game_over() {
            break;
        }
        let mover = if game.current_color() == Some(Color::Red) {
            &mut red
        } else {
            &mut green
        };
        game.query_current_player(mover).unwrap();
        assert_invariants(&game);
    }

    assert!(game.turns_played() > 0);
    assert!(check_invariants(&game).is_empty());
}

#[test]
fn test_reset_restores_starting_position() {
    let mut game = Game::new(red_outpost(), &[Color::Red, Color::Blue]).unwrap();
    let start = game.map().clone();
    game.make_move(MoveVector::move_unit(Coord::new(2, 1), Coord::new(3, 1)))
        .unwrap();
    game.make_move(MoveVector::end_turn()).unwrap();

    game.reset_game().unwrap();

    assert_eq!(game.map(), &start);
    assert_eq!(game.current_color(), Some(Color::Red));
    // Red banked 2 territory + 5 tower bonus and keeps it.
    assert_eq!(game.rotation().get(Color::Red).unwrap().resources(), 7);
    assert_eq!(game.rotation().get(Color::Blue).unwrap().resources(), 0);
    assert_eq!(game.turns_played(), 0);
    assert!(!game.has_moved(Coord::new(3, 1)));
}

#[test]
fn test_full_match_is_deterministic() {
    let config = MatchConfig {
        max_turns: 120,
        ..MatchConfig::default()
    };

    let a = run_match(7, &config).unwrap();
    let b = run_match(7, &config).unwrap();

    assert!(a.turns_played <= 120);
    assert_eq!(a.winner, b.winner);
    assert_eq!(a.turns_played, b.turns_played);
    assert_eq!(a.elimination_order, b.elimination_order);
    assert_eq!(a.final_map, b.final_map);
    if a.winner.is_some() {
        assert_eq!(a.elimination_order.len(), config.colors.len() - 1);
    }
}
