#![no_main]

//! Full game turn fuzzer.
//!
//! Feeds arbitrary command streams through the game controller:
//! 1. Apply moves, builds and end-turns, legal or not
//! 2. Check that rejected commands leave the game untouched
//! 3. Check the game invariants after every command
//!
//! This catches integration bugs that the combat fuzzer misses.

use arbitrary::Arbitrary;
use hextowns::game::check_invariants;
use hextowns::{CellType, CellUpdate, Color, Coord, Game, Map, MoveVector, Topology};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated command.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzCommand {
    /// Move a unit.
    Move { from: (i8, i8), to: (i8, i8) },
    /// Build a unit.
    Build { at: (i8, i8) },
    /// Pass the turn.
    End,
}

/// Structured input for full game turn fuzzing.
#[derive(Arbitrary, Debug)]
struct GameTurnInput {
    /// Starting unit strength for each player.
    unit_strength: [u8; 2],
    /// Resource rate of every cell.
    rate: u8,
    /// Hex or square grid.
    hex: bool,
    /// Commands, applied for whoever is to move.
    commands: Vec<FuzzCommand>,
}

fn coord((row, col): (i8, i8)) -> Coord {
    Coord::new(i32::from(row), i32::from(col))
}

fuzz_target!(|input: GameTurnInput| {
    let topology = if input.hex { Topology::Hex } else { Topology::Square };
    let mut map = match Map::new(8, 8, topology) {
        Ok(m) => m,
        Err(_) => return,
    };
    for row in 0..8 {
        for col in 0..8 {
            map.set_resources(Coord::new(row, col), u32::from(input.rate % 4)).unwrap();
        }
    }

    let seats = [(Color::Red, (0, 0), (1, 1)), (Color::Blue, (7, 7), (6, 6))];
    for (i, (color, tower, unit)) in seats.into_iter().enumerate() {
        map.set_cell(
            coord(tower),
            CellUpdate::new().color(color).cell_type(CellType::Tower).strength(2),
        )
        .unwrap();
        let strength = u32::from(input.unit_strength[i]).max(1);
        map.set_cell(
            coord(unit),
            CellUpdate::new().color(color).cell_type(CellType::Unit).strength(strength),
        )
        .unwrap();
    }

    let mut game = match Game::new(map, &[Color::Red, Color::Blue]) {
        Ok(g) => g,
        Err(_) => return,
    };

    // Cap commands to avoid excessive runtime
    for command in input.commands.into_iter().take(200) {
        if game.game_over() {
            break;
        }
        let mv = match command {
            FuzzCommand::Move { from, to } => MoveVector::move_unit(coord(from), coord(to)),
            FuzzCommand::Build { at } => MoveVector::make_unit(coord(at)),
            FuzzCommand::End => MoveVector::end_turn(),
        };

        let map_before = game.map().clone();
        let mover_before = game.current_color();
        let logged = game.history().len();

        // Must not panic
        if game.make_move(mv).is_err() {
            assert_eq!(game.map(), &map_before, "rejected {mv} changed the map");
            assert_eq!(game.current_color(), mover_before);
            assert_eq!(game.history().len(), logged);
        }

        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "Invariants violated after {mv}: {violations:?}");
    }
});
