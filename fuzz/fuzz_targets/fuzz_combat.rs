#![no_main]

use arbitrary::Arbitrary;
use hextowns::game::check_map_invariants;
use hextowns::{CellType, CellUpdate, Color, Coord, Map, Topology};
use libfuzzer_sys::fuzz_target;

/// Structured input for combat fuzzing.
#[derive(Arbitrary, Debug)]
struct CombatInput {
    /// Attacker strength.
    attacker_strength: u32,
    /// Defender strength (zero for an empty cell).
    defender_strength: u32,
    /// Defender is a tower rather than a unit.
    defender_is_tower: bool,
    /// Defender has the attacker's color.
    same_color: bool,
    /// Hex or square grid.
    hex: bool,
    /// Attacker row (for boundary testing).
    row: u8,
    /// Attacker column (for boundary testing).
    col: u8,
    /// Which neighbor to attack.
    direction: u8,
}

fuzz_target!(|input: CombatInput| {
    let attack = input.attacker_strength.clamp(1, 1_000_000);
    let defend = input.defender_strength.min(1_000_000);
    let topology = if input.hex { Topology::Hex } else { Topology::Square };

    let mut map = match Map::new(8, 8, topology) {
        Ok(m) => m,
        Err(_) => return,
    };

    let from = Coord::new(i32::from(input.row % 8), i32::from(input.col % 8));
    let neighbors = map.adjacent(from).unwrap().to_vec();
    if neighbors.is_empty() {
        return;
    }
    let to = neighbors[usize::from(input.direction) % neighbors.len()];

    let defender_color = if input.same_color { Color::Red } else { Color::Blue };
    map.set_cell(
        from,
        CellUpdate::new().color(Color::Red).cell_type(CellType::Unit).strength(attack),
    )
    .unwrap();
    if defend > 0 {
        let kind = if input.defender_is_tower { CellType::Tower } else { CellType::Unit };
        map.set_cell(
            to,
            CellUpdate::new().color(defender_color).cell_type(kind).strength(defend),
        )
        .unwrap();
    }
    let before = map.clone();

    // Must not panic
    let Ok(result) = map.make_move(from, to) else {
        // Only merging into an own tower is rejected here, and it leaves the map alone
        assert!(input.same_color && input.defender_is_tower && defend > 0);
        assert_eq!(map, before);
        return;
    };

    let origin = map.cell(from).unwrap();
    let target = map.cell(to).unwrap();
    assert!(origin.is_empty(), "origin not vacated");
    assert_eq!(target.strength, result.remaining_strength);

    if input.same_color && defend > 0 {
        assert_eq!(target.strength, attack + defend, "merge lost strength");
    } else {
        assert_eq!(target.strength, attack.abs_diff(defend), "combat is not subtraction");
    }
    assert_ne!(target.cell_type, CellType::Tower);

    let violations = check_map_invariants(&map);
    assert!(violations.is_empty(), "Invariants violated after combat: {violations:?}");
});
