//! Reference movers.
//!
//! [`ScriptedMover`] replays fixed per-turn scripts and is mostly useful in
//! tests. [`GreedyMover`] plays a simple build-then-advance strategy and is
//! what the tournament runner seats.

use std::collections::{BTreeSet, VecDeque};

use crate::config::Rules;
use crate::game::{
    CellType, CellUpdate, Color, Coord, Map, MoveStream, MoveVector, Mover, Topology, TurnView,
};

/// Replays one queued script per turn.
///
/// Once the queue is empty the mover produces no stream at all.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMover {
    turns: VecDeque<Vec<MoveVector>>,
}

impl ScriptedMover {
    /// Create a mover from per-turn scripts, first turn first.
    #[must_use]
    pub fn new(turns: impl IntoIterator<Item = Vec<MoveVector>>) -> Self {
        Self {
            turns: turns.into_iter().collect(),
        }
    }

    /// Queue another turn.
    pub fn push_turn(&mut self, script: Vec<MoveVector>) {
        self.turns.push_back(script);
    }

    /// Number of turns still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.turns.len()
    }
}

impl Mover for ScriptedMover {
    fn plan_turn(&mut self, _view: TurnView) -> Option<MoveStream<'_>> {
        let script = self.turns.pop_front()?;
        Some(Box::new(script.into_iter()))
    }
}

/// Builds units next to its tower while it can afford them, then pushes
/// every unit one step toward the nearest enemy tower, attacking whatever
/// it can beat on the way.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMover {
    rules: Rules,
}

impl GreedyMover {
    /// Create a greedy mover playing under `rules`.
    #[must_use]
    pub const fn new(rules: Rules) -> Self {
        Self { rules }
    }
}

impl Mover for GreedyMover {
    fn plan_turn(&mut self, view: TurnView) -> Option<MoveStream<'_>> {
        Some(Box::new(GreedyPlan::new(view, self.rules)))
    }
}

/// Where a greedy turn is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Build,
    Advance,
    Done,
}

/// Lazy move stream of a greedy turn.
///
/// Every yielded move is first applied to the plan's own copy of the board,
/// so later moves are chosen against the position the game will be in.
#[derive(Debug)]
struct GreedyPlan {
    color: Color,
    resources: u32,
    map: Map,
    rules: Rules,
    phase: Phase,
    pending: Vec<Coord>,
    moved: BTreeSet<Coord>,
}

impl GreedyPlan {
    fn new(view: TurnView, rules: Rules) -> Self {
        Self {
            color: view.color,
            resources: view.resources,
            map: view.map,
            rules,
            phase: Phase::Build,
            pending: Vec::new(),
            moved: BTreeSet::new(),
        }
    }

    fn next_build(&mut self) -> Option<MoveVector> {
        if self.resources < self.rules.unit_cost {
            return None;
        }
        let tower = self.map.tower(self.color).ok()?;
        let site = self
            .map
            .adjacent(tower)
            .ok()?
            .iter()
            .copied()
            .find(|&c| self.map.cell(c).is_ok_and(|cell| cell.is_empty()))?;
        self.map
            .set_cell(
                site,
                CellUpdate::new()
                    .color(self.color)
                    .cell_type(CellType::Unit)
                    .strength(self.rules.unit_strength),
            )
            .ok()?;
        self.resources -= self.rules.unit_cost;
        Some(MoveVector::make_unit(site))
    }

    fn enemy_towers(&self) -> Vec<Coord> {
        self.map
            .tower_positions()
            .iter()
            .copied()
            .filter(|&c| self.map.color(c).is_ok_and(|color| color != self.color))
            .collect()
    }

    /// Best destination for the unit at `from`, if any move is worth making.
    fn pick_target(&self, from: Coord, targets: &[Coord]) -> Option<Coord> {
        let unit = self.map.cell(from).ok()?;
        let topology = self.map.topology();
        let closest = |c: Coord| {
            targets
                .iter()
                .map(|&t| distance(c, t, topology))
                .min()
                .unwrap_or(0)
        };
        let here = closest(from);

        self.map
            .adjacent(from)
            .ok()?
            .iter()
            .filter_map(|&to| {
                let cell = self.map.cell(to).ok()?;
                let priority = if cell.color == self.color {
                    // Never merge; only walk over own ground to close in.
                    if !cell.is_empty() || closest(to) >= here {
                        return None;
                    }
                    0
                } else if cell.is_empty() {
                    1
                } else if cell.strength < unit.strength {
                    if cell.cell_type == CellType::Tower { 3 } else { 2 }
                } else {
                    return None;
                };
                Some((priority, std::cmp::Reverse(closest(to)), std::cmp::Reverse(to), to))
            })
            .max()
            .map(|(.., to)| to)
    }

    fn next_advance(&mut self) -> Option<MoveVector> {
        let targets = self.enemy_towers();
        while let Some(from) = self.pending.pop() {
            let ours = self
                .map
                .cell(from)
                .is_ok_and(|c| c.color == self.color && c.cell_type == CellType::Unit);
            if !ours || self.moved.contains(&from) {
                continue;
            }
            let Some(to) = self.pick_target(from, &targets) else {
                continue;
            };
            let Ok(result) = self.map.make_move(from, to) else {
                continue;
            };
            self.moved.insert(to);
            if result.destroyed_tower() {
                self.map.remove_color(result.defender_color);
            }
            return Some(MoveVector::move_unit(from, to));
        }
        None
    }
}

impl Iterator for GreedyPlan {
    type Item = MoveVector;

    fn next(&mut self) -> Option<MoveVector> {
        loop {
            match self.phase {
                Phase::Build => {
                    if let Some(mv) = self.next_build() {
                        return Some(mv);
                    }
                    // Last unit first, so the stack pops in row-major order.
                    let mut units = self.map.units(self.color).unwrap_or_default();
                    units.reverse();
                    self.pending = units;
                    self.phase = Phase::Advance;
                }
                Phase::Advance => {
                    if let Some(mv) = self.next_advance() {
                        return Some(mv);
                    }
                    self.phase = Phase::Done;
                    return Some(MoveVector::end_turn());
                }
                Phase::Done => return None,
            }
        }
    }
}

/// Number of steps between two cells on an open board.
fn distance(a: Coord, b: Coord, topology: Topology) -> u32 {
    match topology {
        Topology::Square => a.row.abs_diff(b.row) + a.col.abs_diff(b.col),
        Topology::Hex => {
            // Odd rows sit half a cell to the right; go through cube coordinates.
            let cube = |c: Coord| {
                let x = c.col - (c.row - c.row.rem_euclid(2)) / 2;
                (x, c.row, -x - c.row)
            };
            let (ax, ay, az) = cube(a);
            let (bx, by, bz) = cube(b);
            ax.abs_diff(bx).max(ay.abs_diff(by)).max(az.abs_diff(bz))
        }
    }
}
