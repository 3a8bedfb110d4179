//! The grid: cell storage, adjacency and the tower index.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::game::{Cell, CellType, Color, Rgb, Topology};

/// A position on the map as (row, column).
///
/// Components are signed so that neighbor arithmetic and caller input can go
/// negative; the map rejects such positions with `InvalidArgument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Row index.
    pub row: i32,
    /// Column index.
    pub col: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Positions that can neighbor this one under the given topology.
    ///
    /// North, south, east and west come first. Hex grids use offset rows:
    /// even rows add the two western diagonals, odd rows the two eastern ones.
    /// No bounds filtering happens here.
    #[must_use]
    pub fn candidate_neighbors(&self, topology: Topology) -> ([Coord; 6], usize) {
        let (r, c) = (self.row, self.col);
        let mut result = [
            Coord::new(r - 1, c),
            Coord::new(r + 1, c),
            Coord::new(r, c + 1),
            Coord::new(r, c - 1),
            Coord::new(0, 0),
            Coord::new(0, 0),
        ];
        match topology {
            Topology::Square => (result, 4),
            Topology::Hex => {
                let diagonal = if r.rem_euclid(2) == 0 { c - 1 } else { c + 1 };
                result[4] = Coord::new(r - 1, diagonal);
                result[5] = Coord::new(r + 1, diagonal);
                (result, 6)
            }
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// A partial update of a cell.
///
/// Fields left as `None` are not touched. Built with the chained setters:
///
/// ```
/// use hextowns::game::{CellType, CellUpdate, Color};
///
/// let update = CellUpdate::new().color(Color::Red).cell_type(CellType::Unit).strength(3);
/// assert_eq!(update.strength, Some(3));
/// assert_eq!(update.resource_rate, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellUpdate {
    /// New color.
    pub color: Option<Color>,
    /// New occupant type.
    pub cell_type: Option<CellType>,
    /// New strength.
    pub strength: Option<u32>,
    /// New resource rate.
    pub resource_rate: Option<u32>,
    /// New disabled flag.
    pub disabled: Option<bool>,
}

impl CellUpdate {
    /// An update that changes nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            color: None,
            cell_type: None,
            strength: None,
            resource_rate: None,
            disabled: None,
        }
    }

    /// Set the color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the occupant type.
    #[must_use]
    pub const fn cell_type(mut self, cell_type: CellType) -> Self {
        self.cell_type = Some(cell_type);
        self
    }

    /// Set the strength.
    #[must_use]
    pub const fn strength(mut self, strength: u32) -> Self {
        self.strength = Some(strength);
        self
    }

    /// Set the resource rate.
    #[must_use]
    pub const fn resource_rate(mut self, rate: u32) -> Self {
        self.resource_rate = Some(rate);
        self
    }

    /// Set the disabled flag.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Apply this update on top of an existing cell.
    #[must_use]
    pub fn apply_to(&self, cell: Cell) -> Cell {
        Cell {
            color: self.color.unwrap_or(cell.color),
            cell_type: self.cell_type.unwrap_or(cell.cell_type),
            strength: self.strength.unwrap_or(cell.strength),
            resource_rate: self.resource_rate.unwrap_or(cell.resource_rate),
            disabled: self.disabled.unwrap_or(cell.disabled),
        }
    }
}

/// The game map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    /// Number of rows.
    rows: u16,
    /// Number of columns.
    cols: u16,
    /// Neighbor relation in use.
    topology: Topology,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
    /// Enabled neighbors of each cell, row-major.
    adjacency: Vec<Vec<Coord>>,
    /// Positions currently holding a tower.
    towers: BTreeSet<Coord>,
}

impl Map {
    /// Create a map of empty cells and compute its adjacency.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if either dimension is zero.
    pub fn new(rows: u16, cols: u16, topology: Topology) -> GameResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidArgument(format!(
                "map dimensions must be positive, got {rows}x{cols}"
            )));
        }

        let size = usize::from(rows) * usize::from(cols);
        let mut map = Self {
            rows,
            cols,
            topology,
            cells: vec![Cell::EMPTY; size],
            adjacency: vec![Vec::new(); size],
            towers: BTreeSet::new(),
        };
        for idx in 0..size {
            let coord = map.coord_of(idx);
            map.refresh_adjacency(coord, idx);
        }
        Ok(map)
    }

    /// Number of rows and columns.
    #[must_use]
    pub const fn dimensions(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    /// Neighbor relation of this map.
    #[must_use]
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Check if a coordinate is within the map bounds.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && coord.row < i32::from(self.rows)
            && coord.col < i32::from(self.cols)
    }

    /// Convert a coordinate to an index into the cell storage.
    fn index(&self, coord: Coord) -> GameResult<usize> {
        if coord.row < 0 || coord.col < 0 {
            return Err(GameError::InvalidArgument(format!(
                "negative index {coord}"
            )));
        }
        if !self.in_bounds(coord) {
            return Err(GameError::OutOfRange(format!(
                "{coord} is outside the {}x{} map",
                self.rows, self.cols
            )));
        }
        #[allow(clippy::cast_sign_loss)]
        let (row, col) = (coord.row as usize, coord.col as usize);
        Ok(row * usize::from(self.cols) + col)
    }

    /// Inverse of `index`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn coord_of(&self, idx: usize) -> Coord {
        let cols = usize::from(self.cols);
        Coord::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Recompute the neighbor list of one cell.
    fn refresh_adjacency(&mut self, coord: Coord, idx: usize) {
        if self.cells[idx].disabled {
            self.adjacency[idx].clear();
            return;
        }
        let (candidates, count) = coord.candidate_neighbors(self.topology);
        let neighbors: Vec<Coord> = candidates[..count]
            .iter()
            .copied()
            .filter(|&c| self.index(c).is_ok_and(|i| !self.cells[i].disabled))
            .collect();
        self.adjacency[idx] = neighbors;
    }

    /// Recompute adjacency around a cell whose disabled flag changed.
    fn refresh_neighborhood(&mut self, coord: Coord, idx: usize) {
        self.refresh_adjacency(coord, idx);
        let (candidates, count) = coord.candidate_neighbors(self.topology);
        for &neighbor in &candidates[..count] {
            if let Ok(n_idx) = self.index(neighbor) {
                self.refresh_adjacency(neighbor, n_idx);
            }
        }
    }

    /// Get a copy of the cell at the given coordinate.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidArgument` or `OutOfRange` on a bad coordinate.
    pub fn cell(&self, coord: Coord) -> GameResult<Cell> {
        Ok(self.cells[self.index(coord)?])
    }

    /// Color of the cell.
    ///
    /// # Errors
    ///
    /// Fails on a bad coordinate.
    pub fn color(&self, coord: Coord) -> GameResult<Color> {
        Ok(self.cell(coord)?.color)
    }

    /// Occupant type of the cell.
    ///
    /// # Errors
    ///
    /// Fails on a bad coordinate.
    pub fn cell_type(&self, coord: Coord) -> GameResult<CellType> {
        Ok(self.cell(coord)?.cell_type)
    }

    /// Strength of the cell's occupant.
    ///
    /// # Errors
    ///
    /// Fails on a bad coordinate.
    pub fn strength(&self, coord: Coord) -> GameResult<u32> {
        Ok(self.cell(coord)?.strength)
    }

    /// Resource generation rate of the cell.
    ///
    /// # Errors
    ///
    /// Fails on a bad coordinate.
    pub fn resource_rate(&self, coord: Coord) -> GameResult<u32> {
        Ok(self.cell(coord)?.resource_rate)
    }

    /// Whether the cell is disabled.
    ///
    /// # Errors
    ///
    /// Fails on a bad coordinate.
    pub fn is_disabled(&self, coord: Coord) -> GameResult<bool> {
        Ok(self.cell(coord)?.disabled)
    }

    /// Enabled neighbors of the cell. Disabled cells have none.
    ///
    /// # Errors
    ///
    /// Fails on a bad coordinate.
    pub fn adjacent(&self, coord: Coord) -> GameResult<&[Coord]> {
        Ok(&self.adjacency[self.index(coord)?])
    }

    /// Check if two cells are neighbors.
    ///
    /// # Errors
    ///
    /// Fails if either coordinate is bad.
    pub fn are_adjacent(&self, a: Coord, b: Coord) -> GameResult<bool> {
        self.index(b)?;
        Ok(self.adjacent(a)?.contains(&b))
    }

    /// Display color of the cell; black when disabled.
    ///
    /// # Errors
    ///
    /// Fails on a bad coordinate.
    pub fn rgb(&self, coord: Coord) -> GameResult<Rgb> {
        Ok(self.cell(coord)?.rgb())
    }

    /// Update several fields of a cell at once.
    ///
    /// The merged cell must keep strength zero exactly when the cell is empty,
    /// and an occupied cell must carry a player color. Nothing changes on
    /// error. The tower index follows every transition into or out of
    /// `Tower`, and toggling `disabled` refreshes the adjacency of the cell
    /// and its neighborhood.
    ///
    /// # Errors
    ///
    /// Fails on a bad coordinate, or with `InvalidArgument` if the merged cell
    /// breaks the occupancy rules.
    pub fn set_cell(&mut self, coord: Coord, update: CellUpdate) -> GameResult<()> {
        let idx = self.index(coord)?;
        let before = self.cells[idx];
        let after = update.apply_to(before);
        if let Some(reason) = after.occupancy_error() {
            return Err(GameError::InvalidArgument(format!("{reason} (at {coord})")));
        }

        self.cells[idx] = after;
        if after.cell_type == CellType::Tower {
            self.towers.insert(coord);
        } else {
            self.towers.remove(&coord);
        }
        if before.disabled != after.disabled {
            self.refresh_neighborhood(coord, idx);
        }
        Ok(())
    }

    /// Set the color of a cell.
    ///
    /// # Errors
    ///
    /// See [`Map::set_cell`].
    pub fn set_color(&mut self, coord: Coord, color: Color) -> GameResult<()> {
        self.set_cell(coord, CellUpdate::new().color(color))
    }

    /// Set the occupant type of a cell.
    ///
    /// # Errors
    ///
    /// See [`Map::set_cell`].
    pub fn set_type(&mut self, coord: Coord, cell_type: CellType) -> GameResult<()> {
        self.set_cell(coord, CellUpdate::new().cell_type(cell_type))
    }

    /// Set the strength of a cell.
    ///
    /// # Errors
    ///
    /// See [`Map::set_cell`].
    pub fn set_strength(&mut self, coord: Coord, strength: u32) -> GameResult<()> {
        self.set_cell(coord, CellUpdate::new().strength(strength))
    }

    /// Set the resource rate of a cell.
    ///
    /// # Errors
    ///
    /// See [`Map::set_cell`].
    pub fn set_resources(&mut self, coord: Coord, rate: u32) -> GameResult<()> {
        self.set_cell(coord, CellUpdate::new().resource_rate(rate))
    }

    /// Enable or disable a cell.
    ///
    /// # Errors
    ///
    /// See [`Map::set_cell`].
    pub fn set_disabled(&mut self, coord: Coord, disabled: bool) -> GameResult<()> {
        self.set_cell(coord, CellUpdate::new().disabled(disabled))
    }

    /// Position of the tower belonging to `color`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `color` is not a player color
    /// - `InternalInconsistency` if the tower index points at a non-tower cell
    /// - `NotFound` if the color has no tower
    pub fn tower(&self, color: Color) -> GameResult<Coord> {
        if !color.is_player() {
            return Err(GameError::InvalidArgument(format!(
                "{color} is not a player color"
            )));
        }
        for &coord in &self.towers {
            let cell = self.cell(coord)?;
            if cell.cell_type != CellType::Tower {
                return Err(GameError::InternalInconsistency(format!(
                    "{coord} is indexed as a tower but holds {:?}",
                    cell.cell_type
                )));
            }
            if cell.color == color {
                return Ok(coord);
            }
        }
        Err(GameError::NotFound(format!("no tower for {color}")))
    }

    /// Positions in the tower index.
    #[must_use]
    pub fn tower_positions(&self) -> &BTreeSet<Coord> {
        &self.towers
    }

    /// Positions of all units of `color`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `color` is not a player color.
    pub fn units(&self, color: Color) -> GameResult<Vec<Coord>> {
        if !color.is_player() {
            return Err(GameError::InvalidArgument(format!(
                "{color} is not a player color"
            )));
        }
        Ok(self
            .iter()
            .filter(|(_, cell)| cell.color == color && cell.cell_type == CellType::Unit)
            .map(|(coord, _)| coord)
            .collect())
    }

    /// Iterate over all coordinates and cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| (self.coord_of(idx), cell))
    }

    /// Get all cells of a specific color.
    pub fn cells_of(&self, color: Color) -> impl Iterator<Item = (Coord, &Cell)> {
        self.iter().filter(move |(_, cell)| cell.color == color)
    }

    /// Remove every trace of `color` from the board.
    ///
    /// Cells of that color are vacated (terrain is kept) and their towers
    /// leave the tower index.
    pub fn remove_color(&mut self, color: Color) {
        let cols = usize::from(self.cols);
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            if cell.color == color {
                cell.vacate();
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let coord = Coord::new((idx / cols) as i32, (idx % cols) as i32);
                self.towers.remove(&coord);
            }
        }
    }

    /// Overwrite a cell without validation. Callers restore the occupancy
    /// rules and the tower index themselves.
    pub(crate) fn write_raw(&mut self, coord: Coord, cell: Cell) -> GameResult<()> {
        let idx = self.index(coord)?;
        self.cells[idx] = cell;
        if cell.cell_type == CellType::Tower {
            self.towers.insert(coord);
        } else {
            self.towers.remove(&coord);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(color: Color, strength: u32) -> CellUpdate {
        CellUpdate::new()
            .color(color)
            .cell_type(CellType::Unit)
            .strength(strength)
    }

    #[test]
    fn test_map_creation() {
        let map = Map::new(8, 7, Topology::Hex).unwrap();
        assert_eq!(map.dimensions(), (8, 7));
        assert_eq!(map.topology(), Topology::Hex);
        assert!(map.iter().all(|(_, c)| *c == Cell::EMPTY));
        assert!(map.tower_positions().is_empty());
    }

    #[test]
    fn test_map_zero_size() {
        assert!(matches!(
            Map::new(0, 5, Topology::Square),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(Map::new(5, 0, Topology::Hex).is_err());
    }

    #[test]
    fn test_bad_indices() {
        let map = Map::new(4, 4, Topology::Square).unwrap();
        assert!(matches!(
            map.color(Coord::new(-1, 0)),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            map.color(Coord::new(4, 0)),
            Err(GameError::OutOfRange(_))
        ));
        assert!(matches!(
            map.adjacent(Coord::new(0, 9)),
            Err(GameError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_square_adjacency() {
        let map = Map::new(5, 5, Topology::Square).unwrap();
        let adj = map.adjacent(Coord::new(2, 2)).unwrap();
        assert_eq!(
            adj,
            &[
                Coord::new(1, 2),
                Coord::new(3, 2),
                Coord::new(2, 3),
                Coord::new(2, 1)
            ]
        );

        let corner = map.adjacent(Coord::new(0, 0)).unwrap();
        assert_eq!(corner, &[Coord::new(1, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn test_hex_adjacency_even_row() {
        let map = Map::new(8, 7, Topology::Hex).unwrap();
        let adj = map.adjacent(Coord::new(2, 2)).unwrap();
        assert_eq!(adj.len(), 6);
        assert!(adj.contains(&Coord::new(1, 1)));
        assert!(adj.contains(&Coord::new(3, 1)));
        assert!(!adj.contains(&Coord::new(1, 3)));
    }

    #[test]
    fn test_hex_adjacency_odd_row() {
        let map = Map::new(8, 7, Topology::Hex).unwrap();
        let adj = map.adjacent(Coord::new(1, 2)).unwrap();
        assert_eq!(adj.len(), 6);
        assert!(adj.contains(&Coord::new(0, 3)));
        assert!(adj.contains(&Coord::new(2, 3)));
        assert!(!adj.contains(&Coord::new(0, 1)));
    }

    #[test]
    fn test_hex_adjacency_edges() {
        let map = Map::new(8, 7, Topology::Hex).unwrap();
        // Even row on the western edge loses both diagonals.
        assert_eq!(
            map.adjacent(Coord::new(0, 0)).unwrap(),
            &[Coord::new(1, 0), Coord::new(0, 1)]
        );
        // Last row, odd parity.
        let adj = map.adjacent(Coord::new(7, 2)).unwrap();
        assert_eq!(adj.len(), 4);
        assert!(adj.contains(&Coord::new(6, 3)));
    }

    #[test]
    fn test_disable_updates_neighbors() {
        let mut map = Map::new(6, 6, Topology::Hex).unwrap();
        let hole = Coord::new(2, 2);
        let neighbors = map.adjacent(hole).unwrap().to_vec();

        map.set_disabled(hole, true).unwrap();
        assert!(map.is_disabled(hole).unwrap());
        assert!(map.adjacent(hole).unwrap().is_empty());
        for n in &neighbors {
            assert!(!map.adjacent(*n).unwrap().contains(&hole));
        }

        map.set_disabled(hole, false).unwrap();
        assert_eq!(map.adjacent(hole).unwrap(), neighbors.as_slice());
        for n in &neighbors {
            assert!(map.adjacent(*n).unwrap().contains(&hole));
        }
    }

    #[test]
    fn test_set_cell_composite() {
        let mut map = Map::new(4, 4, Topology::Square).unwrap();
        let pos = Coord::new(1, 1);
        map.set_cell(pos, unit(Color::Red, 3).resource_rate(2)).unwrap();

        let cell = map.cell(pos).unwrap();
        assert_eq!(cell.color, Color::Red);
        assert_eq!(cell.cell_type, CellType::Unit);
        assert_eq!(cell.strength, 3);
        assert_eq!(cell.resource_rate, 2);
        assert!(!cell.disabled);

        // Untouched fields survive a partial update.
        map.set_strength(pos, 5).unwrap();
        assert_eq!(map.cell(pos).unwrap().resource_rate, 2);
        assert_eq!(map.strength(pos).unwrap(), 5);
    }

    #[test]
    fn test_set_cell_rejects_broken_occupancy() {
        let mut map = Map::new(4, 4, Topology::Square).unwrap();
        let pos = Coord::new(0, 0);
        assert!(matches!(
            map.set_type(pos, CellType::Unit),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(map.set_strength(pos, 4).is_err());
        assert!(map.set_cell(pos, unit(Color::Empty, 1)).is_err());
        assert_eq!(map.cell(pos).unwrap(), Cell::EMPTY);
    }

    #[test]
    fn test_tower_index_follows_type() {
        let mut map = Map::new(4, 4, Topology::Square).unwrap();
        let pos = Coord::new(2, 3);
        map.set_cell(pos, unit(Color::Blue, 2).cell_type(CellType::Tower))
            .unwrap();
        assert_eq!(map.tower(Color::Blue).unwrap(), pos);
        assert!(map.tower_positions().contains(&pos));

        map.set_type(pos, CellType::Unit).unwrap();
        assert!(map.tower_positions().is_empty());
        assert!(matches!(map.tower(Color::Blue), Err(GameError::NotFound(_))));
    }

    #[test]
    fn test_tower_rejects_empty_color() {
        let map = Map::new(2, 2, Topology::Square).unwrap();
        assert!(matches!(
            map.tower(Color::Empty),
            Err(GameError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_tower_index_inconsistency_detected() {
        let mut map = Map::new(3, 3, Topology::Square).unwrap();
        map.towers.insert(Coord::new(1, 1));
        assert!(matches!(
            map.tower(Color::Red),
            Err(GameError::InternalInconsistency(_))
        ));
    }

    #[test]
    fn test_units_by_color() {
        let mut map = Map::new(4, 4, Topology::Square).unwrap();
        map.set_cell(Coord::new(0, 0), unit(Color::Red, 1)).unwrap();
        map.set_cell(Coord::new(3, 3), unit(Color::Red, 2)).unwrap();
        map.set_cell(Coord::new(1, 1), unit(Color::Green, 2)).unwrap();
        map.set_cell(
            Coord::new(2, 2),
            unit(Color::Red, 4).cell_type(CellType::Tower),
        )
        .unwrap();

        let units = map.units(Color::Red).unwrap();
        assert_eq!(units, vec![Coord::new(0, 0), Coord::new(3, 3)]);
        assert!(map.units(Color::Yellow).unwrap().is_empty());
    }

    #[test]
    fn test_remove_color() {
        let mut map = Map::new(4, 4, Topology::Square).unwrap();
        map.set_cell(Coord::new(0, 0), unit(Color::Red, 1).resource_rate(3))
            .unwrap();
        map.set_cell(
            Coord::new(1, 1),
            unit(Color::Red, 2).cell_type(CellType::Tower),
        )
        .unwrap();
        map.set_cell(Coord::new(2, 2), unit(Color::Green, 2)).unwrap();

        map.remove_color(Color::Red);

        assert_eq!(map.cells_of(Color::Red).count(), 0);
        assert!(map.tower_positions().is_empty());
        assert_eq!(map.resource_rate(Coord::new(0, 0)).unwrap(), 3);
        assert_eq!(map.color(Coord::new(2, 2)).unwrap(), Color::Green);
    }

    #[test]
    fn test_rgb_for_disabled_cell() {
        let mut map = Map::new(2, 2, Topology::Square).unwrap();
        let pos = Coord::new(0, 1);
        map.set_cell(pos, unit(Color::Yellow, 1)).unwrap();
        assert_eq!(map.rgb(pos).unwrap(), Rgb::new(255, 255, 0));
        map.set_disabled(pos, true).unwrap();
        assert_eq!(map.rgb(pos).unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut map = Map::new(3, 3, Topology::Hex).unwrap();
        let snapshot = map.clone();
        map.set_cell(Coord::new(1, 1), unit(Color::Red, 1)).unwrap();
        assert_eq!(snapshot.cell(Coord::new(1, 1)).unwrap(), Cell::EMPTY);
    }
}
