//! Text renderer for terminal viewing, with optional ANSI colors.

// Allow format! with push_str for readability
#![allow(clippy::format_push_string)]

use crate::game::{Cell, CellType, Color, Game, Map, Player, Topology};

const RESET: &str = "\x1b[0m";

/// Width of one rendered cell.
const CELL_WIDTH: usize = 4;

/// Render the board, one text row per grid row.
///
/// Output format (hex board; odd rows are shifted half a cell):
/// ```text
///  R#2   r   .   .
///      r  R1   .  ##
///    .   .  B3   b
/// ```
///
/// Legend: `R#2` = red tower of strength 2, `R1` = red unit of strength 1,
/// `r` = red territory, `.` = unowned, `##` = disabled. With `ansi` set,
/// each cell is drawn in its display color.
#[must_use]
pub fn render_map(map: &Map, ansi: bool) -> String {
    let mut output = String::new();

    for (coord, cell) in map.iter() {
        if coord.col == 0 {
            if coord.row > 0 {
                output.push('\n');
            }
            if map.topology() == Topology::Hex && coord.row % 2 == 1 {
                output.push_str(&" ".repeat(CELL_WIDTH / 2));
            }
        }
        let token = format!("{:>CELL_WIDTH$}", cell_token(cell));
        if ansi && (cell.disabled || cell.color != Color::Empty) {
            let rgb = cell.rgb();
            output.push_str(&format!("\x1b[38;2;{};{};{}m{token}{RESET}", rgb.r, rgb.g, rgb.b));
        } else {
            output.push_str(&token);
        }
    }
    output.push('\n');
    output
}

/// Short text for one cell.
fn cell_token(cell: &Cell) -> String {
    if cell.disabled {
        return "##".to_string();
    }
    let initial = cell.color.name().chars().next().unwrap_or('?');
    match cell.cell_type {
        CellType::Tower => format!("{}#{}", initial.to_ascii_uppercase(), cell.strength),
        CellType::Unit => format!("{}{}", initial.to_ascii_uppercase(), cell.strength),
        CellType::Empty if cell.color == Color::Empty => ".".to_string(),
        CellType::Empty => initial.to_string(),
    }
}

/// Render a status block for every active player, current player first.
///
/// ```text
/// Turn 12, red to move
///   red     12 res  9 cells  2 units  tower (1, 1)
///   blue     3 res  7 cells  1 units  tower (6, 5)
/// ```
#[must_use]
pub fn render_status(game: &Game) -> String {
    let mut output = String::new();
    let map = game.map();

    match game.current_color() {
        Some(color) if !game.game_over() => {
            output.push_str(&format!("Turn {}, {color} to move\n", game.turns_played() + 1));
        }
        Some(color) => output.push_str(&format!("Game over, {color} wins\n")),
        None => output.push_str("Game over, no players left\n"),
    }

    for color in game.rotation().colors() {
        let resources = game.rotation().get(color).map_or(0, Player::resources);
        let cells = map.cells_of(color).count();
        let units = map.units(color).as_ref().map_or(0, Vec::len);
        let tower = map
            .tower(color)
            .map_or_else(|_| "none".to_string(), |t| t.to_string());
        output.push_str(&format!(
            "  {:<7} {resources:>3} res {cells:>2} cells {units:>2} units  tower {tower}\n",
            color.name()
        ));
    }

    output
}

/// Render the board followed by the status block.
#[must_use]
pub fn render_game(game: &Game, ansi: bool) -> String {
    let mut output = render_map(game.map(), ansi);
    output.push('\n');
    output.push_str(&render_status(game));
    output
}
