use std::fmt::Write;

use tilefield_core::{CellCount, CellState, Coord2, Grid};

/// Draws the grid as text, one row per `y`.
///
/// `#` hidden, `.` open with no adjacent mines, a digit for the count, `*` a detonated mine.
/// With `show_mines` hidden mines are drawn as `x`.
pub fn render(grid: &Grid, show_mines: bool) -> String {
    let (width, height) = grid.size();
    let mut out = String::with_capacity((usize::from(width) * 2 + 1) * usize::from(height));
    for y in 0..height {
        for x in 0..width {
            if x > 0 {
                out.push(' ');
            }
            out.push(glyph(grid, (x, y), show_mines));
        }
        out.push('\n');
    }
    out
}

fn glyph(grid: &Grid, coords: Coord2, show_mines: bool) -> char {
    let Some(cell) = grid.get(coords) else {
        return ' ';
    };
    match cell.state() {
        CellState::Hidden if show_mines && cell.is_mine() => 'x',
        CellState::Hidden => '#',
        CellState::Detonated => '*',
        CellState::Revealed if cell.value() == 0 => '.',
        CellState::Revealed => char::from_digit(cell.value().into(), 10).unwrap_or('?'),
    }
}

/// One line summary for the end of a run.
pub fn status_line(
    revealed: CellCount,
    total: CellCount,
    mines: CellCount,
    detonated: bool,
) -> String {
    let mut line = String::new();
    let _ = write!(line, "{revealed}/{total} cells open, {mines} mines");
    if detonated {
        line.push_str(", detonated");
    }
    line
}
