//! Board generation and refill: no token is ever placed so that it completes
//! a run with the two cells to its left or the two cells above it.

use crate::grid::{Cell, Grid, Pos};
use crate::rng::GemRng;

/// Fresh `size` x `size` board with no horizontal or vertical run of three.
pub fn new_board(size: usize, palette: u8, rng: &mut GemRng) -> Grid {
    let mut grid = Grid::empty(size);
    fill_fresh(&mut grid, palette, rng);
    grid
}

/// Colour for `pos` that does not complete a run with already placed neighbours.
///
/// Candidates are tried in random order. When every colour would complete a run
/// (only possible with a tiny palette) the last candidate tried is returned anyway.
pub fn new_token(grid: &Grid, pos: Pos, palette: u8, rng: &mut GemRng) -> u8 {
    let mut last = 0;
    for color in rng.shuffled_palette(palette) {
        last = color;
        if !completes_run(grid, pos, color) {
            return color;
        }
    }
    last
}

/// Gravity followed by fresh tokens for every remaining hole.
pub fn fill_empty(grid: &mut Grid, palette: u8, rng: &mut GemRng) {
    for col in 0..grid.size() {
        compact_column(grid, col);
    }
    fill_fresh(grid, palette, rng);
}

/// Drop every token in `col` to the bottom, keeping their order; holes end up on top.
fn compact_column(grid: &mut Grid, col: usize) {
    let size = grid.size();
    let mut write = size;
    for row in (0..size).rev() {
        let pos = Pos::new(row, col);
        if let Some(cell @ Cell::Token(_)) = grid.get(pos) {
            write -= 1;
            if write != row {
                grid.set(Pos::new(write, col), cell);
                grid.set(pos, Cell::Empty);
            }
        }
    }
}

/// Row-major pass assigning a new token to each empty cell.
fn fill_fresh(grid: &mut Grid, palette: u8, rng: &mut GemRng) {
    for pos in grid.positions() {
        if grid.get(pos) == Some(Cell::Empty) {
            let color = new_token(grid, pos, palette, rng);
            grid.set(pos, Cell::Token(color));
        }
    }
}

fn completes_run(grid: &Grid, pos: Pos, color: u8) -> bool {
    let token = Cell::Token(color);
    let left = pos.col >= 2
        && grid
            .get(Pos::new(pos.row, pos.col - 1))
            .is_some_and(|c| c.same_color(token))
        && grid
            .get(Pos::new(pos.row, pos.col - 2))
            .is_some_and(|c| c.same_color(token));
    let above = pos.row >= 2
        && grid
            .get(Pos::new(pos.row - 1, pos.col))
            .is_some_and(|c| c.same_color(token))
        && grid
            .get(Pos::new(pos.row - 2, pos.col))
            .is_some_and(|c| c.same_color(token));
    left || above
}
