//! Run detection and scoring.

use crate::grid::{Grid, Pos};
use std::collections::BTreeSet;

/// Points per run-length counter step.
pub const POINTS_PER_STEP: u32 = 10;

/// Result of scanning a board: score contribution and cells belonging to any run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
    pub score: u32,
    pub cells: BTreeSet<Pos>,
}

impl Matches {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.score == 0
    }
}

/// Scan `grid` for horizontal and vertical runs of three or more.
///
/// Each cell that ends a triple gets a counter one higher than the cell before it,
/// so a run of n contributes 1 + 2 + .. + (n - 2) steps: 3 -> 10, 4 -> 30, 5 -> 60.
/// Horizontal and vertical counters are summed independently; a junction cell is
/// listed once in `cells` but scores for both directions.
pub fn find_matches(grid: &Grid) -> Matches {
    let size = grid.size();
    let mut cells = BTreeSet::new();
    let mut steps: u32 = 0;

    for row in 0..size {
        let mut counter = 0;
        for col in 2..size {
            let triple = [
                Pos::new(row, col - 2),
                Pos::new(row, col - 1),
                Pos::new(row, col),
            ];
            if is_triple(grid, triple) {
                cells.extend(triple);
                counter += 1;
                steps += counter;
            } else {
                counter = 0;
            }
        }
    }

    for col in 0..size {
        let mut counter = 0;
        for row in 2..size {
            let triple = [
                Pos::new(row - 2, col),
                Pos::new(row - 1, col),
                Pos::new(row, col),
            ];
            if is_triple(grid, triple) {
                cells.extend(triple);
                counter += 1;
                steps += counter;
            } else {
                counter = 0;
            }
        }
    }

    Matches {
        score: steps * POINTS_PER_STEP,
        cells,
    }
}

fn is_triple(grid: &Grid, [a, b, c]: [Pos; 3]) -> bool {
    match (grid.get(a), grid.get(b), grid.get(c)) {
        (Some(a), Some(b), Some(c)) => a.same_color(b) && b.same_color(c),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_run(len: usize) -> Grid {
        // Colour 0 for the first `len` cells of row 0, a checkerboard of 1/2 elsewhere.
        let mut rows: Vec<Vec<Option<u8>>> = (0..6)
            .map(|r| (0..6).map(|c| Some(1 + ((r + c) % 2) as u8)).collect())
            .collect();
        for cell in rows[0].iter_mut().take(len) {
            *cell = Some(0);
        }
        let refs: Vec<&[Option<u8>]> = rows.iter().map(Vec::as_slice).collect();
        Grid::from_rows(&refs)
    }

    #[test]
    fn test_run_scores() {
        assert_eq!(find_matches(&row_run(2)).score, 0);
        assert_eq!(find_matches(&row_run(3)).score, 10);
        assert_eq!(find_matches(&row_run(4)).score, 30);
        assert_eq!(find_matches(&row_run(5)).score, 60);
        assert_eq!(find_matches(&row_run(5)).cells.len(), 5);
    }

    #[test]
    fn test_vertical_run() {
        let g = Grid::from_rows(&[
            &[Some(3), Some(1), Some(2)],
            &[Some(3), Some(2), Some(1)],
            &[Some(3), Some(1), Some(2)],
        ]);
        let m = find_matches(&g);
        assert_eq!(m.score, 10);
        let expected: BTreeSet<Pos> = [Pos::new(0, 0), Pos::new(1, 0), Pos::new(2, 0)].into();
        assert_eq!(m.cells, expected);
    }

    #[test]
    fn test_junction_counts_both_directions_once_in_cells() {
        // An L: row 2 and column 0 share (2, 0).
        let g = Grid::from_rows(&[
            &[Some(5), Some(1), Some(2)],
            &[Some(5), Some(2), Some(1)],
            &[Some(5), Some(5), Some(5)],
        ]);
        let m = find_matches(&g);
        assert_eq!(m.score, 20);
        assert_eq!(m.cells.len(), 5);
    }

    #[test]
    fn test_empty_cells_never_match() {
        let g = Grid::empty(5);
        let m = find_matches(&g);
        assert!(m.is_empty());
        assert!(m.cells.is_empty());
    }

    #[test]
    fn test_detection_is_pure() {
        let g = row_run(4);
        let before = g.clone();
        assert_eq!(find_matches(&g), find_matches(&g));
        assert_eq!(g, before);
    }
}
