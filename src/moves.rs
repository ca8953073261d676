//! Candidate swaps: normalisation, what-if evaluation on a scratch board, and
//! the exhaustive search for any legal move.

use crate::grid::{Grid, Pos};
use crate::matcher::find_matches;
use std::collections::BTreeSet;

/// A swap of two cells. `first` is always the smaller position, so the same pair
/// clicked in either order builds the same move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub first: Pos,
    pub second: Pos,
    /// Score the swap would earn; only meaningful after [`Move::evaluate`].
    pub score: u32,
    /// Cells the swap would clear; only meaningful after [`Move::evaluate`].
    pub removed: BTreeSet<Pos>,
}

impl Move {
    pub fn new(a: Pos, b: Pos) -> Self {
        Self {
            first: a.min(b),
            second: a.max(b),
            score: 0,
            removed: BTreeSet::new(),
        }
    }

    /// Distinct, orthogonally neighbouring cells.
    #[inline]
    pub fn is_adjacent(&self) -> bool {
        self.first.is_adjacent(self.second)
    }

    /// Simulate the swap on a clone of `grid` and record what it would score.
    /// Returns true if the swap produces at least one run. `grid` is never touched.
    pub fn evaluate(&mut self, grid: &Grid) -> bool {
        self.score = 0;
        self.removed.clear();
        if !self.is_adjacent() || !grid.contains(self.first) || !grid.contains(self.second) {
            return false;
        }
        let mut scratch = grid.clone();
        self.apply(&mut scratch);
        let matches = find_matches(&scratch);
        self.score = matches.score;
        self.removed = matches.cells;
        self.score > 0
    }

    /// Exchange the two cells on `grid`.
    pub fn apply(&self, grid: &mut Grid) {
        grid.swap(self.first, self.second);
    }
}

/// Every adjacent pair exactly once: horizontal pairs row by row, then vertical pairs.
pub fn adjacent_pairs(size: usize) -> impl Iterator<Item = Move> {
    let horizontal = (0..size).flat_map(move |r| {
        (0..size.saturating_sub(1)).map(move |c| Move::new(Pos::new(r, c), Pos::new(r, c + 1)))
    });
    let vertical = (0..size.saturating_sub(1)).flat_map(move |r| {
        (0..size).map(move |c| Move::new(Pos::new(r, c), Pos::new(r + 1, c)))
    });
    horizontal.chain(vertical)
}

/// First swap (in [`adjacent_pairs`] order) that would produce a match, already evaluated.
pub fn find_legal_move(grid: &Grid) -> Option<Move> {
    adjacent_pairs(grid.size()).find_map(|mut m| m.evaluate(grid).then_some(m))
}

/// True if at least one single swap anywhere on the board produces a match.
pub fn has_legal_move(grid: &Grid) -> bool {
    find_legal_move(grid).is_some()
}
