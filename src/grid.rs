//! Board data model: cells, positions, and the square grid that owns them.

use std::fmt;

/// Grid coordinate. Ordering is lexicographic: row first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True if `other` is exactly one step away horizontally or vertically.
    pub fn is_adjacent(self, other: Self) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Single cell: either a token of a palette colour or a hole left by a clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Token(u8),
}

impl Cell {
    /// Colour index, or None for an empty cell.
    #[inline]
    pub fn color(self) -> Option<u8> {
        match self {
            Self::Token(c) => Some(c),
            Self::Empty => None,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    /// Same-colour test used by matching. Empty never matches anything, itself included.
    #[inline]
    pub fn same_color(self, other: Self) -> bool {
        matches!((self, other), (Self::Token(a), Self::Token(b)) if a == b)
    }
}

/// Square board, stored row-major. Row 0 is the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-empty board of `size` x `size`.
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Build a board from rows of colour indices; `None` becomes an empty cell.
    /// Rows shorter than the first row are padded with empties, extra columns are dropped.
    pub fn from_rows(rows: &[&[Option<u8>]]) -> Self {
        let size = rows.len();
        let mut grid = Self::empty(size);
        for (r, row) in rows.iter().enumerate() {
            for (c, v) in row.iter().take(size).enumerate() {
                grid.set(Pos::new(r, c), v.map_or(Cell::Empty, Cell::Token));
            }
        }
        grid
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Cell at `pos`, or None when out of bounds.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        if !self.contains(pos) {
            return None;
        }
        self.cells.get(pos.row * self.size + pos.col).copied()
    }

    /// Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        if self.contains(pos) {
            self.cells[pos.row * self.size + pos.col] = cell;
        }
    }

    /// Exchange two cells. No-op if either position is off the board.
    pub fn swap(&mut self, a: Pos, b: Pos) {
        if self.contains(a) && self.contains(b) {
            self.cells
                .swap(a.row * self.size + a.col, b.row * self.size + b.col);
        }
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let size = self.size;
        (0..size).flat_map(move |r| (0..size).map(move |c| Pos::new(r, c)))
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }
}

impl fmt::Display for Grid {
    /// One line per row; tokens as their colour digit, holes as `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                match self.cells[r * self.size + c] {
                    Cell::Token(v) => write!(f, "{}", v)?,
                    Cell::Empty => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_ordering_is_row_major() {
        assert!(Pos::new(0, 5) < Pos::new(1, 0));
        assert!(Pos::new(2, 1) < Pos::new(2, 3));
    }

    #[test]
    fn test_adjacency() {
        let p = Pos::new(3, 3);
        assert!(p.is_adjacent(Pos::new(2, 3)));
        assert!(p.is_adjacent(Pos::new(3, 4)));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Pos::new(4, 4)));
        assert!(!p.is_adjacent(Pos::new(3, 5)));
    }

    #[test]
    fn test_empty_never_matches() {
        assert!(!Cell::Empty.same_color(Cell::Empty));
        assert!(!Cell::Empty.same_color(Cell::Token(0)));
        assert!(Cell::Token(4).same_color(Cell::Token(4)));
        assert!(!Cell::Token(4).same_color(Cell::Token(3)));
    }

    #[test]
    fn test_get_out_of_bounds_is_none() {
        let g = Grid::empty(4);
        assert_eq!(g.get(Pos::new(0, 4)), None);
        assert_eq!(g.get(Pos::new(4, 0)), None);
        assert_eq!(g.get(Pos::new(3, 3)), Some(Cell::Empty));
    }

    #[test]
    fn test_swap_and_from_rows() {
        let mut g = Grid::from_rows(&[
            &[Some(0), Some(1), None],
            &[Some(2), Some(3), Some(4)],
            &[Some(5), Some(6), Some(0)],
        ]);
        assert_eq!(g.empty_count(), 1);
        g.swap(Pos::new(0, 0), Pos::new(0, 1));
        assert_eq!(g.get(Pos::new(0, 0)), Some(Cell::Token(1)));
        assert_eq!(g.get(Pos::new(0, 1)), Some(Cell::Token(0)));
        assert_eq!(g.to_string(), "10.\n234\n560\n");
    }
}
