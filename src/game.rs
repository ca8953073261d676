//! Game state: live board, selection, score, and the show/clear/refill cascade.
//!
//! The driver calls [`GameState::tick`] once per frame with the measured elapsed
//! time and forwards board clicks to [`GameState::click`]. All mutation of the
//! live grid happens inside those two calls.

use crate::config::{ConfigError, GameConfig};
use crate::generator::{fill_empty, new_board};
use crate::grid::{Cell, Grid, Pos};
use crate::matcher::{Matches, find_matches};
use crate::moves::{Move, find_legal_move, has_legal_move};
use crate::rng::GemRng;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Where the turn flow currently is, as seen by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting input, nothing selected.
    Idle,
    /// One cell chosen, waiting for the second.
    Selecting(Pos),
    /// A match was scored; input frozen while the pause timer runs.
    MatchPending,
    /// Pause elapsed; the next tick clears and refills.
    MatchResolving,
}

/// What a click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Input frozen, or the position is off the board.
    Ignored,
    Selected(Pos),
    /// Second click on the selected cell.
    Deselected,
    /// Second click too far from the first; nothing swapped.
    NotAdjacent,
    /// Adjacent swap that would not make a run; board untouched.
    Rejected(Move),
    /// Swap committed to the live board.
    Swapped(Move),
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No match on the board.
    Quiet,
    /// No legal move was left; a fresh board replaced the old one.
    Regenerated,
    /// A match was found and scored; input is now frozen.
    MatchShown { gained: u32 },
    /// Pause still running.
    Paused,
    /// Matched cells cleared and the board refilled; input accepted again.
    Resolved { cleared: usize },
}

#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    score: u32,
    selection: Option<Pos>,
    accepting_input: bool,
    /// Countdown for the show-match pause; zero when not running.
    timer: Duration,
    /// Latest scan of the live grid.
    matches: Matches,
    rng: GemRng,
    palette: u8,
    wait: Duration,
    boards_generated: u32,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = config.seed.map_or_else(GemRng::from_random, GemRng::new);
        let grid = new_board(config.board_size, config.palette, &mut rng);
        info!(
            seed = rng.seed(),
            size = config.board_size,
            palette = config.palette,
            "new game"
        );
        let mut state = Self::from_grid(grid, config, rng);
        state.boards_generated = 1;
        Ok(state)
    }

    /// Start from a prepared board. Board size comes from `grid`; palette and pause from `config`.
    pub fn from_grid(grid: Grid, config: &GameConfig, rng: GemRng) -> Self {
        Self {
            grid,
            score: 0,
            selection: None,
            accepting_input: true,
            timer: Duration::ZERO,
            matches: Matches::default(),
            rng,
            palette: config.palette,
            wait: config.wait,
            boards_generated: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selection(&self) -> Option<Pos> {
        self.selection
    }

    pub fn accepting_input(&self) -> bool {
        self.accepting_input
    }

    /// Remaining pause before the current match is cleared.
    pub fn timer(&self) -> Duration {
        self.timer
    }

    /// Boards dealt so far, counting the first one and every regeneration.
    pub fn boards_generated(&self) -> u32 {
        self.boards_generated
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn phase(&self) -> Phase {
        if !self.accepting_input {
            if self.timer.is_zero() {
                Phase::MatchResolving
            } else {
                Phase::MatchPending
            }
        } else if let Some(pos) = self.selection {
            Phase::Selecting(pos)
        } else {
            Phase::Idle
        }
    }

    /// Cells about to be cleared; empty unless input is frozen on a match.
    pub fn pending_matches(&self) -> &BTreeSet<Pos> {
        static NONE: BTreeSet<Pos> = BTreeSet::new();
        if self.accepting_input {
            &NONE
        } else {
            &self.matches.cells
        }
    }

    /// Points the frozen match earned; zero while accepting input.
    pub fn pending_score(&self) -> u32 {
        if self.accepting_input {
            0
        } else {
            self.matches.score
        }
    }

    /// A swap that would score right now, if input is open and one exists.
    pub fn hint(&self) -> Option<Move> {
        if !self.accepting_input {
            return None;
        }
        find_legal_move(&self.grid)
    }

    /// First or second half of a swap gesture.
    pub fn click(&mut self, pos: Pos) -> ClickOutcome {
        if !self.accepting_input || !self.grid.contains(pos) {
            return ClickOutcome::Ignored;
        }
        let Some(selected) = self.selection.take() else {
            self.selection = Some(pos);
            trace!(%pos, "selected");
            return ClickOutcome::Selected(pos);
        };
        if selected == pos {
            return ClickOutcome::Deselected;
        }
        if !selected.is_adjacent(pos) {
            return ClickOutcome::NotAdjacent;
        }
        let mut mv = Move::new(selected, pos);
        if mv.evaluate(&self.grid) {
            mv.apply(&mut self.grid);
            debug!(first = %mv.first, second = %mv.second, score = mv.score, "swap committed");
            ClickOutcome::Swapped(mv)
        } else {
            trace!(first = %mv.first, second = %mv.second, "swap rejected");
            ClickOutcome::Rejected(mv)
        }
    }

    /// Advance the turn flow by `elapsed` wall-clock time.
    pub fn tick(&mut self, elapsed: Duration) -> TickOutcome {
        self.timer = self.timer.saturating_sub(elapsed);

        let regenerated = !has_legal_move(&self.grid);
        if regenerated {
            self.regenerate();
        }

        self.matches = find_matches(&self.grid);
        if self.matches.is_empty() {
            return if regenerated {
                TickOutcome::Regenerated
            } else {
                TickOutcome::Quiet
            };
        }
        if !self.timer.is_zero() {
            return TickOutcome::Paused;
        }

        if self.accepting_input {
            let gained = self.matches.score;
            self.score = self.score.saturating_add(gained);
            self.accepting_input = false;
            self.timer = self.wait;
            debug!(
                gained,
                total = self.score,
                cells = self.matches.cells.len(),
                "match"
            );
            TickOutcome::MatchShown { gained }
        } else {
            let cleared = self.matches.cells.len();
            for &pos in &self.matches.cells {
                self.grid.set(pos, Cell::Empty);
            }
            fill_empty(&mut self.grid, self.palette, &mut self.rng);
            self.matches = Matches::default();
            self.accepting_input = true;
            trace!(cleared, "cleared and refilled");
            TickOutcome::Resolved { cleared }
        }
    }

    /// Deal a fresh board. Score is kept; selection and any frozen match are dropped.
    fn regenerate(&mut self) {
        self.grid = new_board(self.grid.size(), self.palette, &mut self.rng);
        self.selection = None;
        self.accepting_input = true;
        self.timer = Duration::ZERO;
        self.matches = Matches::default();
        self.boards_generated += 1;
        info!(
            score = self.score,
            boards = self.boards_generated,
            "no moves left, new board"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn config() -> GameConfig {
        GameConfig {
            seed: Some(11),
            ..GameConfig::default()
        }
    }

    /// Colour 0 at (0, 0) and (0, 1), colour 1 at (0, 2), colour 0 at (1, 2).
    fn one_swap_board() -> Grid {
        Grid::from_rows(&[
            &[Some(0), Some(0), Some(1), Some(2)],
            &[Some(3), Some(4), Some(0), Some(5)],
            &[Some(1), Some(2), Some(3), Some(4)],
            &[Some(5), Some(6), Some(5), Some(6)],
        ])
    }

    fn deadlock_board() -> Grid {
        let rows: Vec<Vec<Option<u8>>> = (0..6)
            .map(|r| (0..6).map(|c| Some(((r + c) % 4) as u8)).collect())
            .collect();
        let refs: Vec<&[Option<u8>]> = rows.iter().map(Vec::as_slice).collect();
        Grid::from_rows(&refs)
    }

    fn state(grid: Grid) -> GameState {
        GameState::from_grid(grid, &config(), GemRng::new(3))
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let bad = GameConfig {
            board_size: 1,
            ..GameConfig::default()
        };
        assert!(GameState::new(&bad).is_err());
    }

    #[test]
    fn test_new_board_is_quiet_and_seeded() {
        let a = GameState::new(&config()).unwrap();
        let b = GameState::new(&config()).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.seed(), 11);
        assert_eq!(a.boards_generated(), 1);
        assert_eq!(find_matches(a.grid()).score, 0);
        assert_eq!(a.phase(), Phase::Idle);
    }

    #[test]
    fn test_swap_match_clear_refill() {
        let mut s = state(one_swap_board());
        assert_eq!(s.click(Pos::new(0, 2)), ClickOutcome::Selected(Pos::new(0, 2)));
        assert_eq!(s.phase(), Phase::Selecting(Pos::new(0, 2)));

        let ClickOutcome::Swapped(mv) = s.click(Pos::new(1, 2)) else {
            panic!("swap should have been committed");
        };
        assert_eq!(mv.score, 10);
        assert_eq!(s.selection(), None);
        // Scoring happens on the tick, not on the click.
        assert_eq!(s.score(), 0);
        assert_eq!(s.grid().get(Pos::new(0, 2)), Some(Cell::Token(0)));
        assert_eq!(s.grid().get(Pos::new(1, 2)), Some(Cell::Token(1)));

        assert_eq!(s.tick(FRAME), TickOutcome::MatchShown { gained: 10 });
        assert_eq!(s.score(), 10);
        assert!(!s.accepting_input());
        assert_eq!(s.phase(), Phase::MatchPending);
        let expected: BTreeSet<Pos> = [Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)].into();
        assert_eq!(s.pending_matches(), &expected);
        assert_eq!(s.pending_score(), 10);

        assert_eq!(s.click(Pos::new(3, 3)), ClickOutcome::Ignored);
        assert_eq!(s.selection(), None);

        assert_eq!(s.tick(Duration::from_millis(200)), TickOutcome::Paused);
        assert_eq!(s.score(), 10);

        assert_eq!(
            s.tick(Duration::from_millis(300)),
            TickOutcome::Resolved { cleared: 3 }
        );
        assert!(s.accepting_input());
        assert_eq!(s.score(), 10);
        assert_eq!(s.grid().empty_count(), 0);
        assert!(s.pending_matches().is_empty());
        // Rows below the cleared run keep their tokens.
        assert_eq!(s.grid().get(Pos::new(1, 2)), Some(Cell::Token(1)));
        assert_eq!(s.grid().get(Pos::new(3, 1)), Some(Cell::Token(6)));
    }

    #[test]
    fn test_cascade_scores_again() {
        // Clearing row 4's run drops column 2's colour 1 next to the 1, 1 in row 4.
        let grid = Grid::from_rows(&[
            &[Some(1), Some(2), Some(3), Some(4), Some(2)],
            &[Some(3), Some(4), Some(2), Some(1), Some(3)],
            &[Some(2), Some(1), Some(4), Some(3), Some(4)],
            &[Some(2), Some(3), Some(1), Some(4), Some(2)],
            &[Some(0), Some(0), Some(0), Some(1), Some(1)],
        ]);
        let mut s = state(grid);
        assert_eq!(s.tick(FRAME), TickOutcome::MatchShown { gained: 10 });
        assert_eq!(
            s.tick(crate::config::DEFAULT_WAIT),
            TickOutcome::Resolved { cleared: 3 }
        );
        let TickOutcome::MatchShown { gained } = s.tick(FRAME) else {
            panic!("refill should have cascaded");
        };
        assert!(gained >= 10);
        assert_eq!(s.score(), 10 + gained);
        assert!(s.pending_matches().contains(&Pos::new(4, 4)));
    }

    #[test]
    fn test_same_cell_twice_is_noop() {
        let mut s = state(one_swap_board());
        let before = s.grid().clone();
        s.click(Pos::new(1, 1));
        assert_eq!(s.click(Pos::new(1, 1)), ClickOutcome::Deselected);
        assert_eq!(s.grid(), &before);
        assert_eq!(s.score(), 0);
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn test_non_adjacent_cancels_selection() {
        let mut s = state(one_swap_board());
        let before = s.grid().clone();
        s.click(Pos::new(0, 0));
        assert_eq!(s.click(Pos::new(2, 2)), ClickOutcome::NotAdjacent);
        assert_eq!(s.selection(), None);
        assert_eq!(s.grid(), &before);
    }

    #[test]
    fn test_rejected_swap_leaves_board() {
        let mut s = state(one_swap_board());
        let before = s.grid().clone();
        s.click(Pos::new(2, 0));
        assert!(matches!(s.click(Pos::new(3, 0)), ClickOutcome::Rejected(_)));
        assert_eq!(s.grid(), &before);
        assert_eq!(s.selection(), None);
        assert_eq!(s.tick(FRAME), TickOutcome::Quiet);
    }

    #[test]
    fn test_off_board_click_ignored() {
        let mut s = state(one_swap_board());
        assert_eq!(s.click(Pos::new(0, 9)), ClickOutcome::Ignored);
        assert_eq!(s.selection(), None);
    }

    #[test]
    fn test_deadlock_regenerates_and_keeps_score() {
        let mut s = state(deadlock_board());
        s.score = 40;
        s.selection = Some(Pos::new(0, 0));
        assert_eq!(s.tick(FRAME), TickOutcome::Regenerated);
        assert_eq!(s.score(), 40);
        assert_eq!(s.grid().size(), 6);
        assert_ne!(s.grid(), &deadlock_board());
        assert_eq!(s.selection(), None);
        assert_eq!(s.boards_generated(), 1);
        assert_eq!(find_matches(s.grid()).score, 0);
    }

    #[test]
    fn test_hint_only_when_accepting() {
        let mut s = state(one_swap_board());
        let hint = s.hint().unwrap();
        assert!(hint.score > 0);
        s.click(Pos::new(0, 2));
        s.click(Pos::new(1, 2));
        s.tick(FRAME);
        assert_eq!(s.hint(), None);
    }
}
