//! Input adapter: key bindings and terminal-cell → board-cell translation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use gemtui::Pos;

/// Terminal columns per board cell.
pub const CELL_WIDTH: u16 = 4;
/// Terminal rows per board cell.
pub const CELL_HEIGHT: u16 = 2;
/// Rows reserved above the board for the score bar (inside the border).
pub const HEADER_HEIGHT: u16 = 2;

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Click the cell under the keyboard cursor.
    Select,
    Hint,
    Quit,
    None,
}

/// Map key event to game action. Supports both arrows and vim-style hjkl.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent {
        code, modifiers, ..
    } = key;
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Action::Quit;
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => Action::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => Action::CursorDown,
        KeyCode::Left | KeyCode::Char('h') => Action::CursorLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::CursorRight,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Select,
        KeyCode::Char('?') => Action::Hint,
        _ => Action::None,
    }
}

/// Where the board sits on screen: top-left terminal cell of board cell (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub x: u16,
    pub y: u16,
    pub size: usize,
}

impl BoardLayout {
    /// Board cell under terminal position (column, row), if any.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Pos> {
        if column < self.x || row < self.y {
            return None;
        }
        let col = ((column - self.x) / CELL_WIDTH) as usize;
        let r = ((row - self.y) / CELL_HEIGHT) as usize;
        (r < self.size && col < self.size).then(|| Pos::new(r, col))
    }

    /// Board cell for a left-button press; other mouse events are dropped.
    pub fn click_at(&self, mouse: MouseEvent) -> Option<Pos> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.cell_at(mouse.column, mouse.row),
            _ => None,
        }
    }

    /// Top-left terminal position of a board cell.
    pub fn origin_of(&self, pos: Pos) -> (u16, u16) {
        (
            self.x + pos.col as u16 * CELL_WIDTH,
            self.y + pos.row as u16 * CELL_HEIGHT,
        )
    }
}

/// Move the keyboard cursor one step, clamped to the board.
pub fn step_cursor(cursor: Pos, action: Action, size: usize) -> Pos {
    let last = size.saturating_sub(1);
    match action {
        Action::CursorUp => Pos::new(cursor.row.saturating_sub(1), cursor.col),
        Action::CursorDown => Pos::new((cursor.row + 1).min(last), cursor.col),
        Action::CursorLeft => Pos::new(cursor.row, cursor.col.saturating_sub(1)),
        Action::CursorRight => Pos::new(cursor.row, (cursor.col + 1).min(last)),
        _ => cursor,
    }
}
