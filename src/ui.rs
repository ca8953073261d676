//! Render adapter: score bar, board, selection and cursor outlines, match strikes.

use crate::input::{BoardLayout, CELL_HEIGHT, CELL_WIDTH, HEADER_HEIGHT};
use crate::theme::Theme;
use gemtui::{Cell, GameState, Move, Phase, Pos};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use tachyonfx::{
    CellFilter, Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx, ref_count,
};

/// Outline glyphs for one cell: top row (left, fill, right), bottom row (left, fill, right).
type Outline = [(&'static str, &'static str, &'static str); 2];

const SELECTION_OUTLINE: Outline = [("┏", "━", "┓"), ("┗", "━", "┛")];
const CURSOR_OUTLINE: Outline = [("┌", "─", "┐"), ("└", "─", "┘")];
const HINT_OUTLINE: Outline = [("╭", "┄", "╮"), ("╰", "┄", "╯")];

/// Diagonal strike drawn across a matched cell, one string per terminal row.
const STRIKE: [&str; 2] = [" ╲╱ ", " ╱╲ "];

/// Outer size (with border and header) of a board of `size` x `size` cells.
pub fn frame_size(size: usize) -> (u16, u16) {
    let size = size as u16;
    (size * CELL_WIDTH + 2, size * CELL_HEIGHT + HEADER_HEIGHT + 2)
}

/// Outer rect of the board frame, centred in `area`.
fn frame_rect(area: Rect, size: usize) -> Rect {
    let (w, h) = frame_size(size);
    Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w.min(area.width),
        height: h.min(area.height),
    }
}

/// Where board cell (0, 0) lands for a terminal of `area`; used by the input adapter too.
pub fn board_layout(area: Rect, size: usize) -> BoardLayout {
    let outer = frame_rect(area, size);
    BoardLayout {
        x: outer.x + 1,
        y: outer.y + 1 + HEADER_HEIGHT,
        size,
    }
}

fn board_rect(layout: BoardLayout) -> Rect {
    let size = layout.size as u16;
    Rect {
        x: layout.x,
        y: layout.y,
        width: size * CELL_WIDTH,
        height: size * CELL_HEIGHT,
    }
}

/// Everything the front end owns that affects drawing, besides the game itself.
pub struct View<'a> {
    pub theme: &'a Theme,
    pub cursor: Pos,
    pub hint: Option<&'a Move>,
    pub wait: Duration,
}

/// Draw the whole screen. While a match is frozen, fades the matched cells with a
/// TachyonFX effect kept in `match_effect` / `match_effect_time` across frames.
pub fn draw(
    frame: &mut Frame,
    state: &GameState,
    view: &View<'_>,
    match_effect: &mut Option<Effect>,
    match_effect_time: &mut Option<Instant>,
    now: Instant,
) {
    let area = frame.area();
    let size = state.grid().size();
    let (w, h) = frame_size(size);
    if area.width < w || area.height < h {
        draw_too_small(frame, area, view.theme, w, h);
        return;
    }

    let layout = board_layout(area, size);
    let outer = frame_rect(area, size);
    let theme = view.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(" gemtui ", Style::default().fg(theme.title)))
        .title_bottom(Line::from(Span::styled(
            " click/enter select · arrows move · ? hint · q quit ",
            Style::default().fg(theme.div_line),
        )));
    let inner = block.inner(outer);
    block.render(outer, frame.buffer_mut());

    draw_header(frame.buffer_mut(), state, theme, inner);
    draw_board(frame.buffer_mut(), state, view, layout);

    let pending = state.pending_matches();
    if pending.is_empty() {
        *match_effect = None;
        *match_effect_time = None;
    } else {
        apply_match_effect(
            frame,
            pending,
            theme,
            layout,
            view.wait,
            match_effect,
            match_effect_time,
            now,
        );
        draw_strikes(frame.buffer_mut(), pending, theme, layout);
    }
}

fn draw_too_small(frame: &mut Frame, area: Rect, theme: &Theme, w: u16, h: u16) {
    let msg = format!("Terminal too small: need {}x{}", w, h);
    Paragraph::new(Line::from(Span::styled(msg, Style::default().fg(theme.main_fg))))
        .alignment(Alignment::Center)
        .render(area, frame.buffer_mut());
}

/// Score on the first header row, phase status on the second.
fn draw_header(buf: &mut Buffer, state: &GameState, theme: &Theme, inner: Rect) {
    let fg = Style::default().fg(theme.main_fg).bg(theme.bg);
    let row = |offset: u16| Rect {
        x: inner.x,
        y: inner.y + offset,
        width: inner.width,
        height: 1,
    };

    let mut score = vec![Span::styled(format!("Score {}", state.score()), fg.bold())];
    let gained = state.pending_score();
    if gained > 0 {
        score.push(Span::styled(
            format!("  +{}", gained),
            Style::default().fg(theme.title).bg(theme.bg).bold(),
        ));
    }
    Paragraph::new(Line::from(score))
        .alignment(Alignment::Right)
        .render(row(0), buf);

    let status = match state.phase() {
        Phase::Idle => "pick a gem".to_string(),
        Phase::Selecting(pos) => format!("swap {} with a neighbour", pos),
        Phase::MatchPending | Phase::MatchResolving => "match!".to_string(),
    };
    Paragraph::new(Line::from(Span::styled(status, fg)))
        .alignment(Alignment::Left)
        .render(row(1), buf);
}

fn draw_board(buf: &mut Buffer, state: &GameState, view: &View<'_>, layout: BoardLayout) {
    let theme = view.theme;
    let grid = state.grid();
    for pos in grid.positions() {
        let color = match grid.get(pos) {
            Some(Cell::Token(c)) => theme.token_color(c),
            _ => theme.bg,
        };
        let (x0, y0) = layout.origin_of(pos);
        for dy in 0..CELL_HEIGHT {
            for dx in 0..CELL_WIDTH {
                buf[(x0 + dx, y0 + dy)]
                    .set_symbol(" ")
                    .set_style(Style::default().bg(color));
            }
        }
    }

    if let Some(hint) = view.hint {
        for pos in [hint.first, hint.second] {
            draw_outline(buf, layout, pos, HINT_OUTLINE, theme.title);
        }
    }
    if state.accepting_input() {
        draw_outline(buf, layout, view.cursor, CURSOR_OUTLINE, theme.main_fg);
    }
    if let Some(selected) = state.selection() {
        draw_outline(buf, layout, selected, SELECTION_OUTLINE, theme.highlight);
    }
}

/// Outline drawn over the cell's own background so the token colour stays visible.
fn draw_outline(
    buf: &mut Buffer,
    layout: BoardLayout,
    pos: Pos,
    outline: Outline,
    color: ratatui::style::Color,
) {
    if pos.row >= layout.size || pos.col >= layout.size {
        return;
    }
    let (x0, y0) = layout.origin_of(pos);
    for (dy, (left, fill, right)) in outline.iter().enumerate() {
        let y = y0 + dy as u16 * (CELL_HEIGHT - 1);
        for dx in 0..CELL_WIDTH {
            let symbol = match dx {
                0 => left,
                d if d == CELL_WIDTH - 1 => right,
                _ => fill,
            };
            buf[(x0 + dx, y)].set_symbol(symbol).set_fg(color);
        }
    }
}

fn draw_strikes(buf: &mut Buffer, cells: &BTreeSet<Pos>, theme: &Theme, layout: BoardLayout) {
    for &pos in cells {
        let (x0, y0) = layout.origin_of(pos);
        for (dy, line) in STRIKE.iter().enumerate() {
            for (dx, ch) in line.chars().enumerate() {
                if ch != ' ' {
                    let mut tmp = [0u8; 4];
                    buf[(x0 + dx as u16, y0 + dy as u16)]
                        .set_symbol(ch.encode_utf8(&mut tmp))
                        .set_fg(theme.strike);
                }
            }
        }
    }
}

/// Create the fade effect on the first frozen frame and advance it on later ones.
fn apply_match_effect(
    frame: &mut Frame,
    cells: &BTreeSet<Pos>,
    theme: &Theme,
    layout: BoardLayout,
    wait: Duration,
    match_effect: &mut Option<Effect>,
    match_effect_time: &mut Option<Instant>,
    now: Instant,
) {
    let area = board_rect(layout);
    let delta = match_effect_time
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    *match_effect_time = Some(now);

    if match_effect.is_none() {
        let mut positions = std::collections::HashSet::new();
        for &pos in cells {
            let (x0, y0) = layout.origin_of(pos);
            for dy in 0..CELL_HEIGHT {
                for dx in 0..CELL_WIDTH {
                    positions.insert((x0 + dx, y0 + dy));
                }
            }
        }
        let filter = CellFilter::PositionFn(ref_count(move |p: Position| {
            positions.contains(&(p.x, p.y))
        }));
        let fade_ms = wait.as_millis().min(u32::MAX as u128) as u32;
        let effect = fx::fade_to(theme.bg, theme.bg, (fade_ms, Interpolation::Linear))
            .with_filter(filter)
            .with_area(area);
        *match_effect = Some(effect);
    }

    if let Some(effect) = match_effect {
        frame.render_effect(effect, area, TfxDuration::from_millis(delta_ms));
    }
}
