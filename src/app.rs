//! App: terminal init, main loop, tick and input forwarding.

use crate::input::{Action, BoardLayout, key_to_action, step_cursor};
use crate::theme::Theme;
use crate::ui::{self, View};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use gemtui::{ClickOutcome, GameConfig, GameState, Move, Pos, TickOutcome};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tachyonfx::Effect;
use tracing::{debug, info};

pub struct App {
    state: GameState,
    theme: Theme,
    wait: Duration,
    frame_duration: Duration,
    /// Keyboard cursor; mouse clicks move it too.
    cursor: Pos,
    /// Shown until the next click or the board changes.
    hint: Option<Move>,
    /// Board placement from the last drawn frame, for mapping mouse clicks.
    layout: Option<BoardLayout>,
    last_tick: Instant,
    /// TachyonFX fade for the frozen match (created when the pause starts).
    match_effect: Option<Effect>,
    /// Last time the match effect was processed (for delta).
    match_effect_time: Option<Instant>,
}

impl App {
    pub fn new(config: &GameConfig, theme: Theme, frame_rate: f64) -> Result<Self> {
        let state = GameState::new(config)?;
        let frame_duration = Duration::from_secs_f64(1.0 / frame_rate.clamp(1.0, 240.0));
        Ok(Self {
            state,
            theme,
            wait: config.wait,
            frame_duration,
            cursor: Pos::new(0, 0),
            hint: None,
            layout: None,
            last_tick: Instant::now(),
            match_effect: None,
            match_effect_time: None,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            event::{DisableMouseCapture, EnableMouseCapture},
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        // Restore even when the loop failed; report the loop's error first.
        let _ = execute!(std::io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        disable_raw_mode()?;
        info!(score = self.state.score(), "game closed");

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        self.last_tick = Instant::now();
        loop {
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_tick);
            self.last_tick = now;
            self.on_tick(elapsed);

            let size = self.state.grid().size();
            let mut drawn_area = None;
            terminal.draw(|f| {
                drawn_area = Some(f.area());
                let view = View {
                    theme: &self.theme,
                    cursor: self.cursor,
                    hint: self.hint.as_ref(),
                    wait: self.wait,
                };
                ui::draw(
                    f,
                    &self.state,
                    &view,
                    &mut self.match_effect,
                    &mut self.match_effect_time,
                    now,
                );
            })?;
            self.layout = drawn_area.map(|area| ui::board_layout(area, size));

            let timeout = self.frame_duration.saturating_sub(now.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    let keep_going = match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            self.on_action(key_to_action(key))
                        }
                        Event::Mouse(mouse) => {
                            if let Some(pos) = self.layout.and_then(|l| l.click_at(mouse)) {
                                self.cursor = pos;
                                self.click(pos);
                            }
                            true
                        }
                        _ => true,
                    };
                    if !keep_going {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn on_tick(&mut self, elapsed: Duration) {
        match self.state.tick(elapsed) {
            TickOutcome::Quiet | TickOutcome::Paused => {}
            TickOutcome::Regenerated => {
                self.hint = None;
                info!(score = self.state.score(), "board regenerated");
            }
            TickOutcome::MatchShown { gained } => {
                self.hint = None;
                debug!(gained, score = self.state.score(), "match shown");
            }
            TickOutcome::Resolved { cleared } => {
                debug!(cleared, "match resolved");
            }
        }
    }

    /// Returns false when the player asked to quit.
    fn on_action(&mut self, action: Action) -> bool {
        let size = self.state.grid().size();
        match action {
            Action::Quit => return false,
            Action::CursorUp | Action::CursorDown | Action::CursorLeft | Action::CursorRight => {
                self.cursor = step_cursor(self.cursor, action, size);
            }
            Action::Select => self.click(self.cursor),
            Action::Hint => {
                self.hint = self.state.hint();
                debug!(found = self.hint.is_some(), "hint requested");
            }
            Action::None => {}
        }
        true
    }

    fn click(&mut self, pos: Pos) {
        let outcome = self.state.click(pos);
        if !matches!(outcome, ClickOutcome::Ignored | ClickOutcome::Selected(_)) {
            self.hint = None;
        }
        debug!(?outcome, "click");
    }
}
