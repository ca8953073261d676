//! gemtui: match-three tile puzzle in the terminal.

mod app;
mod input;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use gemtui::GameConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let theme = theme::Theme::load(args.theme.as_deref(), args.palette)
        .with_context(|| format!("loading theme {:?}", args.theme))?;
    let config = GameConfig {
        board_size: args.size,
        palette: args.colors,
        wait: Duration::from_millis(args.wait_ms),
        seed: args.seed,
    };
    config.validate()?;
    info!(?config, "starting");

    let mut app = App::new(&config, theme, args.frame_rate)?;
    app.run()?;
    Ok(())
}

/// Log to a file: stdout belongs to the terminal UI.
fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Match-three puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "gemtui",
    version,
    about = "Match-three puzzle in the terminal. Swap adjacent gems to line up three or more of a colour.",
    long_about = "gemtui is a terminal match-three puzzle.\n\n\
        Click a gem, then click a neighbour to swap them. A swap is only allowed if it \
        lines up three or more gems of one colour in a row or column. Matches score, pause \
        briefly, then clear; gems above fall down and new ones drop in, which can chain into \
        further matches. When no swap can make a match, a new board is dealt.\n\n\
        CONTROLS:\n  Mouse click         Select / swap\n  Arrows or hjkl      Move cursor\n  \
        Enter / Space       Select / swap at cursor\n  ?                   Show a hint\n  \
        q / Esc / Ctrl-C    Quit\n\n\
        Scoring: a run of 3 scores 10, 4 scores 30, 5 scores 60."
)]
pub struct Args {
    /// Board width and height in cells.
    #[arg(short, long, default_value = "8", value_name = "N")]
    pub size: usize,

    /// Number of gem colours in play (2..=7).
    #[arg(short, long, default_value = "7", value_name = "N")]
    pub colors: u8,

    /// Pause in ms between showing a match and clearing it.
    #[arg(long, default_value = "500", value_name = "MS")]
    pub wait_ms: u64,

    /// Fixed random seed, for replaying the same boards.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Path to theme file (btop-style theme[key]=\"value\"; keys token_0..token_6, main_bg, hi_fg, ...).
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Target render frames per second.
    #[arg(long, default_value = "30.0", value_name = "RATE")]
    pub frame_rate: f64,

    /// Where to write the log (RUST_LOG sets the level).
    #[arg(long, default_value = "gemtui.log", value_name = "FILE")]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["gemtui"]);
        assert_eq!(args.size, 8);
        assert_eq!(args.colors, 7);
        assert_eq!(args.wait_ms, 500);
        assert_eq!(args.palette, Palette::Normal);
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_cli_palette_alias() {
        let args = Args::parse_from(["gemtui", "--palette", "colourblind", "--seed", "7"]);
        assert_eq!(args.palette, Palette::Colorblind);
        assert_eq!(args.seed, Some(7));
    }
}
