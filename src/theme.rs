//! Theme loading: btop-style `theme[key]="value"` files and hex → ratatui Color.

use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Number of token colours a theme provides.
pub const TOKEN_COLORS: usize = 7;

/// Board colours: one per token plus the UI chrome around the board.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Token colours, indexed by palette colour: white, red, yellow, green, blue, violet, orange.
    pub tokens: [Color; TOKEN_COLORS],
    /// Background and empty cells.
    pub bg: Color,
    /// Border lines.
    pub div_line: Color,
    /// Score and status text.
    pub main_fg: Color,
    pub title: Color,
    /// Selection outline and keyboard cursor.
    pub highlight: Color,
    /// Strike mark over matched tokens.
    pub strike: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// Theme keys for token colours, with built-in fallbacks.
const TOKEN_KEYS: [(&str, Color); TOKEN_COLORS] = [
    ("token_0", Color::Rgb(253, 253, 253)),
    ("token_1", Color::Rgb(235, 64, 52)),
    ("token_2", Color::Rgb(255, 251, 0)),
    ("token_3", Color::Rgb(0, 194, 16)),
    ("token_4", Color::Rgb(0, 112, 250)),
    ("token_5", Color::Rgb(212, 0, 250)),
    ("token_6", Color::Rgb(255, 162, 0)),
];

impl Default for Theme {
    fn default() -> Self {
        Self {
            tokens: TOKEN_KEYS.map(|(_, c)| c),
            bg: Color::Rgb(0, 0, 0),
            div_line: Color::Rgb(0x3F, 0x44, 0x4F),
            main_fg: Color::Rgb(255, 255, 255),
            title: Color::Rgb(0xE5, 0xC0, 0x7B),
            highlight: Color::Rgb(0x61, 0xAF, 0xEF),
            strike: Color::Rgb(0, 0, 0),
        }
    }
}

impl Theme {
    /// Load a btop-style file. Missing path or file gives the defaults for `palette`;
    /// keys the file does not set keep their default.
    pub fn load(path: Option<&Path>, palette: crate::Palette) -> Result<Self, ThemeError> {
        let mut theme = match path {
            Some(p) if p.exists() => {
                let s = std::fs::read_to_string(p)?;
                Self::from_map(&parse_theme_file(&s))?
            }
            _ => Self::default(),
        };
        theme.apply_palette(palette);
        Ok(theme)
    }

    /// Swap token colours for the high-contrast or colourblind sets.
    pub fn apply_palette(&mut self, palette: crate::Palette) {
        match palette {
            crate::Palette::Normal => {}
            crate::Palette::HighContrast => {
                self.tokens = [
                    Color::Rgb(0xFF, 0xFF, 0xFF),
                    Color::Rgb(0xFF, 0x00, 0x00),
                    Color::Rgb(0xFF, 0xFF, 0x00),
                    Color::Rgb(0x00, 0xFF, 0x00),
                    Color::Rgb(0x00, 0x88, 0xFF),
                    Color::Rgb(0xFF, 0x00, 0xFF),
                    Color::Rgb(0x00, 0xFF, 0xFF),
                ];
            }
            crate::Palette::Colorblind => {
                // Paul Tol's bright scheme plus white.
                self.tokens = [
                    Color::Rgb(0xFF, 0xFF, 0xFF),
                    Color::Rgb(0x00, 0x77, 0xBB),
                    Color::Rgb(0xEE, 0x77, 0x33),
                    Color::Rgb(0x00, 0x99, 0x88),
                    Color::Rgb(0xCC, 0x33, 0x11),
                    Color::Rgb(0xEE, 0x33, 0x77),
                    Color::Rgb(0xBB, 0xBB, 0x00),
                ];
            }
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Result<Self, ThemeError> {
        let mut theme = Self::default();
        for (i, (key, _)) in TOKEN_KEYS.iter().enumerate() {
            if let Some(v) = map.get(*key) {
                theme.tokens[i] = parse_hex(v)?;
            }
        }
        let chrome = [
            ("main_bg", &mut theme.bg),
            ("div_line", &mut theme.div_line),
            ("main_fg", &mut theme.main_fg),
            ("title", &mut theme.title),
            ("hi_fg", &mut theme.highlight),
            ("strike", &mut theme.strike),
        ];
        for (key, slot) in chrome {
            if let Some(v) = map.get(key) {
                *slot = parse_hex(v)?;
            }
        }
        Ok(theme)
    }

    /// Colour for a token; indices past the table wrap around.
    #[inline]
    pub fn token_color(&self, index: u8) -> Color {
        self.tokens[(index as usize) % TOKEN_COLORS]
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !value.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let digit = |range: std::ops::Range<usize>| {
        s.get(range)
            .and_then(|d| u8::from_str_radix(d, 16).ok())
            .ok_or_else(|| ThemeError::InvalidHex(s.to_string()))
    };
    match s.len() {
        6 => Ok(Color::Rgb(digit(0..2)?, digit(2..4)?, digit(4..6)?)),
        3 => Ok(Color::Rgb(
            digit(0..1)? * 17,
            digit(1..2)? * 17,
            digit(2..3)? * 17,
        )),
        _ => Err(ThemeError::InvalidHex(s.to_string())),
    }
}
