//! Game parameters and their validation.

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BOARD_SIZE: usize = 8;
pub const DEFAULT_PALETTE: u8 = 7;
/// Pause between showing a match and clearing it.
pub const DEFAULT_WAIT: Duration = Duration::from_millis(500);

pub const MIN_BOARD_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 16;
pub const MIN_PALETTE: u8 = 2;
/// Themes carry exactly this many token colours.
pub const MAX_PALETTE: u8 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub palette: u8,
    pub wait: Duration,
    /// Fixed RNG seed; None draws one from the OS.
    pub seed: Option<u64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board size {0} out of range (3..=16)")]
    BoardSize(usize),
    #[error("palette of {0} colours out of range (2..=7)")]
    Palette(u8),
    #[error("match pause must be longer than zero")]
    ZeroWait,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            palette: DEFAULT_PALETTE,
            wait: DEFAULT_WAIT,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if !(MIN_PALETTE..=MAX_PALETTE).contains(&self.palette) {
            return Err(ConfigError::Palette(self.palette));
        }
        if self.wait.is_zero() {
            return Err(ConfigError::ZeroWait);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let bad_size = GameConfig {
            board_size: 2,
            ..GameConfig::default()
        };
        assert_eq!(bad_size.validate(), Err(ConfigError::BoardSize(2)));

        let bad_palette = GameConfig {
            palette: 8,
            ..GameConfig::default()
        };
        assert_eq!(bad_palette.validate(), Err(ConfigError::Palette(8)));

        let no_wait = GameConfig {
            wait: Duration::ZERO,
            ..GameConfig::default()
        };
        assert_eq!(no_wait.validate(), Err(ConfigError::ZeroWait));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            ConfigError::BoardSize(40).to_string(),
            "board size 40 out of range (3..=16)"
        );
    }
}
