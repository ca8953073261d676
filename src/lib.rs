//! gemtui core: a match-three board simulation.
//!
//! Swap two adjacent tokens; runs of three or more of one colour score, freeze
//! on screen for a moment, then clear. Tokens above fall into the holes and
//! fresh ones fill the top, which can cascade into further matches. When no
//! single swap can make a run the board is dealt again.

pub mod config;
pub mod game;
pub mod generator;
pub mod grid;
pub mod matcher;
pub mod moves;
pub mod rng;

pub use config::{ConfigError, GameConfig};
pub use game::{ClickOutcome, GameState, Phase, TickOutcome};
pub use grid::{Cell, Grid, Pos};
pub use matcher::{Matches, find_matches};
pub use moves::{Move, find_legal_move, has_legal_move};
pub use rng::GemRng;
