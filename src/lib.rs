//! Season Elo - iterative team ratings across seasons of games
//!
//! This crate rates teams from seasons of pairwise win/loss results with
//! either a game-by-game or a season-wide batch Elo engine, regresses ratings
//! toward a baseline between seasons, and turns the ratings into win
//! probabilities for future matchups.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod predict;
pub mod rating;
pub mod season;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use pipeline::RatingPipeline;
pub use predict::{predict, predict_matchup, MatchupRequest};
pub use rating::{expected_score, BatchEngine, RatingEngine, RatingStore, SequentialEngine};
pub use season::Season;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
