//! Win probabilities and standings from finished ratings

pub mod matchup;
pub mod standings;

pub use matchup::{predict, predict_matchup, predict_rows, MatchupRequest, Prediction};
pub use standings::{standings, Standing};
