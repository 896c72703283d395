//! Rating engine trait and engine selection
//!
//! Both season engines sit behind [`RatingEngine`] so the pipeline can thread
//! a rating store through seasons without knowing which variant it runs.

use crate::error::{RatingError, Result};
use crate::rating::storage::RatingStore;
use crate::season::Season;
use crate::types::TeamKey;
use serde::{Deserialize, Serialize};

/// Trait for turning one season of games into updated ratings
pub trait RatingEngine<T: TeamKey>: Send + Sync {
    /// Short name used in logs and configuration
    fn name(&self) -> &'static str;

    /// Rate a full season
    ///
    /// # Arguments
    /// * `ratings` - Ratings going into the season; every team in `season`
    ///   must already have one
    /// * `season` - The season's games in the order they were played
    ///
    /// # Returns
    /// The ratings after the season, including season-end regression. The
    /// input store is never modified, so a failure leaves it as it was.
    fn rate_season(&self, ratings: &RatingStore<T>, season: &Season<T>)
        -> Result<RatingStore<T>>;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Update configuration from JSON
    fn update_config(&mut self, config: serde_json::Value) -> Result<()>;
}

/// Which season engine to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Game-by-game updates followed by regression
    Sequential,
    /// One update per team from season-wide expectations
    Batch,
}

impl Default for EngineKind {
    fn default() -> Self {
        EngineKind::Sequential
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Sequential => write!(f, "sequential"),
            EngineKind::Batch => write!(f, "batch"),
        }
    }
}

impl std::str::FromStr for EngineKind {
    type Err = RatingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" | "game_by_game" | "game-by-game" => Ok(EngineKind::Sequential),
            "batch" | "pairwise" => Ok(EngineKind::Batch),
            other => Err(RatingError::config(format!("Unknown engine: {}", other))),
        }
    }
}

/// Parse a JSON config value, mapping failures to a configuration error
pub(crate) fn parse_config<C: serde::de::DeserializeOwned>(
    engine: &str,
    config: serde_json::Value,
) -> Result<C> {
    serde_json::from_value(config).map_err(|e| {
        RatingError::config(format!("Invalid {} configuration: {}", engine, e)).into()
    })
}

/// Checks shared by both engine configurations
pub(crate) fn validate_common(k_factor: f64, carry_over: f64, baseline: f64) -> Result<()> {
    if !k_factor.is_finite() || k_factor <= 0.0 {
        return Err(RatingError::config("K-factor must be positive").into());
    }

    if !(0.0..=1.0).contains(&carry_over) {
        return Err(RatingError::config("Carry-over must be between 0 and 1").into());
    }

    if !baseline.is_finite() {
        return Err(RatingError::config("Baseline must be finite").into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_kind_parsing() {
        assert_eq!("batch".parse::<EngineKind>().unwrap(), EngineKind::Batch);
        assert_eq!(
            "Game-By-Game".parse::<EngineKind>().unwrap(),
            EngineKind::Sequential
        );
        assert!("glicko".parse::<EngineKind>().is_err());
    }

    #[test]
    fn test_engine_kind_display_round_trip() {
        for kind in [EngineKind::Sequential, EngineKind::Batch] {
            assert_eq!(kind.to_string().parse::<EngineKind>().unwrap(), kind);
        }
        assert_eq!(EngineKind::default(), EngineKind::Sequential);
    }

    #[test]
    fn test_engine_kind_serde() {
        let json = serde_json::to_string(&EngineKind::Batch).unwrap();
        assert_eq!(json, "\"batch\"");
    }
}
