//! Season-wide pairwise-expectation engine
//!
//! Each team gets exactly one update per season: its win total compared with
//! the sum of its per-game win probabilities. Every team is computed from the
//! same pre-season snapshot, so the order teams are visited in never matters.

use crate::error::{RatingError, Result};
use crate::rating::elo::{elo_update, expected_score, regress_to_baseline};
use crate::rating::engine::{parse_config, validate_common, RatingEngine};
use crate::rating::storage::RatingStore;
use crate::season::Season;
use crate::types::TeamKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Configuration for the batch engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Rating points at stake per unit of surprise
    pub k_factor: f64,
    /// Share of the updated rating kept after regression
    pub carry_over: f64,
    /// Rating every team is pulled toward
    pub baseline: f64,
    /// Points credited per win away from home (away or neutral site)
    pub away_win_bonus: f64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            k_factor: 10.0,
            carry_over: 0.75,
            baseline: 1505.0,
            away_win_bonus: 5.0,
        }
    }
}

impl BatchConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        validate_common(self.k_factor, self.carry_over, self.baseline)?;

        if !self.away_win_bonus.is_finite() || self.away_win_bonus < 0.0 {
            return Err(
                RatingError::config("Away win bonus must be a non-negative number").into(),
            );
        }

        Ok(())
    }
}

/// Per-team aggregates a batch update is computed from
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonAggregates<T: TeamKey> {
    pub opponents: BTreeMap<T, Vec<T>>,
    pub wins: BTreeMap<T, u32>,
    pub non_home_wins: BTreeMap<T, u32>,
}

impl<T: TeamKey> SeasonAggregates<T> {
    pub fn from_season(season: &Season<T>) -> Self {
        Self {
            opponents: season.opponents(),
            wins: season.wins(),
            non_home_wins: season.non_home_wins(),
        }
    }

    pub fn teams(&self) -> impl Iterator<Item = &T> {
        self.opponents.keys()
    }
}

/// Breakdown of one team's batch update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamUpdate {
    pub actual: f64,
    pub expected: f64,
    pub location_advantage: f64,
    pub rating: f64,
}

/// Pairwise-expectation Elo engine
#[derive(Debug, Clone)]
pub struct BatchEngine {
    config: BatchConfig,
}

impl Default for BatchEngine {
    fn default() -> Self {
        Self {
            config: BatchConfig::default(),
        }
    }
}

impl BatchEngine {
    /// Create a new batch engine
    pub fn new(config: BatchConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn settings(&self) -> &BatchConfig {
        &self.config
    }

    /// Compute one team's new rating from the pre-season snapshot
    pub fn team_update<T: TeamKey>(
        &self,
        snapshot: &RatingStore<T>,
        aggregates: &SeasonAggregates<T>,
        team: &T,
    ) -> Result<TeamUpdate> {
        let rating = snapshot.get(team)?;

        let mut expected = 0.0;
        for opponent in aggregates.opponents.get(team).into_iter().flatten() {
            expected += expected_score(rating, snapshot.get(opponent)?);
        }

        let actual = f64::from(aggregates.wins.get(team).copied().unwrap_or(0));
        let location_advantage = self.config.away_win_bonus
            * f64::from(aggregates.non_home_wins.get(team).copied().unwrap_or(0));

        let updated = elo_update(rating, expected, actual, self.config.k_factor);
        let new_rating =
            regress_to_baseline(updated, self.config.carry_over, self.config.baseline)
                + location_advantage;

        if !new_rating.is_finite() {
            return Err(RatingError::NonFiniteRating {
                team: team.to_string(),
                value: new_rating,
            }
            .into());
        }

        debug!(
            "{}: {} wins vs {:.3} expected, location advantage {}, {:.2} -> {:.2}",
            team, actual, expected, location_advantage, rating, new_rating
        );

        Ok(TeamUpdate {
            actual,
            expected,
            location_advantage,
            rating: new_rating,
        })
    }

    /// New ratings for `teams`, all read from the same snapshot
    pub fn compute_ratings<'a, T: TeamKey + 'a>(
        &self,
        snapshot: &RatingStore<T>,
        aggregates: &SeasonAggregates<T>,
        teams: impl IntoIterator<Item = &'a T>,
    ) -> Result<BTreeMap<T, f64>> {
        teams
            .into_iter()
            .map(|team| {
                self.team_update(snapshot, aggregates, team)
                    .map(|update| (team.clone(), update.rating))
            })
            .collect()
    }
}

impl<T: TeamKey> RatingEngine<T> for BatchEngine {
    fn name(&self) -> &'static str {
        "batch"
    }

    fn rate_season(
        &self,
        ratings: &RatingStore<T>,
        season: &Season<T>,
    ) -> Result<RatingStore<T>> {
        let aggregates = SeasonAggregates::from_season(season);
        ratings.ensure_rated(aggregates.teams())?;

        let new_ratings = self.compute_ratings(ratings, &aggregates, aggregates.teams())?;

        let mut updated = ratings.clone();
        for (team, rating) in new_ratings {
            updated.set(team, rating)?;
        }

        info!(
            "Rated season {} in batch: {} games, {} teams",
            season.year(),
            season.games().len(),
            aggregates.opponents.len()
        );

        Ok(updated)
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    fn update_config(&mut self, config: serde_json::Value) -> Result<()> {
        let new_config: BatchConfig = parse_config("batch", config)?;

        new_config.validate()?;
        self.config = new_config;
        Ok(())
    }
}
