//! Game-by-game season engine
//!
//! Games are applied strictly in the order they were played, each one seeing
//! the ratings left behind by the previous game. Every team that played is
//! regressed toward the baseline once the season is over.

use crate::error::{RatingError, Result};
use crate::rating::elo::{
    elo_update, expected_score, margin_of_victory_multiplier, regress_to_baseline,
};
use crate::rating::engine::{parse_config, validate_common, RatingEngine};
use crate::rating::storage::RatingStore;
use crate::season::Season;
use crate::types::{GameRecord, TeamKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Configuration for the game-by-game engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequentialConfig {
    /// Rating points at stake per game
    pub k_factor: f64,
    /// Share of the end-of-season rating kept after regression
    pub carry_over: f64,
    /// Rating every team is pulled toward between seasons
    pub baseline: f64,
    /// Points added to a winner playing at home
    pub home_bonus: f64,
    pub apply_home_bonus: bool,
    /// Scale each update by the margin-of-victory multiplier
    pub apply_margin_of_victory: bool,
}

impl Default for SequentialConfig {
    fn default() -> Self {
        Self {
            k_factor: 10.0,
            carry_over: 0.75,
            baseline: 1500.0,
            home_bonus: 5.0,
            apply_home_bonus: false,
            apply_margin_of_victory: false,
        }
    }
}

impl SequentialConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        validate_common(self.k_factor, self.carry_over, self.baseline)?;

        if !self.home_bonus.is_finite() || self.home_bonus < 0.0 {
            return Err(RatingError::config("Home bonus must be a non-negative number").into());
        }

        Ok(())
    }
}

/// Game-by-game Elo engine
#[derive(Debug, Clone)]
pub struct SequentialEngine {
    config: SequentialConfig,
}

impl Default for SequentialEngine {
    fn default() -> Self {
        Self {
            config: SequentialConfig::default(),
        }
    }
}

impl SequentialEngine {
    /// Create a new game-by-game engine
    pub fn new(config: SequentialConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn settings(&self) -> &SequentialConfig {
        &self.config
    }

    /// Apply a single game to `ratings` in place
    ///
    /// Both teams must already be rated. On error neither team is changed.
    pub fn apply_game<T: TeamKey>(
        &self,
        ratings: &mut RatingStore<T>,
        game: &GameRecord<T>,
    ) -> Result<()> {
        let winner = game.winner_id();
        let loser = game.loser_id();
        let winner_rating = ratings.get(winner)?;
        let loser_rating = ratings.get(loser)?;

        let expected_winner = expected_score(winner_rating, loser_rating);
        let expected_loser = expected_score(loser_rating, winner_rating);

        let multiplier = if self.config.apply_margin_of_victory {
            let mov = margin_of_victory_multiplier(
                game.score_difference(),
                winner_rating,
                loser_rating,
            );
            if mov <= 0.0 {
                warn!(
                    "Margin-of-victory multiplier {} for {} over {} is not positive",
                    mov, winner, loser
                );
            }
            mov
        } else {
            1.0
        };
        let k_factor = self.config.k_factor * multiplier;

        let mut new_winner = elo_update(winner_rating, expected_winner, 1.0, k_factor);
        let new_loser = elo_update(loser_rating, expected_loser, 0.0, k_factor);

        if self.config.apply_home_bonus && game.location().is_home() {
            new_winner += self.config.home_bonus;
        }

        // Check both before writing either
        for (team, value) in [(winner, new_winner), (loser, new_loser)] {
            if !value.is_finite() {
                return Err(RatingError::NonFiniteRating {
                    team: team.to_string(),
                    value,
                }
                .into());
            }
        }

        debug!(
            "{} ({:.2} -> {:.2}) beat {} ({:.2} -> {:.2})",
            winner, winner_rating, new_winner, loser, loser_rating, new_loser
        );

        ratings.set(winner.clone(), new_winner)?;
        ratings.set(loser.clone(), new_loser)?;

        Ok(())
    }

    /// Pull every listed team toward the baseline
    pub fn regress<'a, T: TeamKey + 'a>(
        &self,
        ratings: &mut RatingStore<T>,
        teams: impl IntoIterator<Item = &'a T>,
    ) -> Result<()> {
        for team in teams {
            let rating = ratings.get(team)?;
            let regressed =
                regress_to_baseline(rating, self.config.carry_over, self.config.baseline);
            ratings.set(team.clone(), regressed)?;
        }
        Ok(())
    }
}

impl<T: TeamKey> RatingEngine<T> for SequentialEngine {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn rate_season(
        &self,
        ratings: &RatingStore<T>,
        season: &Season<T>,
    ) -> Result<RatingStore<T>> {
        let teams = season.teams();
        ratings.ensure_rated(&teams)?;

        let mut working = ratings.clone();
        for game in season.games() {
            self.apply_game(&mut working, game)?;
        }
        self.regress(&mut working, &teams)?;

        info!(
            "Rated season {} game by game: {} games, {} teams",
            season.year(),
            season.games().len(),
            teams.len()
        );

        Ok(working)
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    fn update_config(&mut self, config: serde_json::Value) -> Result<()> {
        let new_config: SequentialConfig = parse_config("sequential", config)?;

        new_config.validate()?;
        self.config = new_config;
        Ok(())
    }
}
