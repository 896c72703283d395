//! Rating store threaded through successive seasons
//!
//! The store is owned by whoever drives the seasons. Engines read from it and
//! hand back a new store; nothing here is shared or global.

use crate::error::{RatingError, Result};
use crate::types::{TeamId, TeamKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Team ratings, every one of them finite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    deserialize = "T: TeamKey + Deserialize<'de>",
    serialize = "T: TeamKey + Serialize"
))]
pub struct RatingStore<T: TeamKey = TeamId> {
    ratings: HashMap<T, f64>,
}

impl<T: TeamKey> Default for RatingStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TeamKey> RatingStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            ratings: HashMap::new(),
        }
    }

    /// Build a store from existing ratings, rejecting non-finite values
    pub fn from_ratings(ratings: impl IntoIterator<Item = (T, f64)>) -> Result<Self> {
        let mut store = Self::new();
        for (team, rating) in ratings {
            store.set(team, rating)?;
        }
        Ok(store)
    }

    /// Get a team's rating
    pub fn get(&self, team: &T) -> Result<f64> {
        self.ratings
            .get(team)
            .copied()
            .ok_or_else(|| RatingError::missing(team).into())
    }

    /// Store a team's rating
    pub fn set(&mut self, team: T, rating: f64) -> Result<()> {
        if !rating.is_finite() {
            return Err(RatingError::NonFiniteRating {
                team: team.to_string(),
                value: rating,
            }
            .into());
        }

        self.ratings.insert(team, rating);
        Ok(())
    }

    /// Add `delta` to a team's current rating and return the new value
    pub fn adjust(&mut self, team: &T, delta: f64) -> Result<f64> {
        let updated = self.get(team)? + delta;
        self.set(team.clone(), updated)?;
        Ok(updated)
    }

    /// Seed a team with `initial_rating` unless it already has one
    ///
    /// Returns true when the team was newly seeded.
    pub fn seed(&mut self, team: T, initial_rating: f64) -> Result<bool> {
        if self.ratings.contains_key(&team) {
            return Ok(false);
        }
        self.set(team, initial_rating)?;
        Ok(true)
    }

    /// Fail with the first team lacking a rating
    pub fn ensure_rated<'a>(&self, teams: impl IntoIterator<Item = &'a T>) -> Result<()>
    where
        T: 'a,
    {
        for team in teams {
            if !self.ratings.contains_key(team) {
                return Err(RatingError::missing(team).into());
            }
        }
        Ok(())
    }

    pub fn contains(&self, team: &T) -> bool {
        self.ratings.contains_key(team)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.ratings.iter().map(|(team, rating)| (team, *rating))
    }

    /// Teams sorted by rating, highest first
    pub fn ranked(&self) -> Vec<(T, f64)> {
        let mut ranked: Vec<(T, f64)> = self
            .ratings
            .iter()
            .map(|(team, rating)| (team.clone(), *rating))
            .collect();

        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        ranked
    }

    pub fn into_inner(self) -> HashMap<T, f64> {
        self.ratings
    }
}
