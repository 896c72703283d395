//! Matchup requests and win probabilities
//!
//! A probability is always reported for the team with the smaller identifier,
//! whichever side the request listed it on.

use crate::error::{RatingError, Result};
use crate::rating::elo::expected_score;
use crate::rating::storage::RatingStore;
use crate::types::{TeamId, TeamKey, Year};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A future game to predict, parsed from `"season_teamA_teamB"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupRequest<T = TeamId> {
    pub season: Year,
    pub team_a: T,
    pub team_b: T,
}

impl<T: TeamKey> MatchupRequest<T> {
    pub fn new(season: Year, team_a: T, team_b: T) -> Self {
        Self {
            season,
            team_a,
            team_b,
        }
    }

    /// The pair ordered so the smaller identifier comes first
    pub fn canonical(&self) -> (&T, &T) {
        if self.team_a <= self.team_b {
            (&self.team_a, &self.team_b)
        } else {
            (&self.team_b, &self.team_a)
        }
    }

    /// Canonical compound id, lower identifier first
    pub fn id(&self) -> String {
        let (low, high) = self.canonical();
        format!("{}_{}_{}", self.season, low, high)
    }
}

impl<T: TeamKey> FromStr for MatchupRequest<T> {
    type Err = RatingError;

    fn from_str(id: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || RatingError::InvalidMatchupId { id: id.to_string() };

        let mut parts = id.trim().split('_');
        let (Some(season), Some(team_a), Some(team_b), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let season = season.parse::<Year>().map_err(|_| invalid())?;
        let team_a = team_a.parse::<T>().map_err(|_| invalid())?;
        let team_b = team_b.parse::<T>().map_err(|_| invalid())?;

        if team_a == team_b {
            return Err(invalid());
        }

        Ok(Self::new(season, team_a, team_b))
    }
}

/// One labelled prediction row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub pred: f64,
}

/// Probability that the lower-identifier team beats the other
pub fn predict_matchup<T: TeamKey>(
    ratings: &RatingStore<T>,
    team_a: &T,
    team_b: &T,
) -> Result<f64> {
    let (low, high) = if team_a <= team_b {
        (team_a, team_b)
    } else {
        (team_b, team_a)
    };

    Ok(expected_score(ratings.get(low)?, ratings.get(high)?))
}

/// Predict every request, in order
///
/// Each request is a `(compound_id, label)` pair; the label is ignored. Fails
/// without partial output if any id is malformed or names an unrated team.
pub fn predict<T, I, S, L>(ratings: &RatingStore<T>, requests: I) -> Result<Vec<f64>>
where
    T: TeamKey,
    I: IntoIterator<Item = (S, L)>,
    S: AsRef<str>,
{
    requests
        .into_iter()
        .map(|(id, _label)| {
            let request: MatchupRequest<T> = id.as_ref().parse()?;
            predict_matchup(ratings, &request.team_a, &request.team_b)
        })
        .collect()
}

/// Like [`predict`], but keeps each request's canonical id next to its probability
pub fn predict_rows<T: TeamKey>(
    ratings: &RatingStore<T>,
    requests: &[MatchupRequest<T>],
) -> Result<Vec<Prediction>> {
    requests
        .iter()
        .map(|request| {
            Ok(Prediction {
                id: request.id(),
                pred: predict_matchup(ratings, &request.team_a, &request.team_b)?,
            })
        })
        .collect()
}
