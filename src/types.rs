//! Common types used throughout the rating engines

use crate::error::RatingError;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// Bound shared by every team identifier
///
/// Integers order numerically and strings lexically, which is what matchup
/// canonicalization relies on.
pub trait TeamKey: Clone + Eq + Hash + Ord + Debug + Display + FromStr {}

impl<T> TeamKey for T where T: Clone + Eq + Hash + Ord + Debug + Display + FromStr {}

/// Default team identifier
pub type TeamId = u32;

/// Season label
pub type Year = u16;

/// Where the winning team played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "H", alias = "home")]
    Home,
    #[serde(rename = "A", alias = "away")]
    Away,
    #[serde(rename = "N", alias = "neutral")]
    Neutral,
}

impl Location {
    pub fn is_home(self) -> bool {
        matches!(self, Location::Home)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Home => write!(f, "H"),
            Location::Away => write!(f, "A"),
            Location::Neutral => write!(f, "N"),
        }
    }
}

impl FromStr for Location {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" | "HOME" => Ok(Location::Home),
            "A" | "AWAY" => Ok(Location::Away),
            "N" | "NEUTRAL" => Ok(Location::Neutral),
            other => Err(RatingError::malformed(format!(
                "unknown location flag '{}'",
                other
            ))),
        }
    }
}

/// One completed game, validated at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawGameRecord<T>",
    bound(
        deserialize = "T: TeamKey + Deserialize<'de>",
        serialize = "T: TeamKey + Serialize"
    )
)]
pub struct GameRecord<T: TeamKey = TeamId> {
    winner_id: T,
    loser_id: T,
    winner_score: f64,
    loser_score: f64,
    location: Location,
}

/// Unvalidated wire shape of a game record
#[derive(Debug, Deserialize)]
struct RawGameRecord<T> {
    winner_id: T,
    loser_id: T,
    winner_score: f64,
    loser_score: f64,
    location: Location,
}

impl<T: TeamKey> TryFrom<RawGameRecord<T>> for GameRecord<T> {
    type Error = RatingError;

    fn try_from(raw: RawGameRecord<T>) -> Result<Self, Self::Error> {
        GameRecord::new(
            raw.winner_id,
            raw.loser_id,
            raw.winner_score,
            raw.loser_score,
            raw.location,
        )
    }
}

impl<T: TeamKey> GameRecord<T> {
    /// Create a game record, rejecting anything a rating update cannot use
    pub fn new(
        winner_id: T,
        loser_id: T,
        winner_score: f64,
        loser_score: f64,
        location: Location,
    ) -> Result<Self, RatingError> {
        if winner_id == loser_id {
            return Err(RatingError::malformed(format!(
                "team {} listed as both winner and loser",
                winner_id
            )));
        }

        if !winner_score.is_finite() || !loser_score.is_finite() {
            return Err(RatingError::malformed(format!(
                "non-finite score {}-{} in game {} vs {}",
                winner_score, loser_score, winner_id, loser_id
            )));
        }

        if winner_score < 0.0 || loser_score < 0.0 {
            return Err(RatingError::malformed(format!(
                "negative score {}-{} in game {} vs {}",
                winner_score, loser_score, winner_id, loser_id
            )));
        }

        // No ties in this domain
        if winner_score <= loser_score {
            return Err(RatingError::malformed(format!(
                "winner {} scored {} but loser {} scored {}",
                winner_id, winner_score, loser_id, loser_score
            )));
        }

        Ok(Self {
            winner_id,
            loser_id,
            winner_score,
            loser_score,
            location,
        })
    }

    pub fn winner_id(&self) -> &T {
        &self.winner_id
    }

    pub fn loser_id(&self) -> &T {
        &self.loser_id
    }

    pub fn winner_score(&self) -> f64 {
        self.winner_score
    }

    pub fn loser_score(&self) -> f64 {
        self.loser_score
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Winning margin, always positive
    pub fn score_difference(&self) -> f64 {
        self.winner_score - self.loser_score
    }

    pub fn involves(&self, team: &T) -> bool {
        &self.winner_id == team || &self.loser_id == team
    }

    /// The other side of the game from `team`'s point of view
    pub fn opponent_of(&self, team: &T) -> Option<&T> {
        if &self.winner_id == team {
            Some(&self.loser_id)
        } else if &self.loser_id == team {
            Some(&self.winner_id)
        } else {
            None
        }
    }
}

/// Win/loss tally for one team in one season
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
}

impl TeamRecord {
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }
}
