//! Test fixtures and mock implementations for integration testing

use season_elo::error::Result;
use season_elo::rating::{RatingEngine, RatingStore};
use season_elo::{GameRecord, Location, RatingError, Season, TeamId, Year};
use std::sync::{Arc, Mutex};

/// Build a game where `winner` beat `loser` by ten points
pub fn game(winner: TeamId, loser: TeamId, location: Location) -> GameRecord {
    scored_game(winner, loser, 80.0, 70.0, location)
}

pub fn scored_game(
    winner: TeamId,
    loser: TeamId,
    winner_score: f64,
    loser_score: f64,
    location: Location,
) -> GameRecord {
    GameRecord::new(winner, loser, winner_score, loser_score, location)
        .expect("fixture games are well formed")
}

/// Every pair of teams meets once, lower id winning, home side alternating
pub fn round_robin_season(year: Year, teams: &[TeamId]) -> Season {
    let mut games = Vec::new();
    for (i, &winner) in teams.iter().enumerate() {
        for (j, &loser) in teams.iter().enumerate().skip(i + 1) {
            let location = match (i + j) % 3 {
                0 => Location::Home,
                1 => Location::Away,
                _ => Location::Neutral,
            };
            games.push(scored_game(
                winner,
                loser,
                70.0 + (j - i) as f64,
                70.0,
                location,
            ));
        }
    }
    Season::new(year, games)
}

/// A small conference across three seasons, with a newcomer joining in 2015
pub fn create_test_seasons() -> Vec<Season> {
    vec![
        Season::new(
            2014,
            vec![
                game(1101, 1102, Location::Home),
                game(1103, 1101, Location::Away),
                game(1101, 1104, Location::Neutral),
                game(1102, 1104, Location::Home),
            ],
        ),
        Season::new(
            2015,
            vec![
                game(1101, 1103, Location::Home),
                game(1105, 1102, Location::Away),
                game(1104, 1105, Location::Home),
            ],
        ),
        Season::new(
            2016,
            vec![
                game(1101, 1105, Location::Neutral),
                game(1103, 1104, Location::Away),
            ],
        ),
    ]
}

/// Mock engine that records which seasons it was handed and what it saw
#[derive(Debug, Default, Clone)]
pub struct RecordingEngine {
    seen: Arc<Mutex<Vec<(Year, usize)>>>,
    fail_on: Option<Year>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with a malformed-record error when asked to rate `year`
    pub fn failing_on(year: Year) -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
            fail_on: Some(year),
        }
    }

    /// Seasons handed to the engine, with the store size it received
    pub fn seen(&self) -> Vec<(Year, usize)> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

impl RatingEngine<TeamId> for RecordingEngine {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn rate_season(
        &self,
        ratings: &RatingStore<TeamId>,
        season: &Season<TeamId>,
    ) -> Result<RatingStore<TeamId>> {
        ratings.ensure_rated(season.teams().iter())?;

        if let Ok(mut seen) = self.seen.lock() {
            seen.push((season.year(), ratings.len()));
        }

        if self.fail_on == Some(season.year()) {
            return Err(RatingError::MalformedRecord {
                reason: format!("refusing season {}", season.year()),
            }
            .into());
        }

        // One point per win, nothing else
        let mut next = ratings.clone();
        for game in season.games() {
            next.adjust(game.winner_id(), 1.0)?;
        }
        Ok(next)
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({ "fail_on": self.fail_on })
    }

    fn update_config(&mut self, _config: serde_json::Value) -> Result<()> {
        Ok(())
    }
}
