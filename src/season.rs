//! A season of games and the per-team views derived from it

use crate::types::{GameRecord, TeamId, TeamKey, TeamRecord, Year};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Ordered games for one season plus its year label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    deserialize = "T: TeamKey + Deserialize<'de>",
    serialize = "T: TeamKey + Serialize"
))]
pub struct Season<T: TeamKey = TeamId> {
    year: Year,
    games: Vec<GameRecord<T>>,
}

impl<T: TeamKey> Season<T> {
    /// Games must be in the order they were played
    pub fn new(year: Year, games: Vec<GameRecord<T>>) -> Self {
        Self { year, games }
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn games(&self) -> &[GameRecord<T>] {
        &self.games
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Distinct teams appearing as winner or loser, sorted
    pub fn teams(&self) -> BTreeSet<T> {
        self.games
            .iter()
            .flat_map(|game| [game.winner_id().clone(), game.loser_id().clone()])
            .collect()
    }

    /// Opponents faced by every team, one entry per game
    ///
    /// Each list holds the games the team won first, then the games it lost.
    pub fn opponents(&self) -> BTreeMap<T, Vec<T>> {
        let mut opponents: BTreeMap<T, Vec<T>> = BTreeMap::new();
        let mut beaten_by: BTreeMap<T, Vec<T>> = BTreeMap::new();

        for game in &self.games {
            opponents
                .entry(game.winner_id().clone())
                .or_default()
                .push(game.loser_id().clone());
            beaten_by
                .entry(game.loser_id().clone())
                .or_default()
                .push(game.winner_id().clone());
        }

        for (team, winners) in beaten_by {
            opponents.entry(team).or_default().extend(winners);
        }

        opponents
    }

    /// Win count for every team in the season, zero for winless teams
    pub fn wins(&self) -> BTreeMap<T, u32> {
        let mut wins: BTreeMap<T, u32> = self.teams().into_iter().map(|t| (t, 0)).collect();
        for game in &self.games {
            *wins.entry(game.winner_id().clone()).or_insert(0) += 1;
        }
        wins
    }

    /// Wins recorded away from home (away or neutral site) per team
    pub fn non_home_wins(&self) -> BTreeMap<T, u32> {
        let mut wins: BTreeMap<T, u32> = self.teams().into_iter().map(|t| (t, 0)).collect();
        for game in self.games.iter().filter(|g| !g.location().is_home()) {
            *wins.entry(game.winner_id().clone()).or_insert(0) += 1;
        }
        wins
    }

    /// Win/loss record for a single team
    pub fn team_record(&self, team: &T) -> TeamRecord {
        self.games
            .iter()
            .fold(TeamRecord::default(), |mut record, game| {
                if game.winner_id() == team {
                    record.wins += 1;
                } else if game.loser_id() == team {
                    record.losses += 1;
                }
                record
            })
    }

    /// Win/loss records for every team in the season
    pub fn records(&self) -> BTreeMap<T, TeamRecord> {
        let mut records: BTreeMap<T, TeamRecord> = BTreeMap::new();
        for game in &self.games {
            records.entry(game.winner_id().clone()).or_default().wins += 1;
            records.entry(game.loser_id().clone()).or_default().losses += 1;
        }
        records
    }
}
