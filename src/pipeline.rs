//! Multi-season rating pipeline
//!
//! The pipeline owns the rating store for its whole lifetime. Before each
//! season it seeds teams it has never seen, then hands the store to the
//! configured engine and keeps whatever comes back.

use crate::error::Result;
use crate::predict::{self, Standing};
use crate::rating::{RatingEngine, RatingStore, INITIAL_RATING};
use crate::season::Season;
use crate::types::{TeamId, TeamKey, Year};
use tracing::{debug, info};

/// Threads one rating store through successive seasons
pub struct RatingPipeline<T: TeamKey = TeamId> {
    engine: Box<dyn RatingEngine<T>>,
    initial_rating: f64,
    ratings: RatingStore<T>,
    seasons_processed: Vec<Year>,
}

impl<T: TeamKey> std::fmt::Debug for RatingPipeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingPipeline")
            .field("engine", &self.engine.name())
            .field("initial_rating", &self.initial_rating)
            .field("teams", &self.ratings.len())
            .field("seasons_processed", &self.seasons_processed)
            .finish()
    }
}

impl<T: TeamKey> RatingPipeline<T> {
    /// Create a pipeline with an empty store
    pub fn new(engine: Box<dyn RatingEngine<T>>) -> Self {
        Self::with_ratings(engine, RatingStore::new())
    }

    /// Create a pipeline that continues from existing ratings
    pub fn with_ratings(engine: Box<dyn RatingEngine<T>>, ratings: RatingStore<T>) -> Self {
        Self {
            engine,
            initial_rating: INITIAL_RATING,
            ratings,
            seasons_processed: Vec::new(),
        }
    }

    /// Rating given to teams the first time they appear
    pub fn with_initial_rating(mut self, initial_rating: f64) -> Self {
        self.initial_rating = initial_rating;
        self
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    pub fn ratings(&self) -> &RatingStore<T> {
        &self.ratings
    }

    pub fn into_ratings(self) -> RatingStore<T> {
        self.ratings
    }

    /// Years processed so far, in processing order
    pub fn seasons_processed(&self) -> &[Year] {
        &self.seasons_processed
    }

    /// Seed new teams and rate one season
    ///
    /// On error the store is exactly what it was before the call, including
    /// any seeding.
    pub fn process_season(&mut self, season: &Season<T>) -> Result<()> {
        let mut seeded = self.ratings.clone();
        let mut new_teams = 0;
        for team in season.teams() {
            if seeded.seed(team, self.initial_rating)? {
                new_teams += 1;
            }
        }
        if new_teams > 0 {
            debug!(
                "Seeded {} new teams at {} for season {}",
                new_teams,
                self.initial_rating,
                season.year()
            );
        }

        self.ratings = self.engine.rate_season(&seeded, season)?;
        self.seasons_processed.push(season.year());
        Ok(())
    }

    /// Rate seasons in year order, stopping at the first failure
    pub fn process_seasons<'a>(
        &mut self,
        seasons: impl IntoIterator<Item = &'a Season<T>>,
    ) -> Result<()>
    where
        T: 'a,
    {
        let mut ordered: Vec<&Season<T>> = seasons.into_iter().collect();
        ordered.sort_by_key(|season| season.year());

        for season in ordered {
            self.process_season(season)?;
        }

        info!(
            "Processed {} seasons with the {} engine, {} teams rated",
            self.seasons_processed.len(),
            self.engine.name(),
            self.ratings.len()
        );

        Ok(())
    }

    /// Win probabilities for `(compound_id, label)` requests
    pub fn predict<I, S, L>(&self, requests: I) -> Result<Vec<f64>>
    where
        I: IntoIterator<Item = (S, L)>,
        S: AsRef<str>,
    {
        predict::predict(&self.ratings, requests)
    }

    /// Current standings for the teams of `season`
    pub fn standings(&self, season: &Season<T>) -> Result<Vec<Standing<T>>> {
        predict::standings(&self.ratings, season)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{rating_error, RatingError};
    use crate::rating::{BatchEngine, SequentialConfig, SequentialEngine};
    use crate::types::{GameRecord, Location};

    fn game(w: u32, l: u32, loc: Location) -> GameRecord<u32> {
        GameRecord::new(w, l, 80.0, 70.0, loc).unwrap()
    }

    #[test]
    fn test_seeds_new_teams() {
        let mut pipeline = RatingPipeline::new(Box::new(SequentialEngine::default()));
        let season = Season::new(2014, vec![game(1, 2, Location::Neutral)]);

        pipeline.process_season(&season).unwrap();

        // 0.75 * 1505 + 0.25 * 1500 and 0.75 * 1495 + 0.25 * 1500
        assert_eq!(pipeline.ratings().get(&1).unwrap(), 1503.75);
        assert_eq!(pipeline.ratings().get(&2).unwrap(), 1496.25);
        assert_eq!(pipeline.seasons_processed(), &[2014]);
        assert_eq!(pipeline.engine_name(), "sequential");
    }

    #[test]
    fn test_carries_ratings_across_seasons() {
        let engine = SequentialEngine::new(SequentialConfig {
            apply_home_bonus: true,
            ..SequentialConfig::default()
        })
        .unwrap();
        let mut pipeline = RatingPipeline::new(Box::new(engine));

        let later = Season::new(2015, vec![game(3, 1, Location::Away)]);
        let earlier = Season::new(2014, vec![game(1, 2, Location::Home)]);

        pipeline.process_seasons([&later, &earlier]).unwrap();
        assert_eq!(pipeline.seasons_processed(), &[2014, 2015]);

        // Team 1 enters 2015 at 1507.5, team 3 is seeded at 1500
        let expected_loss = crate::rating::expected_score(1507.5, 1500.0);
        let team_1 = 0.75 * (1507.5 + 10.0 * (0.0 - expected_loss)) + 0.25 * 1500.0;
        assert!((pipeline.ratings().get(&1).unwrap() - team_1).abs() < 1e-9);

        // Team 2 sat out 2015 and keeps its 2014 rating
        assert_eq!(pipeline.ratings().get(&2).unwrap(), 1496.25);
    }

    #[test]
    fn test_custom_initial_rating() {
        let mut pipeline =
            RatingPipeline::new(Box::new(BatchEngine::default())).with_initial_rating(1505.0);
        let season = Season::new(2014, vec![game(1, 2, Location::Home)]);

        pipeline.process_season(&season).unwrap();

        // 0.25 * 1505 + 0.75 * 1510
        assert_eq!(pipeline.ratings().get(&1).unwrap(), 1508.75);
    }

    #[test]
    fn test_failed_season_leaves_store_unchanged() {
        let engine = SequentialEngine::new(SequentialConfig {
            home_bonus: f64::MAX,
            apply_home_bonus: true,
            ..SequentialConfig::default()
        })
        .unwrap();
        let start = RatingStore::from_ratings(vec![(1u32, f64::MAX)]).unwrap();
        let mut pipeline = RatingPipeline::with_ratings(Box::new(engine), start.clone());

        let season = Season::new(2014, vec![game(1, 2, Location::Home)]);
        let err = pipeline.process_season(&season).unwrap_err();

        assert!(matches!(
            rating_error(&err),
            Some(RatingError::NonFiniteRating { .. })
        ));
        assert_eq!(pipeline.ratings(), &start);
        assert!(!pipeline.ratings().contains(&2));
        assert!(pipeline.seasons_processed().is_empty());
    }

    #[test]
    fn test_predict_and_standings() {
        let mut pipeline = RatingPipeline::new(Box::new(SequentialEngine::default()));
        let season = Season::new(
            2014,
            vec![game(1, 2, Location::Home), game(1, 3, Location::Away)],
        );
        pipeline.process_season(&season).unwrap();

        let predictions = pipeline
            .predict(vec![("2015_2_1", "ignored"), ("2015_1_3", "ignored")])
            .unwrap();
        assert_eq!(predictions.len(), 2);
        assert!(predictions[0] > 0.5);
        assert!(predictions[1] > 0.5);

        let rows = pipeline.standings(&season).unwrap();
        assert_eq!(rows[0].team, 1);

        assert!(pipeline.predict(vec![("2015_1_4", ())]).is_err());
    }
}
