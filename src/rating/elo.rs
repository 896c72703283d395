//! Elo primitives shared by both season engines
//!
//! The expectation comes from the skillratings crate; the update, regression
//! and margin-of-victory helpers are plain arithmetic on top of it.

use skillratings::elo::EloRating;

/// Default rating new teams are seeded with
pub const INITIAL_RATING: f64 = 1500.0;

/// Expected score of a team rated `rating_a` against one rated `rating_b`
///
/// `1 / (1 + 10^((rating_b - rating_a) / 400))`, always in (0, 1) for finite
/// inputs that are not absurdly far apart.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    let (expected_a, _expected_b) = skillratings::elo::expected_score(
        &EloRating { rating: rating_a },
        &EloRating { rating: rating_b },
    );
    expected_a
}

/// Move `old` toward the observed outcome by `k_factor`
pub fn elo_update(old: f64, expected: f64, actual: f64, k_factor: f64) -> f64 {
    old + k_factor * (actual - expected)
}

/// Blowout wins between close teams count more, expected blowouts count less
pub fn margin_of_victory_multiplier(
    score_difference: f64,
    winner_rating: f64,
    loser_rating: f64,
) -> f64 {
    (score_difference + 3.0).powf(0.8) / (7.5 + 0.006 * (winner_rating - loser_rating))
}

/// Blend a rating with the baseline, keeping `carry_over` of the rating
pub fn regress_to_baseline(rating: f64, carry_over: f64, baseline: f64) -> f64 {
    carry_over * rating + (1.0 - carry_over) * baseline
}
