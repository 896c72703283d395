//! Season standings ordered by rating

use crate::error::Result;
use crate::rating::storage::RatingStore;
use crate::season::Season;
use crate::types::{TeamId, TeamKey, TeamRecord};
use serde::Serialize;

/// One team's line in the standings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing<T = TeamId> {
    pub rank: usize,
    pub team: T,
    pub rating: f64,
    pub record: TeamRecord,
}

/// Every team in `season`, highest rated first
///
/// Ties on rating fall back to identifier order.
pub fn standings<T: TeamKey>(
    ratings: &RatingStore<T>,
    season: &Season<T>,
) -> Result<Vec<Standing<T>>> {
    let mut rows = season
        .records()
        .into_iter()
        .map(|(team, record)| Ok((ratings.get(&team)?, team, record)))
        .collect::<Result<Vec<_>>>()?;

    rows.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(i, (rating, team, record))| Standing {
            rank: i + 1,
            team,
            rating,
            record,
        })
        .collect())
}
