//! Elo rating engines
//!
//! Two season engines share the primitives in [`elo`]: a game-by-game engine
//! and a season-wide batch engine. Both read from and hand back a
//! [`RatingStore`].

pub mod batch;
pub mod elo;
pub mod engine;
pub mod sequential;
pub mod storage;

// Re-export commonly used types
pub use batch::{BatchConfig, BatchEngine, SeasonAggregates, TeamUpdate};
pub use elo::{expected_score, INITIAL_RATING};
pub use engine::{EngineKind, RatingEngine};
pub use sequential::{SequentialConfig, SequentialEngine};
pub use storage::RatingStore;
