//! Rating engine configuration

use crate::error::{RatingError, Result};
use crate::rating::{
    BatchConfig, BatchEngine, EngineKind, RatingEngine, SequentialConfig, SequentialEngine,
    INITIAL_RATING,
};
use crate::types::TeamKey;
use serde::{Deserialize, Serialize};

/// Which engine to run and how each engine is tuned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub engine: EngineKind,
    /// Rating given to a team the first time it appears
    pub initial_rating: f64,
    pub sequential: SequentialConfig,
    pub batch: BatchConfig,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            initial_rating: INITIAL_RATING,
            sequential: SequentialConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl RatingConfig {
    /// Validate the selected engine's parameters and the seed rating
    pub fn validate(&self) -> Result<()> {
        if !self.initial_rating.is_finite() {
            return Err(RatingError::config("Initial rating must be finite").into());
        }

        match self.engine {
            EngineKind::Sequential => self.sequential.validate(),
            EngineKind::Batch => self.batch.validate(),
        }
    }

    /// Construct the configured engine
    pub fn build_engine<T: TeamKey>(&self) -> Result<Box<dyn RatingEngine<T>>> {
        let engine: Box<dyn RatingEngine<T>> = match self.engine {
            EngineKind::Sequential => Box::new(SequentialEngine::new(self.sequential.clone())?),
            EngineKind::Batch => Box::new(BatchEngine::new(self.batch.clone())?),
        };
        Ok(engine)
    }
}
