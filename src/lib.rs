//! Compass Rank - weighted multi-criteria recommendation service
//!
//! This library ranks study-abroad programs against a student's preferences
//! and scores generic decision options against weighted criteria. The
//! recommendation pipeline is filter, score, rank, explain; every stage is a
//! pure function over an immutable catalog.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compare, evaluate_options, rank, score_candidate, Recommender, ScoringPolicy};
pub use crate::error::{EngineError, EngineResult};
pub use crate::models::{Candidate, ComparisonMatrix, DimensionWeights, PreferenceSet, ScoreResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let recommender = Recommender::default();
        assert_eq!(recommender.policy().weights, DimensionWeights::default());

        let ranked = recommender.score_and_rank(&[], &PreferenceSet::default(), 5).unwrap();
        assert!(ranked.is_empty());
    }
}
