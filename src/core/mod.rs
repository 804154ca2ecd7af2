// Core algorithm exports
pub mod compare;
pub mod decision;
pub mod explain;
pub mod filters;
pub mod policy;
pub mod ranking;
pub mod recommender;
pub mod scoring;

pub use compare::{compare, format_usd};
pub use decision::{evaluate_options, DecisionEvaluation, DecisionFramework, OptionRatings};
pub use explain::explain;
pub use filters::{filter_candidates, passes_hard_constraints};
pub use policy::{validate_preferences, BudgetTier, ScoringPolicy};
pub use ranking::rank;
pub use recommender::{RecommendationWarning, Recommendations, Recommender};
pub use scoring::{score_candidate, ScoreBreakdown};
