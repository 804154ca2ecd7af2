// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Candidate, ComparisonMatrix, ComparisonRow, Dimension, DimensionScore, DimensionWeights, Feature,
    MatchSignals, PreferenceSet, ScoreResult, WeightOverrides,
};
pub use requests::{
    CompareProgramsRequest, EvaluateDecisionRequest, FallbackFrameworkQuery, ListProgramsQuery,
    SearchProgramsRequest,
};
pub use responses::{
    AvailableFilters, CompareProgramsResponse, ErrorResponse, FallbackFrameworkResponse, HealthResponse,
    ListProgramsResponse, PriceRange, RecommendationView, SearchProgramsResponse,
};
