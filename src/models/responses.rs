use serde::{Deserialize, Serialize};

use crate::core::decision::{DecisionFramework, DepthProfile};
use crate::core::recommender::RecommendationWarning;
use crate::models::domain::{Candidate, ComparisonRow, DimensionScore, PreferenceSet};

/// A recommended program with its match score and reasons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationView {
    #[serde(flatten)]
    pub program: Candidate,
    /// Total score rounded to two decimals
    pub match_score: f64,
    pub match_reasons: Vec<String>,
    pub score_breakdown: Vec<DimensionScore>,
}

/// Response for the program search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchProgramsResponse {
    pub recommendations: Vec<RecommendationView>,
    pub search_criteria: PreferenceSet,
    pub total_candidates: usize,
    pub eligible_candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<RecommendationWarning>,
}

/// Response for the program comparison endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareProgramsResponse {
    pub comparison_id: String,
    pub programs: Vec<Candidate>,
    pub comparison_matrix: Vec<ComparisonRow>,
    pub key_differences: Vec<String>,
}

/// Response for the catalog listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProgramsResponse {
    pub programs: Vec<Candidate>,
    pub total: usize,
}

/// Price bracket offered as a listing filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

/// Filter values available in the loaded catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableFilters {
    pub countries: Vec<String>,
    pub regions: Vec<String>,
    pub duration_types: Vec<String>,
    pub price_ranges: Vec<PriceRange>,
}

/// Fallback decision framework with the budget of its depth level
#[derive(Debug, Clone, Serialize)]
pub struct FallbackFrameworkResponse {
    pub framework: DecisionFramework,
    pub depth_profile: DepthProfile,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub programs_loaded: usize,
    /// Live search-cache entries; absent when caching is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_entries: Option<u64>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
