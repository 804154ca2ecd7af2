use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::decision::{AnalysisDepth, DecisionFramework, OptionRatings};
use crate::models::domain::PreferenceSet;

/// Request to rank catalog programs against a preference set
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchProgramsRequest {
    pub preferences: PreferenceSet,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to compare catalog programs side by side
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompareProgramsRequest {
    #[validate(length(min = 2, max = 3, message = "Please select 2-3 programs to compare"))]
    pub program_ids: Vec<String>,
}

/// Catalog listing filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListProgramsQuery {
    pub country: Option<String>,
    pub region: Option<String>,
    pub duration_type: Option<String>,
    pub max_cost: Option<u32>,
}

/// Request to evaluate decision options against their weighted criteria
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateDecisionRequest {
    pub framework: DecisionFramework,
    #[serde(default)]
    pub ratings: OptionRatings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FallbackFrameworkQuery {
    #[serde(default)]
    pub depth: Option<AnalysisDepth>,
}
