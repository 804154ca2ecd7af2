use serde::{Deserialize, Serialize};

use crate::core::{
    compare::compare,
    explain::explain,
    filters::filter_candidates,
    policy::{validate_preferences, ScoringPolicy},
    ranking::rank,
    scoring::score_candidate,
};
use crate::error::EngineResult;
use crate::models::{Candidate, ComparisonMatrix, PreferenceSet, ScoreResult};

/// Non-fatal condition reported alongside a recommendation list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationWarning {
    /// No candidate survived the hard constraints
    NoEligibleCandidates,
}

/// Result of the recommendation pipeline
#[derive(Debug, Clone)]
pub struct Recommendations {
    pub results: Vec<ScoreResult>,
    pub total_candidates: usize,
    pub eligible_candidates: usize,
    pub warning: Option<RecommendationWarning>,
}

/// Main recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Hard-constraint filtering (GPA, budget ceiling, duration type)
/// 2. Weighted scoring over the active soft dimensions
/// 3. Ranking with id tie-break and top-N truncation
/// 4. Explanation from the scorer's signals
///
/// Every stage is a pure function of its inputs, so one `Recommender` can be
/// cloned into each worker and used concurrently.
#[derive(Debug, Clone)]
pub struct Recommender {
    policy: ScoringPolicy,
}

impl Recommender {
    /// Create a recommender, rejecting a policy table with out-of-range entries
    pub fn new(policy: ScoringPolicy) -> EngineResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn with_default_policy() -> Self {
        Self {
            policy: ScoringPolicy::default(),
        }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Stage 1 only: candidates that pass every hard constraint
    pub fn filter_candidates<'a>(
        &self,
        candidates: &'a [Candidate],
        preferences: &PreferenceSet,
    ) -> Vec<&'a Candidate> {
        filter_candidates(candidates, preferences)
    }

    /// Score a single candidate and attach its reasons
    pub fn score(&self, candidate: &Candidate, preferences: &PreferenceSet) -> ScoreResult {
        let breakdown = score_candidate(candidate, preferences, &self.policy);
        let mut result = ScoreResult {
            candidate_id: candidate.id.clone(),
            total: breakdown.total,
            max_possible: breakdown.max_possible,
            per_dimension: breakdown.per_dimension,
            reasons: Vec::new(),
            signals: breakdown.signals,
        };
        result.reasons = self.explain(candidate, &result);
        result
    }

    /// Reasons for a scored candidate, read from its recorded signals
    pub fn explain(&self, candidate: &Candidate, score: &ScoreResult) -> Vec<String> {
        explain(candidate, score, &self.policy)
    }

    /// Filter, score and rank, returning at most `limit` results
    ///
    /// Fails only for malformed preferences; zero survivors is an empty list.
    pub fn score_and_rank(
        &self,
        candidates: &[Candidate],
        preferences: &PreferenceSet,
        limit: usize,
    ) -> EngineResult<Vec<ScoreResult>> {
        Ok(self.recommend(candidates, preferences, limit)?.results)
    }

    /// Run the full pipeline and report counts alongside the ranked results
    pub fn recommend(
        &self,
        candidates: &[Candidate],
        preferences: &PreferenceSet,
        limit: usize,
    ) -> EngineResult<Recommendations> {
        validate_preferences(preferences)?;

        let total_candidates = candidates.len();
        let eligible = filter_candidates(candidates, preferences);
        let eligible_candidates = eligible.len();

        tracing::debug!(
            "{} of {} candidates passed hard constraints",
            eligible_candidates,
            total_candidates
        );

        if eligible.is_empty() {
            tracing::warn!("No candidates survived filtering ({} considered)", total_candidates);
            return Ok(Recommendations {
                results: Vec::new(),
                total_candidates,
                eligible_candidates,
                warning: Some(RecommendationWarning::NoEligibleCandidates),
            });
        }

        let scored: Vec<ScoreResult> = eligible
            .into_iter()
            .map(|candidate| self.score(candidate, preferences))
            .collect();

        Ok(Recommendations {
            results: rank(scored, limit),
            total_candidates,
            eligible_candidates,
            warning: None,
        })
    }

    /// Side-by-side comparison of 2 or 3 candidates
    pub fn compare(&self, candidates: &[&Candidate]) -> EngineResult<ComparisonMatrix> {
        compare(candidates, &self.policy)
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn create_candidate(id: &str, country: &str, cost: u32, tags: &[&str]) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: format!("Program {}", id),
            provider: None,
            country: country.to_string(),
            city: "City".to_string(),
            region: Some("Europe".to_string()),
            description: None,
            duration_weeks: Some(16),
            duration_type: Some("semester".to_string()),
            credits_min: None,
            credits_max: None,
            gpa_requirement: None,
            language_requirement: None,
            program_fee: None,
            housing_included: false,
            estimated_total_cost: cost,
            internship_available: false,
            research_opportunities: false,
            excursions_included: false,
            program_url: None,
            application_url: None,
            academic_fields: vec![],
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn create_preferences() -> PreferenceSet {
        PreferenceSet {
            countries: vec!["Spain".to_string()],
            interests: vec!["culture".to_string()],
            budget_max: Some(20_000.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_recommend_basic() {
        let recommender = Recommender::with_default_policy();
        let candidates = vec![
            create_candidate("1", "Spain", 8_000, &["culture"]),
            create_candidate("2", "France", 12_000, &[]),
            create_candidate("3", "Spain", 25_000, &["culture"]), // Over budget
        ];

        let result = recommender.recommend(&candidates, &create_preferences(), 10).unwrap();

        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.eligible_candidates, 2);
        assert_eq!(result.results[0].candidate_id, "1");
        assert_eq!(result.results[0].total, 100.0);
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_no_survivors_is_a_warning_not_an_error() {
        let recommender = Recommender::with_default_policy();
        let candidates = vec![create_candidate("1", "Spain", 30_000, &[])];

        let result = recommender.recommend(&candidates, &create_preferences(), 10).unwrap();

        assert!(result.results.is_empty());
        assert_eq!(result.warning, Some(RecommendationWarning::NoEligibleCandidates));
    }

    #[test]
    fn test_reasons_attached() {
        let recommender = Recommender::with_default_policy();
        let candidates = vec![create_candidate("1", "Spain", 8_000, &["culture"])];

        let results = recommender.score_and_rank(&candidates, &create_preferences(), 8).unwrap();

        assert_eq!(
            results[0].reasons,
            vec![
                "Located in your preferred country: Spain",
                "Matches your interests: culture",
                "Excellent value within your budget",
            ]
        );
    }

    #[test]
    fn test_respects_limit() {
        let recommender = Recommender::with_default_policy();
        let candidates: Vec<Candidate> = (0..20)
            .map(|i| create_candidate(&format!("{:02}", i), "Spain", 5_000 + i * 500, &["culture"]))
            .collect();

        let results = recommender.score_and_rank(&candidates, &create_preferences(), 5).unwrap();
        assert_eq!(results.len(), 5);
    }

    #[test]
    fn test_malformed_preferences_fail() {
        let recommender = Recommender::with_default_policy();
        let preferences = PreferenceSet {
            gpa: Some(f64::NAN),
            ..Default::default()
        };

        let err = recommender.score_and_rank(&[], &preferences, 8).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let mut policy = ScoringPolicy::default();
        policy.region_credit_ratio = 1.5;
        assert!(Recommender::new(policy).is_err());
    }

    #[test]
    fn test_configured_policy_drives_explain_and_compare() {
        let policy = ScoringPolicy {
            max_reasons: 1,
            cost_spread_threshold: 1_000,
            ..Default::default()
        };
        let tuned = Recommender::new(policy).unwrap();
        let default = Recommender::with_default_policy();

        let a = create_candidate("a", "Spain", 8_000, &["culture"]);
        let b = create_candidate("b", "Spain", 9_500, &[]);

        let score = tuned.score(&a, &create_preferences());
        assert_eq!(tuned.explain(&a, &score), vec!["Located in your preferred country: Spain"]);
        assert_eq!(score.reasons, tuned.explain(&a, &score));
        assert_eq!(default.explain(&a, &score).len(), 3);

        // A $1,500 spread is only notable under the tighter threshold
        let tuned_matrix = tuned.compare(&[&a, &b]).unwrap();
        let default_matrix = default.compare(&[&a, &b]).unwrap();
        assert_eq!(tuned_matrix.differences, vec!["Significant cost difference: $8,000 to $9,500"]);
        assert!(default_matrix.differences.is_empty());
    }

    #[test]
    fn test_recommender_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Recommender>();
    }
}
