use crate::core::policy::ScoringPolicy;
use crate::models::{Candidate, Dimension, DimensionScore, MatchSignals, PreferenceSet};

/// Scorer output for a single candidate
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Normalized score in [0, 100]
    pub total: f64,
    pub per_dimension: Vec<DimensionScore>,
    /// Sum of the weights of the active dimensions
    pub max_possible: f64,
    pub signals: MatchSignals,
}

impl ScoreBreakdown {
    pub fn achieved(&self) -> f64 {
        self.per_dimension.iter().map(|d| d.achieved).sum()
    }
}

/// Calculate a match score (0-100) for a candidate based on the preferences
///
/// Only dimensions present in `preferences` are active. Each active
/// dimension scores in `[0, weight]` and adds its weight to `max_possible`:
///
/// ```text
/// location        country match = weight, region match = weight * 2/3
/// interests       weight * matched / requested
/// academic_fields weight * matched / requested
/// budget          tiered on cost / budget_max (1, 2/3, 1/3, 0)
/// features        increment per requested feature offered, scaled with the
///                 bucket and capped at weight
/// ```
///
/// The total is `achieved / max_possible * 100`, or 0 when nothing is
/// active. Totals are only comparable between candidates of one request.
pub fn score_candidate(
    candidate: &Candidate,
    preferences: &PreferenceSet,
    policy: &ScoringPolicy,
) -> ScoreBreakdown {
    let weights = policy.weights_for(preferences);
    let mut signals = MatchSignals::default();
    let mut per_dimension = Vec::with_capacity(5);

    if !preferences.countries.is_empty() || !preferences.regions.is_empty() {
        let weight = weights.get(Dimension::Location);
        signals.country_match = preferences.countries.contains(&candidate.country);
        signals.region_match = !signals.country_match
            && candidate
                .region
                .as_ref()
                .is_some_and(|region| preferences.regions.contains(region));

        let achieved = if signals.country_match {
            weight
        } else if signals.region_match {
            weight * policy.region_credit_ratio
        } else {
            0.0
        };
        per_dimension.push(DimensionScore { dimension: Dimension::Location, weight, achieved });
    }

    if !preferences.interests.is_empty() {
        let weight = weights.get(Dimension::Interests);
        let (matched, ratio) = overlap(&preferences.interests, &candidate.tags);
        signals.matched_interests = matched;
        per_dimension.push(DimensionScore {
            dimension: Dimension::Interests,
            weight,
            achieved: weight * ratio,
        });
    }

    if !preferences.academic_fields.is_empty() {
        let weight = weights.get(Dimension::AcademicFields);
        let (matched, ratio) = overlap(&preferences.academic_fields, &candidate.academic_fields);
        signals.matched_fields = matched;
        per_dimension.push(DimensionScore {
            dimension: Dimension::AcademicFields,
            weight,
            achieved: weight * ratio,
        });
    }

    if let Some(budget_max) = preferences.budget_max {
        let weight = weights.get(Dimension::Budget);
        let utilization = budget_utilization(candidate.estimated_total_cost, budget_max);
        signals.budget_utilization = Some(utilization);
        per_dimension.push(DimensionScore {
            dimension: Dimension::Budget,
            weight,
            achieved: weight * policy.budget_credit(utilization),
        });
    }

    let requested_features = preferences.requested_features();
    if !requested_features.is_empty() {
        let weight = weights.get(Dimension::Features);
        signals.offered_features = requested_features
            .into_iter()
            .filter(|feature| candidate.offers(*feature))
            .collect();
        let raw = signals.offered_features.len() as f64 * policy.feature_increment_for(weight);
        per_dimension.push(DimensionScore {
            dimension: Dimension::Features,
            weight,
            achieved: raw.min(weight),
        });
    }

    let max_possible: f64 = per_dimension.iter().map(|d| d.weight).sum();
    let achieved: f64 = per_dimension.iter().map(|d| d.achieved).sum();
    let total = normalize(achieved, max_possible);

    ScoreBreakdown {
        total,
        per_dimension,
        max_possible,
        signals,
    }
}

/// Scale an achieved score against the maximum achievable to [0, 100]
#[inline]
pub fn normalize(achieved: f64, max_possible: f64) -> f64 {
    if max_possible > 0.0 {
        (achieved / max_possible * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Share of the budget a program's cost consumes
///
/// A non-positive budget cannot be used by anything, so utilization is
/// unbounded and earns no credit.
#[inline]
pub fn budget_utilization(cost: u32, budget_max: f64) -> f64 {
    if budget_max > 0.0 {
        f64::from(cost) / budget_max
    } else {
        f64::INFINITY
    }
}

/// Proportional overlap of requested values against offered values
///
/// Returns the matched values in request order and the match ratio, which
/// never exceeds 1.0. Duplicate requests count once.
pub fn overlap(requested: &[String], offered: &[String]) -> (Vec<String>, f64) {
    let mut unique: Vec<&String> = Vec::with_capacity(requested.len());
    for value in requested {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }

    if unique.is_empty() {
        return (Vec::new(), 0.0);
    }

    let matched: Vec<String> = unique
        .iter()
        .filter(|value| offered.iter().any(|o| o == **value))
        .map(|value| (*value).clone())
        .collect();

    let ratio = (matched.len() as f64 / unique.len() as f64).min(1.0);
    (matched, ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Feature, WeightOverrides};

    fn create_test_candidate(country: &str, region: &str, cost: u32, tags: &[&str]) -> Candidate {
        Candidate {
            id: "test_program".to_string(),
            name: "Test Program".to_string(),
            provider: Some("Test Provider".to_string()),
            country: country.to_string(),
            city: "Test City".to_string(),
            region: Some(region.to_string()),
            description: None,
            duration_weeks: Some(16),
            duration_type: Some("semester".to_string()),
            credits_min: Some(12),
            credits_max: Some(15),
            gpa_requirement: None,
            language_requirement: None,
            program_fee: None,
            housing_included: true,
            estimated_total_cost: cost,
            internship_available: true,
            research_opportunities: false,
            excursions_included: false,
            program_url: None,
            application_url: None,
            academic_fields: vec!["Business".to_string()],
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_no_active_dimensions_scores_zero() {
        let candidate = create_test_candidate("Spain", "Europe", 10_000, &["culture"]);
        let breakdown = score_candidate(&candidate, &PreferenceSet::default(), &ScoringPolicy::default());

        assert_eq!(breakdown.total, 0.0);
        assert_eq!(breakdown.max_possible, 0.0);
        assert!(breakdown.per_dimension.is_empty());
    }

    #[test]
    fn test_region_partial_credit() {
        let candidate = create_test_candidate("Portugal", "Europe", 10_000, &[]);
        let preferences = PreferenceSet {
            countries: strings(&["Spain"]),
            regions: strings(&["Europe"]),
            ..Default::default()
        };

        let breakdown = score_candidate(&candidate, &preferences, &ScoringPolicy::default());
        let location = breakdown.per_dimension[0];

        assert_eq!(location.dimension, Dimension::Location);
        assert!((location.achieved - 0.30 * 2.0 / 3.0).abs() < 1e-9);
        assert!(breakdown.signals.region_match);
        assert!(!breakdown.signals.country_match);
    }

    #[test]
    fn test_interest_overlap_is_proportional() {
        let candidate = create_test_candidate("Spain", "Europe", 10_000, &["culture"]);
        let preferences = PreferenceSet {
            interests: strings(&["culture", "language"]),
            ..Default::default()
        };

        let breakdown = score_candidate(&candidate, &preferences, &ScoringPolicy::default());
        let interests = breakdown.per_dimension[0];

        assert!((interests.achieved - 0.125).abs() < 1e-9);
        assert_eq!(breakdown.signals.matched_interests, vec!["culture"]);
        assert!((breakdown.total - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_ignores_duplicate_requests() {
        let (matched, ratio) = overlap(&strings(&["culture", "culture"]), &strings(&["culture"]));
        assert_eq!(matched, vec!["culture"]);
        assert_eq!(ratio, 1.0);
    }

    #[test]
    fn test_over_budget_degrades_to_zero_credit() {
        let candidate = create_test_candidate("Spain", "Europe", 25_000, &[]);
        let preferences = PreferenceSet {
            budget_max: Some(20_000.0),
            ..Default::default()
        };

        let breakdown = score_candidate(&candidate, &preferences, &ScoringPolicy::default());
        assert_eq!(breakdown.per_dimension[0].achieved, 0.0);
        assert_eq!(breakdown.total, 0.0);
    }

    #[test]
    fn test_feature_bucket_is_capped() {
        let mut candidate = create_test_candidate("Spain", "Europe", 10_000, &[]);
        candidate.research_opportunities = true;
        candidate.excursions_included = true;

        let mut policy = ScoringPolicy::default();
        policy.feature_increment = 0.05;
        let preferences = PreferenceSet {
            features: vec![Feature::Internship, Feature::Research, Feature::Excursions],
            ..Default::default()
        };

        let breakdown = score_candidate(&candidate, &preferences, &policy);
        let features = breakdown.per_dimension[0];

        assert_eq!(features.dimension, Dimension::Features);
        assert!((features.achieved - 0.10).abs() < 1e-9);
        assert_eq!(breakdown.signals.offered_features.len(), 3);
    }

    #[test]
    fn test_feature_credit_scales_with_overridden_bucket() {
        let policy = ScoringPolicy::default();
        let candidate = create_test_candidate("Spain", "Europe", 10_000, &[]);

        let default_bucket = PreferenceSet {
            features: vec![Feature::Internship],
            ..Default::default()
        };
        let full_bucket = PreferenceSet {
            weights: Some(WeightOverrides {
                features: Some(1.0),
                ..Default::default()
            }),
            ..default_bucket.clone()
        };

        let default_total = score_candidate(&candidate, &default_bucket, &policy).total;
        let full_total = score_candidate(&candidate, &full_bucket, &policy).total;

        assert!((default_total - 50.0).abs() < 1e-9);
        assert!((full_total - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_interest_tag_requests_feature() {
        let candidate = create_test_candidate("Spain", "Europe", 10_000, &["internship"]);
        let preferences = PreferenceSet {
            interests: strings(&["internship"]),
            ..Default::default()
        };

        let breakdown = score_candidate(&candidate, &preferences, &ScoringPolicy::default());

        let features = breakdown.per_dimension.iter().find(|d| d.dimension == Dimension::Features);
        assert!(features.is_some());
        assert_eq!(breakdown.signals.offered_features, vec![Feature::Internship]);
    }

    #[test]
    fn test_weight_overrides_change_max_possible() {
        let candidate = create_test_candidate("Spain", "Europe", 10_000, &[]);
        let preferences = PreferenceSet {
            countries: strings(&["Spain"]),
            weights: Some(crate::models::WeightOverrides {
                location: Some(1.0),
                ..Default::default()
            }),
            ..Default::default()
        };

        let breakdown = score_candidate(&candidate, &preferences, &ScoringPolicy::default());
        assert_eq!(breakdown.max_possible, 1.0);
        assert_eq!(breakdown.total, 100.0);
    }
}
