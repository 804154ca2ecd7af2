use crate::core::policy::ScoringPolicy;
use crate::models::{Candidate, Feature, ScoreResult};

/// Derive up to `policy.max_reasons` human-readable reasons for a match
///
/// Reasons come only from the signals the scorer recorded, so what we say
/// always agrees with how the candidate was scored. Priority when
/// truncating: location, then interest and field overlap, then features
/// and value. Returns an empty list when nothing qualifies.
pub fn explain(candidate: &Candidate, score: &ScoreResult, policy: &ScoringPolicy) -> Vec<String> {
    let signals = &score.signals;
    let mut reasons = Vec::new();

    if signals.country_match {
        reasons.push(format!("Located in your preferred country: {}", candidate.country));
    }

    if !signals.matched_interests.is_empty() {
        reasons.push(format!("Matches your interests: {}", signals.matched_interests.join(", ")));
    }

    if !signals.matched_fields.is_empty() {
        reasons.push(format!("Offers courses in: {}", signals.matched_fields.join(", ")));
    }

    for feature in &signals.offered_features {
        reasons.push(feature_reason(*feature).to_string());
    }

    if let Some(utilization) = signals.budget_utilization {
        if utilization <= policy.value_utilization {
            reasons.push("Excellent value within your budget".to_string());
        }
    }

    reasons.truncate(policy.max_reasons);
    reasons
}

fn feature_reason(feature: Feature) -> &'static str {
    match feature {
        Feature::Internship => "Internship opportunities available",
        Feature::Research => "Research opportunities available",
        Feature::Excursions => "Excursions included",
    }
}
