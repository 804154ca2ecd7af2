use crate::models::{Candidate, PreferenceSet};

/// Check if a candidate meets the user's GPA against its qualifying threshold
///
/// Programs that declare no requirement always pass.
#[inline]
pub fn meets_gpa_requirement(candidate: &Candidate, preferences: &PreferenceSet) -> bool {
    match (preferences.gpa, candidate.gpa_requirement) {
        (Some(gpa), Some(required)) => required <= gpa,
        _ => true,
    }
}

/// Check if a candidate's total cost fits under the budget ceiling
#[inline]
pub fn within_budget(candidate: &Candidate, preferences: &PreferenceSet) -> bool {
    match preferences.budget_max {
        Some(budget_max) => f64::from(candidate.estimated_total_cost) <= budget_max,
        None => true,
    }
}

/// Check if a candidate has exactly the requested duration type
#[inline]
pub fn matches_duration_type(candidate: &Candidate, preferences: &PreferenceSet) -> bool {
    match &preferences.duration_type {
        Some(wanted) => candidate.duration_type.as_deref() == Some(wanted.as_str()),
        None => true,
    }
}

/// Check every hard constraint; all must pass
#[inline]
pub fn passes_hard_constraints(candidate: &Candidate, preferences: &PreferenceSet) -> bool {
    meets_gpa_requirement(candidate, preferences)
        && within_budget(candidate, preferences)
        && matches_duration_type(candidate, preferences)
}

/// Eliminate candidates that fail a hard constraint
///
/// An empty result is not an error; callers present it as "no matches".
pub fn filter_candidates<'a>(
    candidates: &'a [Candidate],
    preferences: &PreferenceSet,
) -> Vec<&'a Candidate> {
    candidates
        .iter()
        .filter(|candidate| passes_hard_constraints(candidate, preferences))
        .collect()
}
