use std::collections::{BTreeMap, BTreeSet};

use crate::core::policy::ScoringPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{Candidate, ComparisonMatrix, ComparisonRow, Feature};

pub const MIN_COMPARE: usize = 2;
pub const MAX_COMPARE: usize = 3;

const NOT_SPECIFIED: &str = "Not specified";

/// Build a side-by-side comparison of 2 or 3 candidates
///
/// Rows follow a fixed field order. Differences are set rules evaluated
/// once over the whole selection, always listed as cost, location,
/// academic breadth, then features.
pub fn compare(candidates: &[&Candidate], policy: &ScoringPolicy) -> EngineResult<ComparisonMatrix> {
    if !(MIN_COMPARE..=MAX_COMPARE).contains(&candidates.len()) {
        return Err(EngineError::invalid(format!(
            "compare needs {} to {} candidates, got {}",
            MIN_COMPARE,
            MAX_COMPARE,
            candidates.len()
        )));
    }

    let unique_ids: BTreeSet<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    if unique_ids.len() != candidates.len() {
        return Err(EngineError::invalid("compare needs distinct candidates"));
    }

    let rows = vec![
        row(candidates, "location", "Location", |c| format!("{}, {}", c.city, c.country)),
        row(candidates, "duration", "Duration", format_duration),
        row(candidates, "cost", "Total Cost", |c| format_usd(c.estimated_total_cost)),
        row(candidates, "credits", "Credits", format_credits),
        row(candidates, "gpa_requirement", "GPA Requirement", |c| {
            c.gpa_requirement
                .map(|gpa| gpa.to_string())
                .unwrap_or_else(|| "None".to_string())
        }),
        row(candidates, "language", "Language Requirement", |c| {
            c.language_requirement.clone().unwrap_or_else(|| "None".to_string())
        }),
        row(candidates, "housing", "Housing", |c| {
            let housing = if c.housing_included { "Included" } else { "Not included" };
            housing.to_string()
        }),
        row(candidates, "special_features", "Special Features", format_features),
        row(candidates, "provider", "Provider", |c| {
            c.provider.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string())
        }),
    ];

    Ok(ComparisonMatrix {
        rows,
        differences: key_differences(candidates, policy),
    })
}

fn row<F>(candidates: &[&Candidate], field: &str, label: &str, format: F) -> ComparisonRow
where
    F: Fn(&Candidate) -> String,
{
    let values: BTreeMap<String, String> = candidates
        .iter()
        .map(|c| (c.id.clone(), format(*c)))
        .collect();

    ComparisonRow {
        field: field.to_string(),
        label: label.to_string(),
        values,
    }
}

/// Notable differences across the whole selection
fn key_differences(candidates: &[&Candidate], policy: &ScoringPolicy) -> Vec<String> {
    let mut differences = Vec::new();

    let min_cost = candidates.iter().map(|c| c.estimated_total_cost).min();
    let max_cost = candidates.iter().map(|c| c.estimated_total_cost).max();
    if let (Some(min), Some(max)) = (min_cost, max_cost) {
        if max - min > policy.cost_spread_threshold {
            differences.push(format!(
                "Significant cost difference: {} to {}",
                format_usd(min),
                format_usd(max)
            ));
        }
    }

    let countries: BTreeSet<&str> = candidates.iter().map(|c| c.country.as_str()).collect();
    if countries.len() > 1 {
        differences.push(format!("Programs span {} different countries", countries.len()));
    }

    let fields: BTreeSet<&str> = candidates
        .iter()
        .flat_map(|c| c.academic_fields.iter().map(String::as_str))
        .collect();
    if fields.len() > policy.field_breadth_threshold {
        differences.push("Diverse academic offerings across programs".to_string());
    }

    for feature in Feature::ALL {
        let offering: Vec<&str> = candidates
            .iter()
            .filter(|c| c.offers(feature))
            .map(|c| c.name.as_str())
            .collect();
        if !offering.is_empty() && offering.len() < candidates.len() {
            differences.push(format!(
                "Only {} of {} programs offer {}: {}",
                offering.len(),
                candidates.len(),
                feature.label().to_lowercase(),
                offering.join(", ")
            ));
        }
    }

    differences
}

fn format_duration(candidate: &Candidate) -> String {
    match (candidate.duration_weeks, candidate.duration_type.as_deref()) {
        (Some(weeks), Some(kind)) => format!("{} weeks ({})", weeks, kind),
        (Some(weeks), None) => format!("{} weeks", weeks),
        (None, Some(kind)) => kind.to_string(),
        (None, None) => NOT_SPECIFIED.to_string(),
    }
}

fn format_credits(candidate: &Candidate) -> String {
    match (candidate.credits_min, candidate.credits_max) {
        (Some(min), Some(max)) if min == max => min.to_string(),
        (Some(min), Some(max)) => format!("{}-{}", min, max),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => NOT_SPECIFIED.to_string(),
    }
}

fn format_features(candidate: &Candidate) -> String {
    let features: Vec<&str> = candidate.features().into_iter().map(Feature::label).collect();
    if features.is_empty() {
        "None".to_string()
    } else {
        features.join(", ")
    }
}

/// Format whole dollars with thousands separators, e.g. `$12,500`
pub fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}
