use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{DimensionWeights, PreferenceSet, WeightOverrides};

/// Credit bracket for budget efficiency scoring
///
/// A candidate whose utilization is at most `max_utilization` earns
/// `credit_ratio` of the budget weight. Tiers are checked in order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetTier {
    pub max_utilization: f64,
    pub credit_ratio: f64,
}

/// Every weight, ratio and threshold the scorer, explainer and comparator use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    #[serde(default)]
    pub weights: DimensionWeights,
    #[serde(default = "default_region_credit_ratio")]
    pub region_credit_ratio: f64,
    #[serde(default = "default_budget_tiers")]
    pub budget_tiers: Vec<BudgetTier>,
    #[serde(default = "default_feature_increment")]
    pub feature_increment: f64,
    /// Utilization at or below which a program is called good value
    #[serde(default = "default_value_utilization")]
    pub value_utilization: f64,
    #[serde(default = "default_cost_spread_threshold")]
    pub cost_spread_threshold: u32,
    #[serde(default = "default_field_breadth_threshold")]
    pub field_breadth_threshold: usize,
    #[serde(default = "default_max_reasons")]
    pub max_reasons: usize,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            weights: DimensionWeights::default(),
            region_credit_ratio: default_region_credit_ratio(),
            budget_tiers: default_budget_tiers(),
            feature_increment: default_feature_increment(),
            value_utilization: default_value_utilization(),
            cost_spread_threshold: default_cost_spread_threshold(),
            field_breadth_threshold: default_field_breadth_threshold(),
            max_reasons: default_max_reasons(),
        }
    }
}

fn default_region_credit_ratio() -> f64 { 2.0 / 3.0 }
fn default_feature_increment() -> f64 { 0.05 }
fn default_value_utilization() -> f64 { 0.70 }
fn default_cost_spread_threshold() -> u32 { 5_000 }
fn default_field_breadth_threshold() -> usize { 3 }
fn default_max_reasons() -> usize { 3 }

fn default_budget_tiers() -> Vec<BudgetTier> {
    vec![
        BudgetTier { max_utilization: 0.70, credit_ratio: 1.0 },
        BudgetTier { max_utilization: 0.85, credit_ratio: 2.0 / 3.0 },
        BudgetTier { max_utilization: 1.00, credit_ratio: 1.0 / 3.0 },
    ]
}

impl ScoringPolicy {
    /// Effective weights for one request
    pub fn weights_for(&self, preferences: &PreferenceSet) -> DimensionWeights {
        self.weights.with_overrides(preferences.weights.as_ref())
    }

    /// Credit ratio for a budget utilization; 0 once past the last tier
    pub fn budget_credit(&self, utilization: f64) -> f64 {
        self.budget_tiers
            .iter()
            .find(|tier| utilization <= tier.max_utilization)
            .map(|tier| tier.credit_ratio)
            .unwrap_or(0.0)
    }

    /// Credit per offered feature when the features bucket is `bucket`
    ///
    /// `feature_increment` is defined against the configured bucket, so an
    /// overridden bucket keeps the same share per feature.
    pub fn feature_increment_for(&self, bucket: f64) -> f64 {
        if self.weights.features > 0.0 {
            self.feature_increment * bucket / self.weights.features
        } else {
            self.feature_increment
        }
    }

    /// Reject tables that would produce scores outside [0, 100]
    pub fn validate(&self) -> EngineResult<()> {
        check_weights(&self.weights, "scoring weight")?;
        check_unit(self.region_credit_ratio, "region_credit_ratio")?;
        check_unit(self.feature_increment, "feature_increment")?;

        let mut previous = f64::NEG_INFINITY;
        for tier in &self.budget_tiers {
            check_unit(tier.credit_ratio, "budget tier credit_ratio")?;
            if !tier.max_utilization.is_finite() || tier.max_utilization <= previous {
                return Err(EngineError::invalid(
                    "budget tiers must have finite, strictly increasing max_utilization",
                ));
            }
            previous = tier.max_utilization;
        }

        if !self.value_utilization.is_finite() || self.value_utilization < 0.0 {
            return Err(EngineError::invalid("value_utilization must be a non-negative number"));
        }
        Ok(())
    }
}

/// Validate the fields of a preference set that can make a call malformed
pub fn validate_preferences(preferences: &PreferenceSet) -> EngineResult<()> {
    if let Some(budget) = preferences.budget_max {
        if !budget.is_finite() || budget <= 0.0 {
            return Err(EngineError::invalid(format!(
                "budget_max must be a positive number, got {}",
                budget
            )));
        }
    }

    if let Some(gpa) = preferences.gpa {
        if !gpa.is_finite() || gpa < 0.0 {
            return Err(EngineError::invalid(format!(
                "gpa must be a non-negative number, got {}",
                gpa
            )));
        }
    }

    if let Some(overrides) = &preferences.weights {
        check_overrides(overrides)?;
    }

    Ok(())
}

fn check_overrides(overrides: &WeightOverrides) -> EngineResult<()> {
    let entries = [
        ("location", overrides.location),
        ("interests", overrides.interests),
        ("academic_fields", overrides.academic_fields),
        ("budget", overrides.budget),
        ("features", overrides.features),
    ];
    for (name, value) in entries {
        if let Some(value) = value {
            check_unit(value, &format!("weight for {}", name))?;
        }
    }
    Ok(())
}

fn check_weights(weights: &DimensionWeights, what: &str) -> EngineResult<()> {
    check_unit(weights.location, &format!("{} location", what))?;
    check_unit(weights.interests, &format!("{} interests", what))?;
    check_unit(weights.academic_fields, &format!("{} academic_fields", what))?;
    check_unit(weights.budget, &format!("{} budget", what))?;
    check_unit(weights.features, &format!("{} features", what))
}

fn check_unit(value: f64, what: &str) -> EngineResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::invalid(format!("{} must be within [0, 1], got {}", what, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        assert!(ScoringPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_budget_credit_tiers() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.budget_credit(0.40), 1.0);
        assert_eq!(policy.budget_credit(0.70), 1.0);
        assert_eq!(policy.budget_credit(0.700001), 2.0 / 3.0);
        assert_eq!(policy.budget_credit(0.85), 2.0 / 3.0);
        assert_eq!(policy.budget_credit(0.95), 1.0 / 3.0);
        assert_eq!(policy.budget_credit(1.0), 1.0 / 3.0);
        assert_eq!(policy.budget_credit(1.2), 0.0);
    }

    #[test]
    fn test_unordered_tiers_rejected() {
        let mut policy = ScoringPolicy::default();
        policy.budget_tiers.swap(0, 1);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_negative_budget_rejected() {
        let preferences = PreferenceSet {
            budget_max: Some(-100.0),
            ..Default::default()
        };
        assert!(matches!(
            validate_preferences(&preferences),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_weight_override_out_of_range_rejected() {
        let preferences = PreferenceSet {
            weights: Some(WeightOverrides {
                interests: Some(-0.1),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(validate_preferences(&preferences).is_err());
    }

    #[test]
    fn test_unknown_duration_type_is_not_an_error() {
        let preferences = PreferenceSet {
            duration_type: Some("decade".to_string()),
            ..Default::default()
        };
        assert!(validate_preferences(&preferences).is_ok());
    }
}
