//! Weighted evaluation of user-defined decision options.
//!
//! A [`DecisionFramework`] names the options and the weighted criteria they
//! are judged on; [`OptionRatings`] holds a 0-10 rating per option and
//! criterion, whoever produced it. Option totals use the same
//! divide-by-max-possible normalization as program recommendations, so they
//! land on the 0-100 scale.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::ranking::rank_order;
use crate::core::scoring::normalize;
use crate::error::{EngineError, EngineResult};

/// Top of the rating scale
pub const RATING_SCALE: f64 = 10.0;
/// Ratings at or above this are reported as strengths
pub const STRENGTH_RATING: f64 = 7.0;
/// Ratings at or below this are reported as weaknesses
pub const WEAKNESS_RATING: f64 = 4.0;
pub const HIGH_CONFIDENCE_COVERAGE: f64 = 0.9;
pub const MEDIUM_CONFIDENCE_COVERAGE: f64 = 0.6;
/// Complexity at or above which the advanced model tier is suggested
pub const ADVANCED_TIER_COMPLEXITY: f64 = 0.7;

/// Ratings keyed by option name, then criterion name
pub type OptionRatings = BTreeMap<String, BTreeMap<String, f64>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisDepth {
    Quick,
    #[default]
    Balanced,
    Thorough,
}

/// How much questioning a depth level budgets for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepthProfile {
    pub time_budget: &'static str,
    pub questions: usize,
    pub criteria: usize,
    pub description: &'static str,
}

impl AnalysisDepth {
    pub fn profile(self) -> DepthProfile {
        match self {
            AnalysisDepth::Quick => DepthProfile {
                time_budget: "30 seconds",
                questions: 2,
                criteria: 4,
                description: "Essential factors only",
            },
            AnalysisDepth::Balanced => DepthProfile {
                time_budget: "3 minutes",
                questions: 6,
                criteria: 8,
                description: "Key dimensions covered",
            },
            AnalysisDepth::Thorough => DepthProfile {
                time_budget: "10 minutes",
                questions: 12,
                criteria: 12,
                description: "Comprehensive analysis",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    YesNo,
    #[default]
    Comparison,
    OpenEnded,
    Career,
    Purchase,
    LifeChoice,
}

impl DecisionType {
    /// Inherent difficulty of the decision kind, in [0, 1]
    pub fn complexity(self) -> f64 {
        match self {
            DecisionType::YesNo => 0.2,
            DecisionType::Comparison | DecisionType::Purchase => 0.5,
            DecisionType::OpenEnded => 0.8,
            DecisionType::Career | DecisionType::LifeChoice => 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionCategory {
    Financial,
    Practical,
    Emotional,
    Strategic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Suggested by the framework rather than named by the user
    #[serde(default)]
    pub inferred: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub weight: f64,
    #[serde(default)]
    pub category: Option<CriterionCategory>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Scale,
    Boolean,
    #[default]
    Text,
    Ranking,
    MultipleChoice,
}

/// Follow-up question that helps the user rate options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(default, rename = "type")]
    pub kind: QuestionKind,
    /// Criterion the answer informs
    #[serde(default)]
    pub criterion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionFramework {
    #[serde(default)]
    pub decision_type: DecisionType,
    pub title: String,
    #[serde(default)]
    pub depth: AnalysisDepth,
    pub options: Vec<DecisionOption>,
    pub criteria: Vec<Criterion>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub context_factors: Vec<String>,
}

impl DecisionFramework {
    /// Generic two-option framework used when no tailored one is available
    ///
    /// Questions are capped at the depth profile's question budget.
    pub fn fallback(depth: AnalysisDepth) -> Self {
        let option = |name: &str, description: &str| DecisionOption {
            name: name.to_string(),
            description: Some(description.to_string()),
            inferred: true,
        };
        let criterion = |name: &str, weight: f64, category: CriterionCategory| Criterion {
            name: name.to_string(),
            description: None,
            weight,
            category: Some(category),
        };
        let question = |text: &str, criterion: &str| Question {
            text: text.to_string(),
            kind: QuestionKind::Text,
            criterion: Some(criterion.to_string()),
        };

        let mut questions = vec![
            question("What is your budget constraint?", "Cost"),
            question("What is your primary goal?", "Benefits"),
        ];
        questions.truncate(depth.profile().questions);

        Self {
            decision_type: DecisionType::Comparison,
            title: "Decision Analysis".to_string(),
            depth,
            options: vec![
                option("Option A", "First option"),
                option("Option B", "Second option"),
            ],
            criteria: vec![
                criterion("Cost", 0.3, CriterionCategory::Financial),
                criterion("Benefits", 0.4, CriterionCategory::Practical),
                criterion("Risks", 0.3, CriterionCategory::Strategic),
            ],
            questions,
            context_factors: vec!["General decision".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    fn from_coverage(coverage: f64) -> Self {
        if coverage >= HIGH_CONFIDENCE_COVERAGE {
            Confidence::High
        } else if coverage >= MEDIUM_CONFIDENCE_COVERAGE {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Suggested analysis tier for any downstream narrative step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Standard,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionEvaluation {
    pub option: String,
    pub inferred: bool,
    /// Normalized score in [0, 100]
    pub total_score: f64,
    /// Weighted contribution per criterion
    pub criteria_scores: BTreeMap<String, f64>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRecommendation {
    pub primary_choice: Option<String>,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionEvaluation {
    pub title: String,
    /// Options ordered best first
    pub option_scores: Vec<OptionEvaluation>,
    pub recommendation: DecisionRecommendation,
    pub max_possible: f64,
    /// Share of (option, criterion) pairs that carry a rating
    pub coverage: f64,
    pub complexity_score: f64,
    pub model_tier: ModelTier,
}

/// Score every option of a framework against its weighted criteria
///
/// A missing rating counts as 0 so every option is normalized against the
/// same `max_possible`. Fails on unknown names, duplicate names, weights
/// outside [0, 1] or ratings outside [0, 10].
pub fn evaluate_options(
    framework: &DecisionFramework,
    ratings: &OptionRatings,
) -> EngineResult<DecisionEvaluation> {
    validate(framework, ratings)?;

    let max_possible: f64 = framework.criteria.iter().map(|c| c.weight).sum();
    let empty = BTreeMap::new();
    let mut rated_pairs = 0usize;

    let mut option_scores: Vec<OptionEvaluation> = framework
        .options
        .iter()
        .map(|option| {
            let option_ratings = ratings.get(&option.name).unwrap_or(&empty);
            let mut criteria_scores = BTreeMap::new();
            let mut strengths = Vec::new();
            let mut weaknesses = Vec::new();
            let mut rated = 0usize;

            for criterion in &framework.criteria {
                let rating = option_ratings.get(&criterion.name).copied();
                if let Some(rating) = rating {
                    rated += 1;
                    if rating >= STRENGTH_RATING {
                        strengths.push(format!("Strong on {}", criterion.name));
                    } else if rating <= WEAKNESS_RATING {
                        weaknesses.push(format!("Weak on {}", criterion.name));
                    }
                }
                let contribution = criterion.weight * rating.unwrap_or(0.0) / RATING_SCALE;
                criteria_scores.insert(criterion.name.clone(), contribution);
            }
            rated_pairs += rated;

            let achieved: f64 = criteria_scores.values().sum();
            OptionEvaluation {
                option: option.name.clone(),
                inferred: option.inferred,
                total_score: normalize(achieved, max_possible),
                criteria_scores,
                strengths,
                weaknesses,
                confidence: Confidence::from_coverage(ratio(rated, framework.criteria.len())),
            }
        })
        .collect();

    option_scores.sort_by(|a, b| rank_order(a.total_score, &a.option, b.total_score, &b.option));

    let coverage = ratio(rated_pairs, framework.options.len() * framework.criteria.len());
    let conflict = if has_conflict(framework, ratings, &option_scores) { 1.0 } else { 0.0 };
    let complexity_score = complexity(framework, conflict, 1.0 - coverage);
    let model_tier = if complexity_score < ADVANCED_TIER_COMPLEXITY {
        ModelTier::Standard
    } else {
        ModelTier::Advanced
    };

    let mut ranked_names = option_scores.iter().map(|o| o.option.clone());
    let recommendation = DecisionRecommendation {
        primary_choice: ranked_names.next(),
        alternatives: ranked_names.collect(),
    };

    tracing::debug!(
        "Evaluated {} options on {} criteria (complexity {:.2})",
        framework.options.len(),
        framework.criteria.len(),
        complexity_score
    );

    Ok(DecisionEvaluation {
        title: framework.title.clone(),
        option_scores,
        recommendation,
        max_possible,
        coverage,
        complexity_score,
        model_tier,
    })
}

/// Weighted blend of option count, criteria count, conflict, uncertainty and
/// decision kind, each contributing up to 0.2
pub fn complexity(framework: &DecisionFramework, conflict: f64, uncertainty: f64) -> f64 {
    let options = (framework.options.len() as f64 / 5.0).min(1.0);
    let criteria = (framework.criteria.len() as f64 / 10.0).min(1.0);

    (options + criteria + conflict + uncertainty + framework.decision_type.complexity()) * 0.2
}

/// Whether the overall winner loses on the most heavily weighted criterion
fn has_conflict(
    framework: &DecisionFramework,
    ratings: &OptionRatings,
    ranked: &[OptionEvaluation],
) -> bool {
    let Some(overall) = ranked.first() else {
        return false;
    };

    // First criterion wins weight ties
    let mut heaviest: Option<&Criterion> = None;
    for criterion in &framework.criteria {
        if heaviest.map_or(true, |h| criterion.weight > h.weight) {
            heaviest = Some(criterion);
        }
    }
    let Some(heaviest) = heaviest else {
        return false;
    };

    let rating_of = |option: &str| {
        ratings
            .get(option)
            .and_then(|r| r.get(&heaviest.name))
            .copied()
            .unwrap_or(0.0)
    };

    let best_on_heaviest = framework
        .options
        .iter()
        .map(|o| (rating_of(&o.name), o.name.as_str()))
        .min_by(|a, b| rank_order(a.0, a.1, b.0, b.1));

    best_on_heaviest.is_some_and(|(_, name)| name != overall.option)
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn validate(framework: &DecisionFramework, ratings: &OptionRatings) -> EngineResult<()> {
    let mut option_names = BTreeSet::new();
    for option in &framework.options {
        if option.name.trim().is_empty() {
            return Err(EngineError::invalid("option names must not be empty"));
        }
        if !option_names.insert(option.name.as_str()) {
            return Err(EngineError::invalid(format!("duplicate option: {}", option.name)));
        }
    }

    let mut criterion_names = BTreeSet::new();
    for criterion in &framework.criteria {
        if !criterion_names.insert(criterion.name.as_str()) {
            return Err(EngineError::invalid(format!("duplicate criterion: {}", criterion.name)));
        }
        if !criterion.weight.is_finite() || !(0.0..=1.0).contains(&criterion.weight) {
            return Err(EngineError::invalid(format!(
                "weight for criterion {} must be within [0, 1], got {}",
                criterion.name, criterion.weight
            )));
        }
    }

    for (option, by_criterion) in ratings {
        if !option_names.contains(option.as_str()) {
            return Err(EngineError::invalid(format!("rating for unknown option: {}", option)));
        }
        for (criterion, rating) in by_criterion {
            if !criterion_names.contains(criterion.as_str()) {
                return Err(EngineError::invalid(format!(
                    "rating for unknown criterion: {}",
                    criterion
                )));
            }
            if !rating.is_finite() || !(0.0..=RATING_SCALE).contains(rating) {
                return Err(EngineError::invalid(format!(
                    "rating for {} on {} must be within [0, {}], got {}",
                    option, criterion, RATING_SCALE, rating
                )));
            }
        }
    }

    Ok(())
}
