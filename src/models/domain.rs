use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A scorable program with fixed catalog attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub provider: Option<String>,
    pub country: String,
    pub city: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_weeks: Option<u32>,
    #[serde(default)]
    pub duration_type: Option<String>,
    #[serde(default)]
    pub credits_min: Option<u32>,
    #[serde(default)]
    pub credits_max: Option<u32>,
    /// Minimum GPA an applicant needs; `None` means open admission
    #[serde(default)]
    pub gpa_requirement: Option<f64>,
    #[serde(default)]
    pub language_requirement: Option<String>,
    #[serde(default)]
    pub program_fee: Option<u32>,
    #[serde(default)]
    pub housing_included: bool,
    pub estimated_total_cost: u32,
    #[serde(default)]
    pub internship_available: bool,
    #[serde(default)]
    pub research_opportunities: bool,
    #[serde(default)]
    pub excursions_included: bool,
    #[serde(default)]
    pub program_url: Option<String>,
    #[serde(default)]
    pub application_url: Option<String>,
    #[serde(default)]
    pub academic_fields: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Candidate {
    /// Whether the program offers the given special feature
    pub fn offers(&self, feature: Feature) -> bool {
        match feature {
            Feature::Internship => self.internship_available,
            Feature::Research => self.research_opportunities,
            Feature::Excursions => self.excursions_included,
        }
    }

    /// Special features the program offers, in canonical order
    pub fn features(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|feature| self.offers(*feature))
            .collect()
    }
}

/// Special features a program can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Internship,
    Research,
    Excursions,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Internship, Feature::Research, Feature::Excursions];

    /// Interest tag that implicitly requests this feature
    pub fn interest_tag(self) -> &'static str {
        match self {
            Feature::Internship => "internship",
            Feature::Research => "research",
            Feature::Excursions => "excursions",
        }
    }

    pub fn from_interest(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|feature| feature.interest_tag() == tag)
    }

    /// Plural label used in comparison output
    pub fn label(self) -> &'static str {
        match self {
            Feature::Internship => "Internships",
            Feature::Research => "Research",
            Feature::Excursions => "Excursions",
        }
    }
}

/// Caller's hard constraints and soft preferences for one evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSet {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub academic_fields: Vec<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub duration_type: Option<String>,
    /// Applicant GPA, compared against each program's qualifying threshold
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub weights: Option<WeightOverrides>,
}

impl PreferenceSet {
    /// Features requested explicitly or through an interest tag, deduplicated
    pub fn requested_features(&self) -> Vec<Feature> {
        let mut requested: Vec<Feature> = self
            .features
            .iter()
            .copied()
            .chain(self.interests.iter().filter_map(|tag| Feature::from_interest(tag)))
            .collect();
        requested.sort();
        requested.dedup();
        requested
    }
}

/// Per-request weight overrides; unset entries use the scoring policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightOverrides {
    #[serde(default)]
    pub location: Option<f64>,
    #[serde(default)]
    pub interests: Option<f64>,
    #[serde(default)]
    pub academic_fields: Option<f64>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub features: Option<f64>,
}

/// Relative importance of each soft dimension, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights {
    pub location: f64,
    pub interests: f64,
    pub academic_fields: f64,
    pub budget: f64,
    pub features: f64,
}

impl DimensionWeights {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Location => self.location,
            Dimension::Interests => self.interests,
            Dimension::AcademicFields => self.academic_fields,
            Dimension::Budget => self.budget,
            Dimension::Features => self.features,
        }
    }

    /// Apply request overrides on top of these weights
    pub fn with_overrides(&self, overrides: Option<&WeightOverrides>) -> Self {
        let Some(o) = overrides else {
            return *self;
        };
        Self {
            location: o.location.unwrap_or(self.location),
            interests: o.interests.unwrap_or(self.interests),
            academic_fields: o.academic_fields.unwrap_or(self.academic_fields),
            budget: o.budget.unwrap_or(self.budget),
            features: o.features.unwrap_or(self.features),
        }
    }
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            location: 0.30,
            interests: 0.25,
            academic_fields: 0.20,
            budget: 0.15,
            features: 0.10,
        }
    }
}

/// One scored aspect of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Location,
    Interests,
    AcademicFields,
    Budget,
    Features,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Location => "location",
            Dimension::Interests => "interests",
            Dimension::AcademicFields => "academic_fields",
            Dimension::Budget => "budget",
            Dimension::Features => "features",
        };
        f.write_str(name)
    }
}

/// Contribution of one active dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub weight: f64,
    pub achieved: f64,
}

/// Raw signals the scorer observed; the explainer reads only these
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSignals {
    pub country_match: bool,
    pub region_match: bool,
    pub matched_interests: Vec<String>,
    pub matched_fields: Vec<String>,
    pub offered_features: Vec<Feature>,
    pub budget_utilization: Option<f64>,
}

/// Scored candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub candidate_id: String,
    /// Normalized score in [0, 100]
    pub total: f64,
    pub max_possible: f64,
    pub per_dimension: Vec<DimensionScore>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(skip)]
    pub signals: MatchSignals,
}

impl ScoreResult {
    /// Total rounded to two decimals for display
    pub fn rounded_total(&self) -> f64 {
        (self.total * 100.0).round() / 100.0
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.per_dimension.iter().find(|d| d.dimension == dimension)
    }
}

/// One comparison field with a formatted value per candidate id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub field: String,
    pub label: String,
    pub values: BTreeMap<String, String>,
}

/// Side-by-side comparison of 2-3 candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMatrix {
    pub rows: Vec<ComparisonRow>,
    pub differences: Vec<String>,
}

impl ComparisonMatrix {
    pub fn row(&self, field: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.field == field)
    }
}
