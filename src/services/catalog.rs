use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{AvailableFilters, Candidate, ListProgramsQuery, PriceRange};

/// Errors that can occur loading or querying the program catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported catalog format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("Duplicate program id in catalog: {0}")]
    DuplicateId(String),

    #[error("Program not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    programs: Vec<Candidate>,
}

/// Read-only program catalog
///
/// Programs are loaded once and shared behind an `Arc`; nothing mutates them
/// while scoring calls borrow them.
#[derive(Debug, Clone)]
pub struct Catalog {
    programs: Arc<Vec<Candidate>>,
}

impl Catalog {
    pub fn new(programs: Vec<Candidate>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(programs.len());
        for program in &programs {
            if !seen.insert(program.id.as_str()) {
                return Err(CatalogError::DuplicateId(program.id.clone()));
            }
        }

        Ok(Self {
            programs: Arc::new(programs),
        })
    }

    /// Load a catalog file, choosing the format from its extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let catalog = match extension.as_str() {
            "json" => Self::from_json_str(&contents)?,
            "toml" => Self::from_toml_str(&contents)?,
            other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
        };

        tracing::info!("Loaded {} programs from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(contents)?;
        Self::new(file.programs)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        Self::new(file.programs)
    }

    pub fn programs(&self) -> &[Candidate] {
        &self.programs
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.programs.iter().find(|p| p.id == id)
    }

    /// Resolve ids in request order; any unknown id fails the lookup
    pub fn get_many(&self, ids: &[String]) -> Result<Vec<&Candidate>, CatalogError> {
        ids.iter()
            .map(|id| self.get(id).ok_or_else(|| CatalogError::NotFound(id.clone())))
            .collect()
    }

    /// Programs matching the listing filters, sorted by name
    pub fn list(&self, query: &ListProgramsQuery) -> Vec<Candidate> {
        let mut programs: Vec<Candidate> = self
            .programs
            .iter()
            .filter(|p| query.country.as_ref().map_or(true, |c| &p.country == c))
            .filter(|p| query.region.as_ref().map_or(true, |r| p.region.as_ref() == Some(r)))
            .filter(|p| {
                query
                    .duration_type
                    .as_ref()
                    .map_or(true, |d| p.duration_type.as_ref() == Some(d))
            })
            .filter(|p| query.max_cost.map_or(true, |max| p.estimated_total_cost <= max))
            .cloned()
            .collect();

        programs.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        programs
    }

    /// Distinct filter values present in the catalog
    pub fn available_filters(&self) -> AvailableFilters {
        let countries: BTreeSet<&str> = self.programs.iter().map(|p| p.country.as_str()).collect();
        let regions: BTreeSet<&str> = self.programs.iter().filter_map(|p| p.region.as_deref()).collect();
        let duration_types: BTreeSet<&str> = self
            .programs
            .iter()
            .filter_map(|p| p.duration_type.as_deref())
            .collect();

        AvailableFilters {
            countries: countries.into_iter().map(String::from).collect(),
            regions: regions.into_iter().map(String::from).collect(),
            duration_types: duration_types.into_iter().map(String::from).collect(),
            price_ranges: price_ranges(),
        }
    }
}

fn price_ranges() -> Vec<PriceRange> {
    let range = |label: &str, min: Option<u32>, max: Option<u32>| PriceRange {
        label: label.to_string(),
        min,
        max,
    };

    vec![
        range("Under $10,000", None, Some(10_000)),
        range("$10,000 - $15,000", Some(10_000), Some(15_000)),
        range("$15,000 - $20,000", Some(15_000), Some(20_000)),
        range("Over $20,000", Some(20_000), None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
        "programs": [
            {
                "id": "1",
                "name": "Tokyo Research Semester",
                "country": "Japan",
                "city": "Tokyo",
                "region": "Asia",
                "duration_type": "semester",
                "estimated_total_cost": 19000,
                "research_opportunities": true,
                "tags": ["research"]
            },
            {
                "id": "2",
                "name": "Barcelona Culture Summer",
                "country": "Spain",
                "city": "Barcelona",
                "region": "Europe",
                "duration_type": "summer",
                "estimated_total_cost": 8000,
                "internship_available": true,
                "tags": ["culture", "internship"]
            }
        ]
    }"#;

    #[test]
    fn test_load_json_catalog() {
        let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();

        assert_eq!(catalog.len(), 2);
        let tokyo = catalog.get("1").unwrap();
        assert!(tokyo.research_opportunities);
        assert!(!tokyo.housing_included);
    }

    #[test]
    fn test_load_toml_catalog() {
        let toml = r#"
            [[programs]]
            id = "seville"
            name = "Seville Language Intensive"
            country = "Spain"
            city = "Seville"
            estimated_total_cost = 6500
            tags = ["language"]
        "#;

        let catalog = Catalog::from_toml_str(toml).unwrap();
        assert_eq!(catalog.programs()[0].tags, vec!["language"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut programs = Catalog::from_json_str(CATALOG_JSON).unwrap().programs().to_vec();
        programs[1].id = "1".to_string();

        assert!(matches!(Catalog::new(programs), Err(CatalogError::DuplicateId(id)) if id == "1"));
    }

    #[test]
    fn test_list_filters_and_sorts_by_name() {
        let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();

        let all = catalog.list(&ListProgramsQuery::default());
        assert_eq!(all[0].name, "Barcelona Culture Summer");

        let cheap = catalog.list(&ListProgramsQuery {
            max_cost: Some(10_000),
            ..Default::default()
        });
        assert_eq!(cheap.len(), 1);

        let asia = catalog.list(&ListProgramsQuery {
            region: Some("Asia".to_string()),
            ..Default::default()
        });
        assert_eq!(asia[0].id, "1");
    }

    #[test]
    fn test_get_many_reports_missing_id() {
        let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
        let ids = vec!["1".to_string(), "404".to_string()];

        assert!(matches!(catalog.get_many(&ids), Err(CatalogError::NotFound(id)) if id == "404"));
    }

    #[test]
    fn test_available_filters() {
        let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
        let filters = catalog.available_filters();

        assert_eq!(filters.countries, vec!["Japan", "Spain"]);
        assert_eq!(filters.regions, vec!["Asia", "Europe"]);
        assert_eq!(filters.duration_types, vec!["semester", "summer"]);
        assert_eq!(filters.price_ranges.len(), 4);
    }
}
