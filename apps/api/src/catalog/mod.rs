//! Major catalog: static reference data loaded once at startup.
//!
//! Every major handed to the match engine has all four dimension weights in
//! `[0, 1]`, a unique non-empty name, and the catalog holds at least one
//! major. Anything else is rejected here so ranking never sees it.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::dimension::{Dimension, DimensionMap};
use crate::models::major::Major;

const BUILTIN_CATALOG: &str = include_str!("../../data/majors.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog contains no majors")]
    Empty,

    #[error("Major at position {0} has an empty name")]
    EmptyName(usize),

    #[error("Duplicate major name '{0}'")]
    DuplicateName(String),

    #[error("Major '{major}' is missing a {dimension} weight")]
    MissingWeight { major: String, dimension: Dimension },

    #[error("Major '{major}' has {dimension} weight {value}, expected 0.0..=1.0")]
    WeightOutOfRange {
        major: String,
        dimension: Dimension,
        value: f64,
    },
}

/// Careers and skills arrive either as a JSON array or as one
/// comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListField {
    Items(Vec<String>),
    Joined(String),
}

impl ListField {
    fn into_items(self) -> Vec<String> {
        let items = match self {
            ListField::Items(items) => items,
            ListField::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMajor {
    name: String,
    #[serde(default)]
    description: String,
    careers: Option<ListField>,
    skills: Option<ListField>,
    weights: HashMap<Dimension, f64>,
}

impl RawMajor {
    fn into_major(self) -> Result<Major, CatalogError> {
        let name = self.name.trim().to_string();
        let mut weights = DimensionMap::default();
        for dimension in Dimension::ALL {
            let value = *self
                .weights
                .get(&dimension)
                .ok_or_else(|| CatalogError::MissingWeight {
                    major: name.clone(),
                    dimension,
                })?;
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(CatalogError::WeightOutOfRange {
                    major: name,
                    dimension,
                    value,
                });
            }
            weights[dimension] = value;
        }

        Ok(Major {
            name,
            description: self.description.trim().to_string(),
            careers: self.careers.map(ListField::into_items).unwrap_or_default(),
            skills: self.skills.map(ListField::into_items).unwrap_or_default(),
            weights,
        })
    }
}

/// Read-only list of majors in authored order. Authored order is the
/// tie-break order for equal match percentages.
#[derive(Debug, Clone)]
pub struct Catalog {
    majors: Vec<Major>,
}

impl Catalog {
    pub fn new(majors: Vec<Major>) -> Result<Self, CatalogError> {
        if majors.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for (i, major) in majors.iter().enumerate() {
            if major.name.is_empty() {
                return Err(CatalogError::EmptyName(i));
            }
            if !seen.insert(major.name.to_lowercase()) {
                return Err(CatalogError::DuplicateName(major.name.clone()));
            }
        }
        Ok(Self { majors })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawMajor> = serde_json::from_str(json)?;
        let majors = raw
            .into_iter()
            .map(RawMajor::into_major)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(majors)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            "Loaded {} majors from {}",
            catalog.majors.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        let catalog = Self::from_json_str(BUILTIN_CATALOG)?;
        info!("Loaded {} majors from built-in catalog", catalog.majors.len());
        Ok(catalog)
    }

    pub fn majors(&self) -> &[Major] {
        &self.majors
    }
}
