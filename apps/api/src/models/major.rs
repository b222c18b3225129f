use serde::Serialize;

use crate::models::dimension::DimensionMap;

/// Catalog entry. Weights are relative emphasis in `[0, 1]` per dimension and
/// need not sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Major {
    pub name: String,
    pub description: String,
    pub careers: Vec<String>,
    pub skills: Vec<String>,
    pub weights: DimensionMap<f64>,
}
