use serde::{Deserialize, Serialize};

/// One entry in the static unified city reference (Yakutia ∪ federal
/// cities). `name` carries the original form exactly as it appears in the
/// reference asset; all comparisons go through `utility::normalize_city_name`
/// rather than comparing `name` directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedCity {
    pub name: String,
    pub is_federal_city: bool,
    pub latitude: f64,
    pub longitude: f64,
}
