use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Skill demand observation. Skill detail rows always carry a country and
/// month; dashboard summary rows may omit either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub skill: String,
    pub country: Option<String>,
    pub month: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub country: String,
    pub jobs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub role: String,
    pub count: u64,
}

/// One month of hiring volume, keyed by country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    pub country_values: BTreeMap<String, u64>,
}

/// Provided point estimate; bounds are optional and satisfy `lower <= forecast <= upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub skill: String,
    pub country: Option<String>,
    pub month: String,
    pub forecast: f64,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

/// Normalized dashboard summary payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub skill_demand: Vec<SkillRecord>,
    pub regional_distribution: Vec<RegionRecord>,
    pub trend_history: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    pub label: String,
    pub value: u64,
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub period: String,
    pub series_values: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    #[serde(rename = "Upward Momentum")]
    Upward,
    #[serde(rename = "Stable Trend")]
    Stable,
    #[serde(rename = "Cooling Market")]
    Cooling,
}

impl TrendDirection {
    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Upward => "Upward Momentum",
            TrendDirection::Stable => "Stable Trend",
            TrendDirection::Cooling => "Cooling Market",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_jobs: u64,
    pub top_skill: String,
    pub top_region: String,
    pub growth_rate_percent: f64,
    pub trend_direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub period: String,
    pub forecast: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastView {
    pub series: Vec<ForecastPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_confidence_percent: Option<f64>,
    pub latest_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub kpis: Kpis,
    pub trend: Vec<TimeSeriesPoint>,
    pub series_names: Vec<String>,
    pub regions: Vec<RankedItem>,
    pub top_skills: Vec<RankedItem>,
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsView {
    pub ranking: Vec<RankedItem>,
    pub top_skill: String,
    pub total_demand: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsView {
    pub ranking: Vec<RankedItem>,
    pub total_jobs: u64,
    pub top_role: String,
    pub top_share_percent: f64,
}

/// Context row sent along with an assistant question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AskContextItem {
    pub skill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub demand: u64,
}

impl From<&SkillRecord> for AskContextItem {
    fn from(record: &SkillRecord) -> Self {
        Self {
            skill: record.skill.clone(),
            country: record.country.clone(),
            demand: record.count,
        }
    }
}

/// Outcome of one fetch, as seen by the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Ready(T),
    /// Payload failed batch-level validation; `data` is an empty dataset.
    Degraded { data: T, reason: String },
    /// Gateway failure. No view-model is rendered underneath it.
    Failed { message: String },
}

impl<T> LoadState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) | LoadState::Degraded { data, .. } => Some(data),
            LoadState::Failed { .. } => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> LoadState<U> {
        match self {
            LoadState::Ready(data) => LoadState::Ready(f(data)),
            LoadState::Degraded { data, reason } => LoadState::Degraded {
                data: f(data),
                reason,
            },
            LoadState::Failed { message } => LoadState::Failed { message },
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, LoadState::Ready(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Ready(_) => None,
            LoadState::Degraded { reason, .. } => Some(reason),
            LoadState::Failed { message } => Some(message),
        }
    }
}
