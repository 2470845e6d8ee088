use crate::domain::model::{
    DashboardData, ForecastPoint, RegionRecord, RoleRecord, SkillRecord, TrendPoint,
};
use crate::domain::ports::Resource;
use crate::utils::error::{InsightsError, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

type Object = Map<String, Value>;
type FieldResult<T> = std::result::Result<T, String>;

/// An entry rejected during normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Dropped {
    pub kind: &'static str,
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    pub dropped: Vec<Dropped>,
}

impl<T> Default for Normalized<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            dropped: Vec::new(),
        }
    }
}

fn normalize_entries<T, F>(entries: &[Value], kind: &'static str, parse: F) -> Normalized<T>
where
    F: Fn(&Object) -> FieldResult<T>,
{
    let mut normalized = Normalized::default();

    for (index, entry) in entries.iter().enumerate() {
        let outcome = match entry {
            Value::Object(obj) => parse(obj),
            _ => Err("entry is not an object".to_string()),
        };

        match outcome {
            Ok(record) => normalized.records.push(record),
            Err(reason) => {
                tracing::debug!("Dropping {} entry #{}: {}", kind, index, reason);
                normalized.dropped.push(Dropped { kind, index, reason });
            }
        }
    }

    normalized
}

fn lookup<'a>(obj: &'a Object, names: &[&str]) -> Option<(&'a str, &'a Value)> {
    names
        .iter()
        .find_map(|name| obj.get_key_value(*name))
        .map(|(key, value)| (key.as_str(), value))
}

fn string_field(obj: &Object, names: &[&str]) -> FieldResult<String> {
    match lookup(obj, names) {
        Some((_, Value::String(s))) => Ok(s.clone()),
        Some((key, _)) => Err(format!("field `{}` is not a string", key)),
        None => Err(format!("missing field `{}`", names[0])),
    }
}

fn optional_string_field(obj: &Object, names: &[&str]) -> FieldResult<Option<String>> {
    match lookup(obj, names) {
        None | Some((_, Value::Null)) => Ok(None),
        Some((_, Value::String(s))) => Ok(Some(s.clone())),
        Some((key, _)) => Err(format!("field `{}` is not a string", key)),
    }
}

fn as_count(key: &str, value: &Value) -> FieldResult<u64> {
    let Value::Number(n) = value else {
        return Err(format!("field `{}` is not a number", key));
    };

    if let Some(count) = n.as_u64() {
        return Ok(count);
    }

    match n.as_f64() {
        Some(f) if f < 0.0 => Err(format!("field `{}` is negative", key)),
        Some(f) if f.is_finite() && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
        _ => Err(format!("field `{}` is not a whole number", key)),
    }
}

fn count_field(obj: &Object, names: &[&str]) -> FieldResult<u64> {
    match lookup(obj, names) {
        Some((key, value)) => as_count(key, value),
        None => Err(format!("missing field `{}`", names[0])),
    }
}

fn as_measure(key: &str, value: &Value) -> FieldResult<f64> {
    match value.as_f64() {
        Some(f) if !f.is_finite() => Err(format!("field `{}` is not finite", key)),
        Some(f) if f < 0.0 => Err(format!("field `{}` is negative", key)),
        Some(f) => Ok(f),
        None => Err(format!("field `{}` is not a number", key)),
    }
}

fn optional_measure_field(obj: &Object, names: &[&str]) -> FieldResult<Option<f64>> {
    match lookup(obj, names) {
        None | Some((_, Value::Null)) => Ok(None),
        Some((key, value)) => as_measure(key, value).map(Some),
    }
}

fn parse_skill(obj: &Object) -> FieldResult<SkillRecord> {
    Ok(SkillRecord {
        skill: string_field(obj, &["skill", "name"])?,
        country: Some(string_field(obj, &["country"])?),
        month: Some(string_field(obj, &["month"])?),
        count: count_field(obj, &["count", "demand"])?,
    })
}

// 儀表板摘要的技能列可能沒有 month / country
fn parse_summary_skill(obj: &Object) -> FieldResult<SkillRecord> {
    Ok(SkillRecord {
        skill: string_field(obj, &["skill", "name"])?,
        country: optional_string_field(obj, &["country"])?,
        month: optional_string_field(obj, &["month"])?,
        count: count_field(obj, &["count", "demand"])?,
    })
}

fn parse_region(obj: &Object) -> FieldResult<RegionRecord> {
    Ok(RegionRecord {
        country: string_field(obj, &["country"])?,
        jobs: count_field(obj, &["jobs"])?,
    })
}

fn parse_role(obj: &Object) -> FieldResult<RoleRecord> {
    Ok(RoleRecord {
        role: string_field(obj, &["role"])?,
        count: count_field(obj, &["count"])?,
    })
}

fn parse_trend(obj: &Object) -> FieldResult<TrendPoint> {
    let month = string_field(obj, &["month"])?;
    let mut country_values = BTreeMap::new();

    match lookup(obj, &["countryValue", "country_values"]) {
        Some((_, Value::Object(mapping))) => {
            for (country, value) in mapping {
                country_values.insert(country.clone(), as_count(country, value)?);
            }
        }
        Some((key, _)) => return Err(format!("field `{}` is not an object", key)),
        // 扁平格式：除 month 以外的每個欄位都是國家
        None => {
            for (country, value) in obj.iter().filter(|(k, _)| k.as_str() != "month") {
                country_values.insert(country.clone(), as_count(country, value)?);
            }
        }
    }

    Ok(TrendPoint {
        month,
        country_values,
    })
}

fn parse_forecast(obj: &Object) -> FieldResult<ForecastPoint> {
    let forecast = match lookup(obj, &["forecast"]) {
        Some((key, value)) => as_measure(key, value)?,
        None => return Err("missing field `forecast`".to_string()),
    };
    let lower = optional_measure_field(obj, &["lower", "forecast_lower"])?;
    let upper = optional_measure_field(obj, &["upper", "forecast_upper"])?;

    if lower.is_some_and(|l| l > forecast) {
        return Err("lower bound exceeds forecast".to_string());
    }
    if upper.is_some_and(|u| u < forecast) {
        return Err("upper bound is below forecast".to_string());
    }

    Ok(ForecastPoint {
        skill: string_field(obj, &["skill"])?,
        country: optional_string_field(obj, &["country"])?,
        month: string_field(obj, &["month"])?,
        forecast,
        lower,
        upper,
    })
}

pub fn normalize_skills(entries: &[Value]) -> Normalized<SkillRecord> {
    normalize_entries(entries, "skill", parse_skill)
}

/// Dashboard `skill_demand` rows: `month` and `country` are optional.
pub fn normalize_summary_skills(entries: &[Value]) -> Normalized<SkillRecord> {
    normalize_entries(entries, "skill", parse_summary_skill)
}

pub fn normalize_regions(entries: &[Value]) -> Normalized<RegionRecord> {
    normalize_entries(entries, "region", parse_region)
}

pub fn normalize_roles(entries: &[Value]) -> Normalized<RoleRecord> {
    normalize_entries(entries, "role", parse_role)
}

pub fn normalize_trend(entries: &[Value]) -> Normalized<TrendPoint> {
    normalize_entries(entries, "trend", parse_trend)
}

pub fn normalize_forecast(entries: &[Value]) -> Normalized<ForecastPoint> {
    normalize_entries(entries, "forecast", parse_forecast)
}

/// Batch-level check: list resources must be a JSON array.
pub fn expect_array(resource: Resource, payload: &Value) -> Result<&[Value]> {
    payload.as_array().map(Vec::as_slice).ok_or_else(|| {
        InsightsError::malformed(resource.name(), "expected a JSON array at the top level")
    })
}

fn dashboard_section<'a>(obj: &'a Object, key: &str) -> Result<&'a [Value]> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(InsightsError::malformed(
            Resource::Dashboard.name(),
            format!("`{}` is not an array", key),
        )),
    }
}

/// Normalizes the dashboard summary. Absent sections are treated as empty.
pub fn parse_dashboard(payload: &Value) -> Result<(DashboardData, Vec<Dropped>)> {
    let obj = payload.as_object().ok_or_else(|| {
        InsightsError::malformed(Resource::Dashboard.name(), "expected a JSON object")
    })?;

    let skills = normalize_summary_skills(dashboard_section(obj, "skill_demand")?);
    let regions = normalize_regions(dashboard_section(obj, "regional_distribution")?);
    let trend = normalize_trend(dashboard_section(obj, "trend_history")?);

    let mut dropped = skills.dropped;
    dropped.extend(regions.dropped);
    dropped.extend(trend.dropped);

    Ok((
        DashboardData {
            skill_demand: skills.records,
            regional_distribution: regions.records,
            trend_history: trend.records,
        },
        dropped,
    ))
}

pub fn parse_skills(payload: &Value) -> Result<Normalized<SkillRecord>> {
    Ok(normalize_skills(expect_array(Resource::Skills, payload)?))
}

pub fn parse_roles(payload: &Value) -> Result<Normalized<RoleRecord>> {
    Ok(normalize_roles(expect_array(Resource::Jobs, payload)?))
}

pub fn parse_forecast_series(payload: &Value) -> Result<Normalized<ForecastPoint>> {
    Ok(normalize_forecast(expect_array(Resource::Forecast, payload)?))
}
