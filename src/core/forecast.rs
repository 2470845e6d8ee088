use crate::core::calendar::sort_by_month;
use crate::core::round_to_tenth;
use crate::domain::model::{ForecastPeriod, ForecastPoint, ForecastView};
use std::collections::HashMap;

#[derive(Debug)]
struct MonthBucket {
    month: String,
    forecast: f64,
    lower: Option<f64>,
    upper: Option<f64>,
    has_interval: bool,
}

impl MonthBucket {
    fn new(month: &str) -> Self {
        Self {
            month: month.to_string(),
            forecast: 0.0,
            lower: None,
            upper: None,
            has_interval: false,
        }
    }

    fn add(&mut self, point: &ForecastPoint) {
        self.forecast += point.forecast;
        if let Some(lower) = point.lower {
            *self.lower.get_or_insert(0.0) += lower;
        }
        if let Some(upper) = point.upper {
            *self.upper.get_or_insert(0.0) += upper;
        }
        self.has_interval |= point.lower.is_some() && point.upper.is_some();
    }

    /// Interval tightness relative to the estimate; `None` without a full interval.
    fn confidence(&self) -> Option<f64> {
        if !self.has_interval {
            return None;
        }
        let (lower, upper) = (self.lower?, self.upper?);
        Some(1.0 - (upper - lower) / self.forecast.max(1.0))
    }
}

/// Merges forecasts for all skills and countries into one monthly series.
///
/// Points are grouped by their raw month label and each bound is summed over
/// the points that carry it. The confidence is the mean over months with a
/// full interval, as a percentage; it stays `None` when no month has one.
pub fn aggregate_forecast(points: &[ForecastPoint]) -> ForecastView {
    let mut buckets: Vec<MonthBucket> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for point in points {
        let slot = *index.entry(point.month.as_str()).or_insert_with(|| {
            buckets.push(MonthBucket::new(&point.month));
            buckets.len() - 1
        });
        buckets[slot].add(point);
    }

    sort_by_month(&mut buckets, |b| &b.month);

    let contributions: Vec<f64> = buckets.iter().filter_map(MonthBucket::confidence).collect();
    let overall_confidence_percent = if contributions.is_empty() {
        None
    } else {
        let mean = contributions.iter().sum::<f64>() / contributions.len() as f64;
        Some(round_to_tenth(mean * 100.0))
    };

    let latest_value = buckets.last().map(|b| b.forecast).unwrap_or(0.0);

    let series = buckets
        .into_iter()
        .map(|b| ForecastPeriod {
            period: b.month,
            forecast: b.forecast,
            lower: b.lower,
            upper: b.upper,
        })
        .collect();

    ForecastView {
        series,
        overall_confidence_percent,
        latest_value,
    }
}
