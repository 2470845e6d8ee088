use crate::core::calendar::sort_by_month;
use crate::core::filter::known_countries;
use crate::core::round_to_tenth;
use crate::domain::model::{TimeSeriesPoint, TrendDirection, TrendPoint};
use std::collections::BTreeMap;

/// Growth beyond this many percent (either way) leaves the stable band.
const STABLE_BAND_PERCENT: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTotal {
    pub period: String,
    pub values: BTreeMap<String, u64>,
    pub total: u64,
}

/// Calendar-ordered multi-series time line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendLine {
    pub series: Vec<String>,
    pub periods: Vec<PeriodTotal>,
}

impl TrendLine {
    pub fn totals(&self) -> Vec<u64> {
        self.periods.iter().map(|p| p.total).collect()
    }

    pub fn time_series(&self) -> Vec<TimeSeriesPoint> {
        self.periods
            .iter()
            .map(|p| TimeSeriesPoint {
                period: p.period.clone(),
                series_values: p
                    .values
                    .iter()
                    .map(|(name, value)| (name.clone(), *value as f64))
                    .collect(),
            })
            .collect()
    }

    pub fn growth(&self) -> Growth {
        growth(&self.totals())
    }
}

/// Builds the period axis. Every known country appears in every row,
/// missing values counting as 0.
pub fn aggregate(points: &[TrendPoint]) -> TrendLine {
    let series = known_countries(points);

    let mut ordered = points.to_vec();
    sort_by_month(&mut ordered, |p| &p.month);

    let periods = ordered
        .into_iter()
        .map(|point| {
            let values: BTreeMap<String, u64> = series
                .iter()
                .map(|c| (c.clone(), point.country_values.get(c).copied().unwrap_or(0)))
                .collect();
            let total = values.values().fold(0u64, |acc, v| acc.saturating_add(*v));

            PeriodTotal {
                period: point.month,
                values,
                total,
            }
        })
        .collect();

    TrendLine { series, periods }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Growth {
    pub rate_percent: f64,
    pub direction: TrendDirection,
}

impl Default for Growth {
    fn default() -> Self {
        Self {
            rate_percent: 0.0,
            direction: TrendDirection::Stable,
        }
    }
}

/// Percentage change from the first to the last period, to one decimal.
/// Fewer than two periods, or a zero first period, yields 0.
pub fn growth(totals: &[u64]) -> Growth {
    let (Some(&first), Some(&last)) = (totals.first(), totals.last()) else {
        return Growth::default();
    };
    if totals.len() < 2 || first == 0 {
        return Growth::default();
    }

    let rate_percent = round_to_tenth((last as f64 - first as f64) / first as f64 * 100.0);
    Growth {
        rate_percent,
        direction: classify(rate_percent),
    }
}

/// Boundaries at exactly ±5 stay stable.
pub fn classify(rate_percent: f64) -> TrendDirection {
    if rate_percent > STABLE_BAND_PERCENT {
        TrendDirection::Upward
    } else if rate_percent < -STABLE_BAND_PERCENT {
        TrendDirection::Cooling
    } else {
        TrendDirection::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(month: &str, values: &[(&str, u64)]) -> TrendPoint {
        TrendPoint {
            month: month.to_string(),
            country_values: values.iter().map(|(c, v)| (c.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_aggregate_orders_periods_and_sums_all_countries() {
        let points = vec![
            point("Mar", &[("kenya", 4500), ("uganda", 2400)]),
            point("Jan", &[("kenya", 4000), ("uganda", 2100), ("rwanda", 1200)]),
            point("Feb", &[("kenya", 4200)]),
        ];

        let line = aggregate(&points);

        assert_eq!(line.series, vec!["kenya", "rwanda", "uganda"]);
        let periods: Vec<&str> = line.periods.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, vec!["Jan", "Feb", "Mar"]);
        assert_eq!(line.totals(), vec![7300, 4200, 6900]);
        assert_eq!(line.periods[1].values.get("rwanda"), Some(&0));
    }

    #[test]
    fn test_time_series_view() {
        let line = aggregate(&[point("2024-01-01", &[("kenya", 10)])]);
        let series = line.time_series();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].period, "2024-01-01");
        assert_eq!(series[0].series_values.get("kenya"), Some(&10.0));
    }

    #[test]
    fn test_aggregate_empty() {
        let line = aggregate(&[]);
        assert!(line.periods.is_empty());
        assert!(line.series.is_empty());
        assert_eq!(line.growth(), Growth::default());
    }

    #[test]
    fn test_growth_rules() {
        assert_eq!(growth(&[]).rate_percent, 0.0);
        assert_eq!(growth(&[100]).direction, TrendDirection::Stable);
        assert_eq!(growth(&[0, 5000]).rate_percent, 0.0);
        assert_eq!(growth(&[0, 5000]).direction, TrendDirection::Stable);

        let up = growth(&[9300, 9900, 12100]);
        assert_eq!(up.rate_percent, 30.1);
        assert_eq!(up.direction, TrendDirection::Upward);

        let down = growth(&[200, 150]);
        assert_eq!(down.rate_percent, -25.0);
        assert_eq!(down.direction, TrendDirection::Cooling);
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(classify(5.0), TrendDirection::Stable);
        assert_eq!(classify(5.1), TrendDirection::Upward);
        assert_eq!(classify(-5.0), TrendDirection::Stable);
        assert_eq!(classify(-5.1), TrendDirection::Cooling);

        assert_eq!(growth(&[1000, 1050]).direction, TrendDirection::Stable);
        assert_eq!(growth(&[1000, 1051]).direction, TrendDirection::Upward);
        assert_eq!(growth(&[1000, 950]).direction, TrendDirection::Stable);
        assert_eq!(growth(&[1000, 949]).direction, TrendDirection::Cooling);
    }

    #[test]
    fn test_period_total_saturates_on_extreme_counts() {
        let line = aggregate(&[
            point("Jan", &[("a", u64::MAX), ("b", 1)]),
            point("Feb", &[("a", 1)]),
        ]);
        assert_eq!(line.totals(), vec![u64::MAX, 1]);
        assert_eq!(line.growth().direction, TrendDirection::Cooling);
        assert_eq!(line.growth().rate_percent, -100.0);
    }
}
