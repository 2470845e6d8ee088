use crate::domain::model::{ForecastPoint, RegionRecord, SkillRecord, TrendPoint};
use std::collections::{BTreeMap, BTreeSet};

const ALL_ALIASES: [&str; 3] = ["all", "all countries", "all region"];

/// Country selection driving every view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    All,
    Country(String),
}

impl Selection {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || ALL_ALIASES.iter().any(|a| trimmed.eq_ignore_ascii_case(a)) {
            Selection::All
        } else {
            Selection::Country(trimmed.to_string())
        }
    }

    pub fn matches(&self, country: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Country(selected) => same_country(selected, country),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Selection::All => "All",
            Selection::Country(country) => country,
        }
    }
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        Selection::parse(raw)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn same_country(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Records that belong to a country.
pub trait Located {
    fn country(&self) -> Option<&str>;
}

impl Located for SkillRecord {
    fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

impl Located for RegionRecord {
    fn country(&self) -> Option<&str> {
        Some(&self.country)
    }
}

impl Located for ForecastPoint {
    fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

/// Records without a country only survive the `All` selection.
pub fn filter<T: Located + Clone>(records: &[T], selection: &Selection) -> Vec<T> {
    match selection {
        Selection::All => records.to_vec(),
        Selection::Country(_) => records
            .iter()
            .filter(|r| r.country().is_some_and(|c| selection.matches(c)))
            .cloned()
            .collect(),
    }
}

/// Projects each point down to the selected country, keeping the period axis.
/// Case variants of the country key are summed; a point with no value for the
/// country contributes 0.
pub fn filter_trend(points: &[TrendPoint], selection: &Selection) -> Vec<TrendPoint> {
    let Selection::Country(selected) = selection else {
        return points.to_vec();
    };

    points
        .iter()
        .map(|point| {
            let value = point
                .country_values
                .iter()
                .filter(|(country, _)| same_country(selected, country))
                .fold(0u64, |acc, (_, value)| acc.saturating_add(*value));

            TrendPoint {
                month: point.month.clone(),
                country_values: BTreeMap::from([(selected.clone(), value)]),
            }
        })
        .collect()
}

/// Sorted union of the countries seen across all trend points.
pub fn known_countries(points: &[TrendPoint]) -> Vec<String> {
    points
        .iter()
        .flat_map(|p| p.country_values.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(country: &str, jobs: u64) -> RegionRecord {
        RegionRecord {
            country: country.to_string(),
            jobs,
        }
    }

    fn trend(month: &str, values: &[(&str, u64)]) -> TrendPoint {
        TrendPoint {
            month: month.to_string(),
            country_values: values.iter().map(|(c, v)| (c.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!(Selection::parse("All"), Selection::All);
        assert_eq!(Selection::parse("all region"), Selection::All);
        assert_eq!(Selection::parse(""), Selection::All);
        assert_eq!(Selection::parse(" Kenya "), Selection::Country("Kenya".to_string()));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let records = vec![region("Kenya", 5400), region("Uganda", 2800), region("KENYA", 10)];

        let kenya = filter(&records, &Selection::parse("kenya"));
        assert_eq!(kenya, vec![region("Kenya", 5400), region("KENYA", 10)]);

        let all = filter(&records, &Selection::All);
        assert_eq!(all, records);
    }

    #[test]
    fn test_forecast_without_country_only_in_all() {
        let point = ForecastPoint {
            skill: "Python".to_string(),
            country: None,
            month: "Jul".to_string(),
            forecast: 10.0,
            lower: None,
            upper: None,
        };

        assert_eq!(filter(&[point.clone()], &Selection::All).len(), 1);
        assert!(filter(&[point], &Selection::parse("Kenya")).is_empty());
    }

    #[test]
    fn test_filter_trend_projects_to_singleton() {
        let points = vec![
            trend("Jan", &[("kenya", 4000), ("uganda", 2100)]),
            trend("Feb", &[("uganda", 2200)]),
        ];

        let projected = filter_trend(&points, &Selection::parse("Kenya"));

        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0], trend("Jan", &[("Kenya", 4000)]));
        assert_eq!(projected[1], trend("Feb", &[("Kenya", 0)]));
    }

    #[test]
    fn test_filter_trend_sums_case_variant_keys() {
        let points = vec![trend("Jan", &[("Kenya", 4000), ("kenya", 150), ("uganda", 2100)])];

        let projected = filter_trend(&points, &Selection::parse("KENYA"));

        assert_eq!(projected[0], trend("Jan", &[("KENYA", 4150)]));
    }

    #[test]
    fn test_known_countries_sorted_union() {
        let points = vec![
            trend("Jan", &[("uganda", 1), ("kenya", 2)]),
            trend("Feb", &[("rwanda", 3)]),
        ];
        assert_eq!(known_countries(&points), vec!["kenya", "rwanda", "uganda"]);
        assert!(known_countries(&[]).is_empty());
    }
}
