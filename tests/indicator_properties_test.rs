use job_insights::core::forecast::aggregate_forecast;
use job_insights::core::normalizer::{normalize_forecast, normalize_skills, normalize_trend};
use job_insights::core::ranking::{rank, NO_TOP_ITEM};
use job_insights::core::trend::{aggregate, classify, growth};
use job_insights::domain::model::{ForecastPoint, RegionRecord, RoleRecord, TrendDirection};

fn regions(jobs: &[u64]) -> Vec<RegionRecord> {
    jobs.iter()
        .enumerate()
        .map(|(i, jobs)| RegionRecord {
            country: format!("country-{}", i),
            jobs: *jobs,
        })
        .collect()
}

#[test]
fn test_share_sums_stay_within_tolerance() {
    let populations: Vec<Vec<u64>> = vec![
        vec![1],
        vec![1, 1, 1],
        vec![5400, 2100, 2800, 1800, 382],
        vec![7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43],
        vec![1, 0, 0, 999_999],
        (1..=40).collect(),
    ];

    for population in populations {
        let ranking = rank(&regions(&population), None);
        let sum: f64 = ranking.items.iter().map(|i| i.share_percent).sum();
        assert!(
            (99.9..=100.1).contains(&sum),
            "shares for {:?} sum to {}",
            population,
            sum
        );
        assert!(ranking.items.iter().all(|i| (0.0..=100.0).contains(&i.share_percent)));
    }
}

#[test]
fn test_zero_total_ranking() {
    let ranking = rank(&regions(&[0, 0, 0]), Some(2));
    assert_eq!(ranking.top_item, NO_TOP_ITEM);
    assert_eq!(ranking.total_value, 0);
    assert!(ranking.items.iter().all(|i| i.share_percent == 0.0));
}

#[test]
fn test_zero_first_period_means_zero_growth() {
    for last in [0, 1, 500, 1_000_000] {
        assert_eq!(growth(&[0, 10, last]).rate_percent, 0.0);
    }
}

#[test]
fn test_direction_boundaries() {
    assert_eq!(classify(5.0), TrendDirection::Stable);
    assert_eq!(classify(5.1), TrendDirection::Upward);
    assert_eq!(classify(-5.0), TrendDirection::Stable);
    assert_eq!(classify(-5.1), TrendDirection::Cooling);
    assert_eq!(TrendDirection::Cooling.to_string(), "Cooling Market");
}

#[test]
fn test_forecast_points_merge_per_month() {
    let point = |forecast: f64, lower: f64, upper: f64| ForecastPoint {
        skill: "Python".to_string(),
        country: None,
        month: "Jul".to_string(),
        forecast,
        lower: Some(lower),
        upper: Some(upper),
    };

    let view = aggregate_forecast(&[point(100.0, 90.0, 110.0), point(50.0, 40.0, 60.0)]);

    assert_eq!(view.series.len(), 1);
    assert_eq!(view.series[0].period, "Jul");
    assert_eq!(view.series[0].forecast, 150.0);
    assert_eq!(view.series[0].lower, Some(130.0));
    assert_eq!(view.series[0].upper, Some(170.0));
}

#[test]
fn test_empty_inputs_are_defined() {
    assert!(normalize_skills(&[]).records.is_empty());
    assert!(normalize_trend(&[]).records.is_empty());
    assert!(normalize_forecast(&[]).records.is_empty());

    let ranking = rank::<RoleRecord>(&[], Some(5));
    assert!(ranking.items.is_empty());
    assert_eq!(ranking.top_item, NO_TOP_ITEM);

    let line = aggregate(&[]);
    assert!(line.periods.is_empty());
    assert_eq!(line.growth().direction, TrendDirection::Stable);

    let forecast = aggregate_forecast(&[]);
    assert!(forecast.series.is_empty());
    assert_eq!(forecast.latest_value, 0.0);
    assert!(forecast.overall_confidence_percent.is_none());
}

#[test]
fn test_view_models_serialize_with_contract_names() {
    let ranking = rank(&regions(&[3, 1]), None);
    let json = serde_json::to_value(&ranking.items[0]).unwrap();
    assert_eq!(json["label"], "country-0");
    assert_eq!(json["sharePercent"], 75.0);

    let view = aggregate_forecast(&[]);
    let json = serde_json::to_value(&view).unwrap();
    assert!(json.get("overallConfidencePercent").is_none());
    assert_eq!(json["latestValue"], 0.0);
}

#[test]
fn test_extreme_counts_stay_defined() {
    let roles = vec![
        RoleRecord {
            role: "Software Engineer".to_string(),
            count: u64::MAX,
        },
        RoleRecord {
            role: "Data Analyst".to_string(),
            count: 1,
        },
    ];
    let ranking = rank(&roles, None);
    assert_eq!(ranking.total_value, u64::MAX);
    assert_eq!(ranking.top_item, "Software Engineer");
    let sum: f64 = ranking.items.iter().map(|i| i.share_percent).sum();
    assert!((99.9..=100.1).contains(&sum));

    let trend = vec![job_insights::domain::model::TrendPoint {
        month: "Jan".to_string(),
        country_values: [("kenya".to_string(), u64::MAX), ("uganda".to_string(), 1)]
            .into_iter()
            .collect(),
    }];
    let line = aggregate(&trend);
    assert_eq!(line.totals(), vec![u64::MAX]);
    assert_eq!(line.growth().rate_percent, 0.0);
}
