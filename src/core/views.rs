use crate::core::filter::{filter, filter_trend, known_countries, Selection};
use crate::core::forecast::aggregate_forecast;
use crate::core::ranking::rank;
use crate::core::trend::aggregate;
use crate::domain::model::{
    DashboardData, DashboardView, ForecastPoint, ForecastView, JobsView, Kpis, RoleRecord,
    SkillRecord, SkillsView,
};
use crate::domain::ports::ConfigProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub top_skills: usize,
    pub top_roles: usize,
    pub top_regions: Option<usize>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            top_skills: 5,
            top_roles: 6,
            top_regions: None,
        }
    }
}

impl ViewOptions {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            top_skills: config.top_skills(),
            top_roles: config.top_roles(),
            top_regions: config.top_regions(),
        }
    }
}

pub fn dashboard_view(
    data: &DashboardData,
    selection: &Selection,
    options: &ViewOptions,
) -> DashboardView {
    let skills = filter(&data.skill_demand, selection);
    let regions = filter(&data.regional_distribution, selection);
    let trend = aggregate(&filter_trend(&data.trend_history, selection));

    let skill_ranking = rank(&skills, Some(options.top_skills));
    let region_ranking = rank(&regions, options.top_regions);
    let growth = trend.growth();

    DashboardView {
        kpis: Kpis {
            total_jobs: region_ranking.total_value,
            top_skill: skill_ranking.top_item,
            top_region: region_ranking.top_item,
            growth_rate_percent: growth.rate_percent,
            trend_direction: growth.direction,
        },
        trend: trend.time_series(),
        series_names: trend.series,
        regions: region_ranking.items,
        top_skills: skill_ranking.items,
        countries: known_countries(&data.trend_history),
    }
}

pub fn skills_view(records: &[SkillRecord], selection: &Selection) -> SkillsView {
    let ranking = rank(&filter(records, selection), None);
    SkillsView {
        ranking: ranking.items,
        top_skill: ranking.top_item,
        total_demand: ranking.total_value,
    }
}

/// Role shares are taken over every role, not only the listed top ones.
pub fn jobs_view(roles: &[RoleRecord], options: &ViewOptions) -> JobsView {
    let ranking = rank(roles, Some(options.top_roles));
    JobsView {
        top_share_percent: ranking.top_share_percent(),
        ranking: ranking.items,
        total_jobs: ranking.total_value,
        top_role: ranking.top_item,
    }
}

pub fn forecast_view(points: &[ForecastPoint], selection: &Selection) -> ForecastView {
    aggregate_forecast(&filter(points, selection))
}
