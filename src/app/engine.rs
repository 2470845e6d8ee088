use crate::core::filter::{filter, Selection};
use crate::core::normalizer::{self, Dropped};
use crate::core::views::{self, ViewOptions};
use crate::domain::model::{
    AskContextItem, DashboardData, DashboardView, ForecastPoint, ForecastView, JobsView, LoadState,
    RoleRecord, SkillRecord, SkillsView,
};
use crate::domain::ports::{DataGateway, Resource};
use crate::utils::error::{ErrorCategory, Result};
use std::sync::{Mutex, MutexGuard};

/// Answer shown when the assistant endpoint cannot be reached.
pub const ASK_FALLBACK_ANSWER: &str = "Failed to get answer from backend.";

/// Identifies one fetch attempt against a [`LatestSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
struct SlotState<T> {
    issued: u64,
    state: Option<LoadState<T>>,
}

/// Holds the result of the most recently started fetch. A result that arrives
/// for any older ticket is discarded.
#[derive(Debug)]
pub struct LatestSlot<T> {
    inner: Mutex<SlotState<T>>,
}

impl<T: Clone> LatestSlot<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SlotState {
                issued: 0,
                state: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn begin(&self) -> Ticket {
        let mut inner = self.lock();
        inner.issued += 1;
        Ticket(inner.issued)
    }

    /// Returns whether the state was accepted.
    pub fn resolve(&self, ticket: Ticket, state: LoadState<T>) -> bool {
        let mut inner = self.lock();
        if ticket.0 != inner.issued {
            tracing::debug!(
                "Discarding stale fetch result (ticket {}, latest {})",
                ticket.0,
                inner.issued
            );
            return false;
        }
        inner.state = Some(state);
        true
    }

    pub fn current(&self) -> Option<LoadState<T>> {
        self.lock().state.clone()
    }
}

impl<T: Clone> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns a fetch outcome into a load state: gateway errors fail the view,
/// payload errors degrade it to an empty dataset.
fn settle<T: Default>(resource: Resource, outcome: Result<(T, Vec<Dropped>)>) -> LoadState<T> {
    match outcome {
        Ok((data, dropped)) => {
            if !dropped.is_empty() {
                tracing::debug!("{}: dropped {} malformed entries", resource, dropped.len());
            }
            LoadState::Ready(data)
        }
        Err(e) if e.category() == ErrorCategory::Payload => {
            tracing::warn!("⚠️ {}: {}", resource, e);
            LoadState::Degraded {
                data: T::default(),
                reason: e.user_friendly_message(),
            }
        }
        Err(e) => {
            tracing::error!("❌ {} fetch failed: {}", resource, e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            LoadState::Failed {
                message: e.user_friendly_message(),
            }
        }
    }
}

/// Fetches raw payloads through a gateway, keeps the latest normalized
/// dataset per resource and builds view-models from it on demand.
pub struct InsightsEngine<G: DataGateway> {
    gateway: G,
    options: ViewOptions,
    dashboard: LatestSlot<DashboardData>,
    skills: LatestSlot<Vec<SkillRecord>>,
    roles: LatestSlot<Vec<RoleRecord>>,
    forecast: LatestSlot<Vec<ForecastPoint>>,
}

impl<G: DataGateway> InsightsEngine<G> {
    pub fn new(gateway: G, options: ViewOptions) -> Self {
        Self {
            gateway,
            options,
            dashboard: LatestSlot::new(),
            skills: LatestSlot::new(),
            roles: LatestSlot::new(),
            forecast: LatestSlot::new(),
        }
    }

    async fn fetch_with<T, F>(&self, resource: Resource, parse: F) -> LoadState<T>
    where
        T: Default,
        F: FnOnce(&serde_json::Value) -> Result<(T, Vec<Dropped>)>,
    {
        tracing::info!("Fetching {} data...", resource);
        let outcome = match self.gateway.fetch(resource).await {
            Ok(payload) => parse(&payload),
            Err(e) => Err(e),
        };
        settle(resource, outcome)
    }

    pub async fn refresh_dashboard(&self) -> bool {
        let ticket = self.dashboard.begin();
        let state = self
            .fetch_with(Resource::Dashboard, normalizer::parse_dashboard)
            .await;
        self.dashboard.resolve(ticket, state)
    }

    pub async fn refresh_skills(&self) -> bool {
        let ticket = self.skills.begin();
        let state = self
            .fetch_with(Resource::Skills, |payload| {
                normalizer::parse_skills(payload).map(|n| (n.records, n.dropped))
            })
            .await;
        self.skills.resolve(ticket, state)
    }

    pub async fn refresh_jobs(&self) -> bool {
        let ticket = self.roles.begin();
        let state = self
            .fetch_with(Resource::Jobs, |payload| {
                normalizer::parse_roles(payload).map(|n| (n.records, n.dropped))
            })
            .await;
        self.roles.resolve(ticket, state)
    }

    pub async fn refresh_forecast(&self) -> bool {
        let ticket = self.forecast.begin();
        let state = self
            .fetch_with(Resource::Forecast, |payload| {
                normalizer::parse_forecast_series(payload).map(|n| (n.records, n.dropped))
            })
            .await;
        self.forecast.resolve(ticket, state)
    }

    pub async fn refresh(&self, resource: Resource) -> bool {
        match resource {
            Resource::Dashboard => self.refresh_dashboard().await,
            Resource::Skills => self.refresh_skills().await,
            Resource::Jobs => self.refresh_jobs().await,
            Resource::Forecast => self.refresh_forecast().await,
        }
    }

    pub async fn refresh_all(&self) {
        tokio::join!(
            self.refresh_dashboard(),
            self.refresh_skills(),
            self.refresh_jobs(),
            self.refresh_forecast()
        );
    }

    /// `None` until the first dashboard fetch has resolved.
    pub fn dashboard_view(&self, selection: &Selection) -> Option<LoadState<DashboardView>> {
        let options = self.options;
        self.dashboard
            .current()
            .map(|state| state.map(|data| views::dashboard_view(&data, selection, &options)))
    }

    pub fn skills_view(&self, selection: &Selection) -> Option<LoadState<SkillsView>> {
        self.skills
            .current()
            .map(|state| state.map(|records| views::skills_view(&records, selection)))
    }

    pub fn jobs_view(&self) -> Option<LoadState<JobsView>> {
        let options = self.options;
        self.roles
            .current()
            .map(|state| state.map(|roles| views::jobs_view(&roles, &options)))
    }

    pub fn forecast_view(&self, selection: &Selection) -> Option<LoadState<ForecastView>> {
        self.forecast
            .current()
            .map(|state| state.map(|points| views::forecast_view(&points, selection)))
    }

    /// Asks the assistant about the skills visible under `selection`.
    /// Blank questions are not sent.
    pub async fn ask(&self, question: &str, selection: &Selection) -> Option<String> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        let context: Vec<AskContextItem> = self
            .dashboard
            .current()
            .and_then(|state| state.data().map(|d| filter(&d.skill_demand, selection)))
            .unwrap_or_default()
            .iter()
            .map(AskContextItem::from)
            .collect();

        match self.gateway.ask(question, &context).await {
            Ok(answer) => Some(answer),
            Err(e) => {
                tracing::error!("❌ Assistant request failed: {}", e);
                Some(ASK_FALLBACK_ANSWER.to_string())
            }
        }
    }
}
