use crate::domain::model::AskContextItem;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Dashboard,
    Forecast,
    Jobs,
    Skills,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Dashboard,
        Resource::Forecast,
        Resource::Jobs,
        Resource::Skills,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Dashboard => "dashboard",
            Resource::Forecast => "forecast",
            Resource::Jobs => "jobs",
            Resource::Skills => "skills",
        }
    }

    pub fn default_path(&self) -> &'static str {
        match self {
            Resource::Dashboard => "/api/dashboard/",
            Resource::Forecast => "/api/forecast/",
            Resource::Jobs => "/api/api/jobs/",
            Resource::Skills => "/api/api/skills/",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Duration;
    fn resource_path(&self, resource: Resource) -> String;
    fn ask_path(&self) -> String {
        "/api/api/forecast/ask".to_string()
    }
    fn top_skills(&self) -> usize;
    fn top_roles(&self) -> usize;
    fn top_regions(&self) -> Option<usize>;
    fn default_country(&self) -> &str;
}

/// Source of raw labor-market payloads.
#[async_trait]
pub trait DataGateway: Send + Sync {
    async fn fetch(&self, resource: Resource) -> Result<serde_json::Value>;
    async fn ask(&self, question: &str, context: &[AskContextItem]) -> Result<String>;
}
