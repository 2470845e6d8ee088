use crate::config::toml_config::AppConfig;
use crate::domain::ports::Resource;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Dashboard,
    Skills,
    Jobs,
    Forecast,
    All,
}

impl View {
    /// The single resource behind this view; `None` for `All`.
    pub fn resource(&self) -> Option<Resource> {
        match self {
            View::Dashboard => Some(Resource::Dashboard),
            View::Skills => Some(Resource::Skills),
            View::Jobs => Some(Resource::Jobs),
            View::Forecast => Some(Resource::Forecast),
            View::All => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "job-insights")]
#[command(about = "Labor-market indicators computed from the job data gateway")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Gateway base URL (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Country to filter by, or "All"
    #[arg(long)]
    pub country: Option<String>,

    #[arg(long, value_enum, default_value = "all")]
    pub view: View,

    #[arg(long)]
    pub top_skills: Option<usize>,

    #[arg(long)]
    pub top_roles: Option<usize>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Ask the forecast assistant a question about the selected skills
    #[arg(long)]
    pub ask: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.gateway.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.gateway.timeout_seconds = timeout;
        }
        if let Some(country) = &self.country {
            config.views.default_country = country.clone();
        }
        if let Some(top_skills) = self.top_skills {
            config.views.top_skills = top_skills;
        }
        if let Some(top_roles) = self.top_roles {
            config.views.top_roles = top_roles;
        }

        config.validate()?;
        Ok(config)
    }
}
