use crate::core::views::ViewOptions;
use crate::domain::ports::{ConfigProvider, Resource};
use crate::utils::error::{InsightsError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_resource_path,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://job-forecast-app-backend-nt19.onrender.com";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const MAX_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub views: ViewsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            paths: PathsConfig::default(),
        }
    }
}

/// 各資源路徑覆寫，未設定時使用預設路徑
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub dashboard: Option<String>,
    pub forecast: Option<String>,
    pub jobs: Option<String>,
    pub skills: Option<String>,
    pub ask: Option<String>,
}

impl PathsConfig {
    fn get(&self, resource: Resource) -> Option<&String> {
        match resource {
            Resource::Dashboard => self.dashboard.as_ref(),
            Resource::Forecast => self.forecast.as_ref(),
            Resource::Jobs => self.jobs.as_ref(),
            Resource::Skills => self.skills.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsConfig {
    #[serde(default = "default_country")]
    pub default_country: String,
    #[serde(default = "default_top_skills")]
    pub top_skills: usize,
    #[serde(default = "default_top_roles")]
    pub top_roles: usize,
    pub top_regions: Option<usize>,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            default_country: default_country(),
            top_skills: default_top_skills(),
            top_roles: default_top_roles(),
            top_regions: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_country() -> String {
    "All".to_string()
}

fn default_top_skills() -> usize {
    ViewOptions::default().top_skills
}

fn default_top_roles() -> usize {
    ViewOptions::default().top_roles
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InsightsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InsightsError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GATEWAY_URL})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InsightsError::Config {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions::from_config(self)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("gateway.base_url", &self.gateway.base_url)?;
        validate_range(
            "gateway.timeout_seconds",
            self.gateway.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;

        for resource in Resource::ALL {
            if let Some(path) = self.gateway.paths.get(resource) {
                validate_resource_path(&format!("gateway.paths.{}", resource), path)?;
            }
        }
        if let Some(path) = &self.gateway.paths.ask {
            validate_resource_path("gateway.paths.ask", path)?;
        }

        validate_non_empty_string("views.default_country", &self.views.default_country)?;
        validate_positive_number("views.top_skills", self.views.top_skills, 1)?;
        validate_positive_number("views.top_roles", self.views.top_roles, 1)?;
        if let Some(top_regions) = self.views.top_regions {
            validate_positive_number("views.top_regions", top_regions, 1)?;
        }

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn base_url(&self) -> &str {
        &self.gateway.base_url
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.gateway.timeout_seconds)
    }

    fn resource_path(&self, resource: Resource) -> String {
        self.gateway
            .paths
            .get(resource)
            .cloned()
            .unwrap_or_else(|| resource.default_path().to_string())
    }

    fn ask_path(&self) -> String {
        self.gateway
            .paths
            .ask
            .clone()
            .unwrap_or_else(|| "/api/api/forecast/ask".to_string())
    }

    fn top_skills(&self) -> usize {
        self.views.top_skills
    }

    fn top_roles(&self) -> usize {
        self.views.top_roles
    }

    fn top_regions(&self) -> Option<usize> {
        self.views.top_regions
    }

    fn default_country(&self) -> &str {
        &self.views.default_country
    }
}
