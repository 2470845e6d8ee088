use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gateway returned HTTP {status} for {url}")]
    GatewayStatus { status: u16, url: String },

    #[error("Malformed {resource} payload: {message}")]
    MalformedPayload { resource: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidation { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Gateway,
    Payload,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a fatal error; never 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl InsightsError {
    pub fn malformed(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) | Self::GatewayStatus { .. } => ErrorCategory::Gateway,
            Self::MalformedPayload { .. } => ErrorCategory::Payload,
            Self::Config { .. }
            | Self::InvalidConfigValue { .. }
            | Self::ConfigValidation { .. } => ErrorCategory::Configuration,
            Self::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 資料格式錯誤：以空資料集呈現，不中斷流程
            ErrorCategory::Payload => ErrorSeverity::Low,
            ErrorCategory::Gateway => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Check network connectivity and that the gateway base URL is reachable",
            Self::GatewayStatus { status, .. } if *status >= 500 => {
                "The gateway is unavailable right now; retry later"
            }
            Self::GatewayStatus { .. } => "Verify the resource paths configured for the gateway",
            Self::MalformedPayload { .. } => {
                "The gateway response did not match the expected shape; verify the backend version"
            }
            Self::Io(_) => "Check file permissions and that the path exists",
            Self::Config { .. }
            | Self::InvalidConfigValue { .. }
            | Self::ConfigValidation { .. } => "Review the command-line flags and the TOML configuration file",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the data gateway".to_string(),
            Self::GatewayStatus { status, .. } => format!("HTTP error {}", status),
            Self::MalformedPayload { resource, .. } => {
                format!("Received unexpected {} data from the gateway", resource)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InsightsError>;
