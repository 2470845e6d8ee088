use crate::utils::error::{InsightsError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(InsightsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(InsightsError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(InsightsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_resource_path(field_name: &str, path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(InsightsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Resource path must start with '/'".to_string(),
        });
    }

    if path.contains(char::is_whitespace) {
        return Err(InsightsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Resource path cannot contain whitespace".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(InsightsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InsightsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(InsightsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("gateway.base_url", "https://example.com").is_ok());
        assert!(validate_url("gateway.base_url", "http://example.com").is_ok());
        assert!(validate_url("gateway.base_url", "").is_err());
        assert!(validate_url("gateway.base_url", "invalid-url").is_err());
        assert!(validate_url("gateway.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_resource_path() {
        assert!(validate_resource_path("paths.jobs", "/api/api/jobs/").is_ok());
        assert!(validate_resource_path("paths.jobs", "api/jobs").is_err());
        assert!(validate_resource_path("paths.jobs", "/api/ jobs").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("views.top_skills", 5, 1).is_ok());
        assert!(validate_positive_number("views.top_skills", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range_and_non_empty() {
        assert!(validate_range("gateway.timeout_seconds", 30u64, 1, 300).is_ok());
        assert!(validate_range("gateway.timeout_seconds", 0u64, 1, 300).is_err());

        assert!(validate_non_empty_string("views.default_country", "  ").is_err());
    }
}
