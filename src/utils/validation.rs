use crate::utils::error::{CopilotError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CopilotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CopilotError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CopilotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(CopilotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CopilotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 環境變數未替換時會留下 `${VAR}` 字樣
pub fn validate_no_placeholder(field_name: &str, value: &str) -> Result<()> {
    if value.contains("${") {
        return Err(CopilotError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("Unresolved environment variable in '{}'", value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoint", "https://example.com/upload/").is_ok());
        assert!(validate_url("endpoint", "http://localhost:8000/upload/").is_ok());
        assert!(validate_url("endpoint", "").is_err());
        assert!(validate_url("endpoint", "invalid-url").is_err());
        assert!(validate_url("endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("files", "spend.csv").is_ok());
        assert!(validate_path("files", "   ").is_err());
        assert!(validate_path("files", "bad\0name.csv").is_err());
    }

    #[test]
    fn test_validate_no_placeholder() {
        assert!(validate_no_placeholder("service.endpoint", "https://a.b/upload/").is_ok());
        assert!(validate_no_placeholder("service.endpoint", "${MAVEN_ENDPOINT}").is_err());
    }
}
