use thiserror::Error;

#[derive(Error, Debug)]
pub enum CopilotError {
    #[error("Analysis request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Analysis service responded with status {status}")]
    ServiceStatusError { status: u16 },

    #[error("Malformed analysis response: {message}")]
    DecodeError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Config validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Service,
    Data,
    FileSystem,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CopilotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CopilotError::TransportError(_) => ErrorCategory::Network,
            CopilotError::ServiceStatusError { .. } => ErrorCategory::Service,
            CopilotError::DecodeError { .. } | CopilotError::SerializationError(_) => {
                ErrorCategory::Data
            }
            CopilotError::IoError(_) => ErrorCategory::FileSystem,
            CopilotError::ConfigError { .. }
            | CopilotError::InvalidConfigValueError { .. }
            | CopilotError::MissingConfigError { .. }
            | CopilotError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 上傳失敗只影響單一週期，頁面 (程序) 仍可繼續
            ErrorCategory::Network | ErrorCategory::Service => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::FileSystem => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CopilotError::TransportError(_) => {
                "Check your network connection and that the analysis endpoint is reachable"
            }
            CopilotError::ServiceStatusError { status } if *status >= 500 => {
                "The analysis service is having trouble; try the upload again later"
            }
            CopilotError::ServiceStatusError { .. } => {
                "The analysis service rejected the file; check that it is a valid spend export"
            }
            CopilotError::DecodeError { .. } | CopilotError::SerializationError(_) => {
                "The analysis service returned an unexpected payload; verify the endpoint version"
            }
            CopilotError::IoError(_) => "Make sure the spend file exists and is readable",
            CopilotError::ConfigError { .. }
            | CopilotError::InvalidConfigValueError { .. }
            | CopilotError::MissingConfigError { .. }
            | CopilotError::ConfigValidationError { .. } => {
                "Review the command-line flags and the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CopilotError::TransportError(_) => "Could not reach the analysis service".to_string(),
            CopilotError::ServiceStatusError { status } => {
                format!("The analysis service could not process the file (HTTP {})", status)
            }
            CopilotError::DecodeError { .. } | CopilotError::SerializationError(_) => {
                "The analysis results could not be read".to_string()
            }
            CopilotError::IoError(e) => format!("Could not read the spend file: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CopilotError>;
