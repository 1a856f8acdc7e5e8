#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::format::Locale;
use crate::utils::validation::{validate_no_placeholder, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use toml_config::TomlConfig;

pub const DEFAULT_ENDPOINT: &str = "https://maven-backend-agentic-ver-3-5.onrender.com/upload/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Unsupported output format '{}'. Valid formats: text, json",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// 合併命令列、TOML 與預設值後的最終設定
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: String,
    pub locale: Locale,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            locale: Locale::default(),
            format: OutputFormat::default(),
        }
    }
}

/// 命令列可覆蓋的欄位
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub locale: Option<Locale>,
    pub format: Option<OutputFormat>,
}

impl Settings {
    /// 優先順序：命令列 > TOML > 預設值
    pub fn resolve(overrides: Overrides, file: Option<&TomlConfig>) -> Self {
        let defaults = Settings::default();
        Self {
            endpoint: overrides
                .endpoint
                .or_else(|| file.and_then(|f| f.endpoint()).map(str::to_string))
                .unwrap_or(defaults.endpoint),
            locale: overrides
                .locale
                .or_else(|| file.and_then(|f| f.locale()))
                .unwrap_or(defaults.locale),
            format: overrides
                .format
                .or_else(|| file.and_then(|f| f.format()))
                .unwrap_or(defaults.format),
        }
    }

    /// JSON 儀表板搭配 JSON 日誌
    pub fn json_logs(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

impl ConfigProvider for Settings {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn locale(&self) -> Locale {
        self.locale
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_no_placeholder("endpoint", &self.endpoint)?;
        validate_url("endpoint", &self.endpoint)?;
        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(Overrides::default(), None);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.locale, Locale::EnUs);
        assert_eq!(settings.format, OutputFormat::Text);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_toml() {
        let file = TomlConfig::from_toml_str(
            r#"
[service]
endpoint = "https://from-file.example.com/upload/"

[display]
locale = "fr-FR"
format = "json"
"#,
        )
        .unwrap();

        let settings = Settings::resolve(
            Overrides {
                endpoint: Some("http://localhost:9000/upload/".to_string()),
                locale: None,
                format: Some(OutputFormat::Text),
            },
            Some(&file),
        );

        assert_eq!(settings.endpoint, "http://localhost:9000/upload/");
        assert_eq!(settings.locale, Locale::FrFr);
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn test_json_format_from_toml_selects_json_logs() {
        let file = TomlConfig::from_toml_str("[display]\nformat = \"json\"\n").unwrap();

        let settings = Settings::resolve(Overrides::default(), Some(&file));
        assert!(settings.json_logs());

        let settings = Settings::resolve(
            Overrides {
                format: Some(OutputFormat::Text),
                ..Overrides::default()
            },
            Some(&file),
        );
        assert!(!settings.json_logs());
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let settings = Settings {
            endpoint: "not a url".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Text.to_string(), "text");
    }
}
