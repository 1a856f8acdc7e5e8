use crate::config::toml_config::TomlConfig;
use crate::config::{OutputFormat, Overrides, Settings};
use crate::core::Storage;
use crate::utils::error::Result;
use crate::utils::format::Locale;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "maven-copilot")]
#[command(about = "Upload spend files for analysis and show the resulting dashboard")]
pub struct CliConfig {
    /// Spend files to upload, analyzed one after another
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Analysis service upload endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Locale used for number grouping (en-US, de-DE, fr-FR)
    #[arg(long)]
    pub locale: Option<Locale>,

    /// Dashboard output format (text, json)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Some(config)
            }
            None => None,
        };

        let overrides = Overrides {
            endpoint: self.endpoint.clone(),
            locale: self.locale,
            format: self.format,
        };
        Ok(Settings::resolve(overrides, file.as_ref()))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        for file in &self.files {
            validate_path("files", file)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }
}
