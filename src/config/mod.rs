pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{ExtractionSettings, NerSettings, Strategy, DEFAULT_YEAR};
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "trip-extract")]
#[command(about = "Extract business-trip details from Korean sentences")]
pub struct CliConfig {
    /// Sentences to analyse (bundled samples are used when none are given)
    pub texts: Vec<String>,

    /// Input file: .txt with one sentence per line, or .json with an array of strings
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, value_enum, default_value_t = Strategy::Rules)]
    pub strategy: Strategy,

    /// Year assumed for dates written without one
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub default_year: i32,

    /// Token-classification endpoint used by the ner and hybrid strategies
    #[arg(long)]
    pub ner_endpoint: Option<String>,

    /// Environment variable holding the NER API token
    #[arg(long, default_value = "HF_TOKEN")]
    pub ner_token_env: String,

    #[arg(long, default_value = "30")]
    pub ner_timeout: u64,

    #[arg(long, value_delimiter = ',')]
    pub extra_locations: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub extra_stop_words: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub extra_titles: Vec<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Files to write (json, csv); stdout only when empty
    #[arg(long, value_delimiter = ',')]
    pub formats: Vec<String>,

    /// Bundle the written files into a zip archive
    #[arg(long)]
    pub zip: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn sentences(&self) -> &[String] {
        &self.texts
    }

    fn input_file(&self) -> Option<&str> {
        self.input.as_deref()
    }

    fn extraction_settings(&self) -> ExtractionSettings {
        ExtractionSettings {
            strategy: self.strategy,
            default_year: self.default_year,
            extra_locations: self.extra_locations.clone(),
            extra_stop_words: self.extra_stop_words.clone(),
            extra_titles: self.extra_titles.clone(),
            extra_triggers: Vec::new(),
        }
    }

    fn ner_settings(&self) -> Option<NerSettings> {
        self.ner_endpoint.as_ref().map(|endpoint| NerSettings {
            endpoint: endpoint.clone(),
            api_token: std::env::var(&self.ner_token_env).ok(),
            timeout_seconds: self.ner_timeout,
        })
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn compress_output(&self) -> bool {
        self.zip
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("default_year", self.default_year, 1900, 2100)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        validation::validate_positive_number("ner_timeout", self.ner_timeout, 1)?;

        if let Some(input) = &self.input {
            validation::validate_path("input", input)?;
            validation::validate_file_extension(
                "input",
                input,
                &validation::SUPPORTED_INPUT_EXTENSIONS,
            )?;
        }

        if let Some(endpoint) = &self.ner_endpoint {
            validation::validate_url("ner_endpoint", endpoint)?;
        }
        if self.strategy.needs_ner() {
            validation::validate_required_field("ner_endpoint", &self.ner_endpoint)?;
        }

        if self.zip && self.formats.is_empty() {
            return Err(crate::utils::error::TripError::ConfigValidationError {
                field: "zip".to_string(),
                message: "--zip needs at least one entry in --formats".to_string(),
            });
        }

        Ok(())
    }
}
