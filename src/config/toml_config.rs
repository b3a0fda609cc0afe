use crate::domain::model::{ExtractionSettings, NerSettings, Strategy, DEFAULT_YEAR};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, TripError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub lexicon: LexiconConfig,
    pub ner: Option<NerConfig>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub sentences: Vec<String>,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub strategy: Option<Strategy>,
    pub default_year: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(default)]
    pub extra_locations: Vec<String>,
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
    #[serde(default)]
    pub extra_titles: Vec<String>,
    #[serde(default)]
    pub extra_triggers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NerConfig {
    pub endpoint: String,
    pub api_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    #[serde(default)]
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| TripError::ConfigError {
                message: format!("Cannot read '{}': {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TripError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HF_TOKEN})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn strategy(&self) -> Strategy {
        self.extraction.strategy.unwrap_or_default()
    }

    pub fn default_year(&self) -> i32 {
        self.extraction.default_year.unwrap_or(DEFAULT_YEAR)
    }

    pub fn compression_enabled(&self) -> bool {
        self.output
            .compression
            .as_ref()
            .map(|c| c.enabled)
            .unwrap_or(false)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_output_formats("output.output_formats", &self.output.output_formats)?;
        validation::validate_range("extraction.default_year", self.default_year(), 1900, 2100)?;

        if let Some(file) = &self.input.file {
            validation::validate_path("input.file", file)?;
            validation::validate_file_extension(
                "input.file",
                file,
                &validation::SUPPORTED_INPUT_EXTENSIONS,
            )?;
        }

        if let Some(ner) = &self.ner {
            validation::validate_url("ner.endpoint", &ner.endpoint)?;
            if let Some(timeout) = ner.timeout_seconds {
                validation::validate_positive_number("ner.timeout_seconds", timeout, 1)?;
            }
        }
        if self.strategy().needs_ner() {
            validation::validate_required_field("ner", &self.ner)?;
        }

        if let Some(compression) = &self.output.compression {
            if compression.enabled {
                validation::validate_non_empty_string(
                    "output.compression.filename",
                    &compression.filename,
                )?;
                if self.output.output_formats.is_empty() {
                    return Err(TripError::ConfigValidationError {
                        field: "output.compression".to_string(),
                        message: "compression needs at least one output format".to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn sentences(&self) -> &[String] {
        &self.input.sentences
    }

    fn input_file(&self) -> Option<&str> {
        self.input.file.as_deref()
    }

    fn extraction_settings(&self) -> ExtractionSettings {
        ExtractionSettings {
            strategy: self.strategy(),
            default_year: self.default_year(),
            extra_locations: self.lexicon.extra_locations.clone(),
            extra_stop_words: self.lexicon.extra_stop_words.clone(),
            extra_titles: self.lexicon.extra_titles.clone(),
            extra_triggers: self.lexicon.extra_triggers.clone(),
        }
    }

    fn ner_settings(&self) -> Option<NerSettings> {
        self.ner.as_ref().map(|ner| NerSettings {
            endpoint: ner.endpoint.clone(),
            // 未替換的 ${VAR} 視為沒有 token
            api_token: ner
                .api_token
                .clone()
                .filter(|t| !t.is_empty() && !t.starts_with("${")),
            timeout_seconds: ner.timeout_seconds.unwrap_or(30),
        })
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.output_formats
    }

    fn compress_output(&self) -> bool {
        self.compression_enabled()
    }

    fn archive_name(&self) -> &str {
        self.output
            .compression
            .as_ref()
            .map(|c| c.filename.as_str())
            .unwrap_or("trip_output.zip")
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
