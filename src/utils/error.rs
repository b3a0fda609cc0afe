use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("NER service error (status {status}): {message}")]
    NerError { status: u16, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依嚴重程度決定 CLI 退出碼
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,      // 警告，但成功
            ErrorSeverity::Medium => 2,   // 可重試
            ErrorSeverity::High => 1,     // 處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl TripError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TripError::ApiError(_) | TripError::NerError { .. } => ErrorCategory::Network,
            TripError::IoError(_) | TripError::ZipError(_) => ErrorCategory::Storage,
            TripError::ConfigError { .. }
            | TripError::ConfigValidationError { .. }
            | TripError::InvalidConfigValueError { .. }
            | TripError::MissingConfigError { .. }
            | TripError::PatternError(_) => ErrorCategory::Configuration,
            TripError::CsvError(_)
            | TripError::SerializationError(_)
            | TripError::ProcessingError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 遠端模型服務可能只是暫時無法使用
            TripError::ApiError(_) => ErrorSeverity::Medium,
            TripError::NerError { status, .. } if *status >= 500 || *status == 429 => {
                ErrorSeverity::Medium
            }
            TripError::NerError { .. } => ErrorSeverity::High,
            TripError::IoError(_) | TripError::ZipError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TripError::ApiError(_) => {
                "Check network connectivity and that the NER endpoint is reachable"
            }
            TripError::NerError { status, .. } if *status == 401 || *status == 403 => {
                "Check the NER API token (see --ner-token-env)"
            }
            TripError::NerError { .. } => {
                "The NER model may still be loading; retry later or use --strategy rules"
            }
            TripError::IoError(_) | TripError::ZipError(_) => {
                "Check that the output directory exists and is writable"
            }
            TripError::CsvError(_) | TripError::SerializationError(_) => {
                "Inspect the input sentences for unexpected characters"
            }
            TripError::PatternError(_) => {
                "Remove regex-breaking entries from the configured lexicon"
            }
            TripError::ConfigError { .. }
            | TripError::ConfigValidationError { .. }
            | TripError::InvalidConfigValueError { .. }
            | TripError::MissingConfigError { .. } => {
                "Fix the configuration value and run again (see --help)"
            }
            TripError::ProcessingError { .. } => "Run with --verbose to see the failing sentence",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TripError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            TripError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            TripError::NerError { status, .. } => {
                format!("The NER service rejected the request (HTTP {})", status)
            }
            TripError::ApiError(_) => "Could not reach the NER service".to_string(),
            TripError::IoError(e) => format!("File operation failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TripError>;
