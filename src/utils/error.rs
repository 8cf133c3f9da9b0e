use thiserror::Error;

#[derive(Error, Debug)]
pub enum HomeScoreError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response format from {endpoint}: {message}")]
    Format { endpoint: String, message: String },

    #[error("Could not parse {field} value '{value}' as an integer")]
    Parse { field: String, value: String },

    #[error("No {field} data available for {subject}")]
    DataUnavailable { field: String, subject: String },

    #[error("Unknown region: {name}")]
    UnknownRegion { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    Config { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Format,
    Data,
    Lookup,
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

impl HomeScoreError {
    pub fn format(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(_) => ErrorCategory::Network,
            Self::Format { .. } | Self::Parse { .. } => ErrorCategory::Format,
            Self::DataUnavailable { .. } => ErrorCategory::Data,
            Self::UnknownRegion { .. } => ErrorCategory::Lookup,
            Self::Config { .. } | Self::InvalidConfigValue { .. } => ErrorCategory::Configuration,
            Self::Io(_) | Self::Serialization(_) | Self::Csv(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Format | ErrorCategory::Lookup | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Message shown to the person using the tool.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Network(e) if e.is_timeout() => {
                "The statistics service did not answer in time.".to_string()
            }
            Self::Network(e) => match e.status() {
                Some(status) => format!("The statistics service returned HTTP {}.", status),
                None => "Could not reach the statistics service.".to_string(),
            },
            Self::Format { .. } | Self::Parse { .. } => {
                "The statistics service returned data in an unexpected shape.".to_string()
            }
            Self::DataUnavailable { subject, .. } => format!(
                "Unable to retrieve data for {}. It may not be available in the dataset.",
                subject
            ),
            Self::UnknownRegion { name } => format!("'{}' is not a supported state.", name),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check your connection or raise service.timeout_seconds, then try again"
            }
            ErrorCategory::Format => "Check that the configured datasets and variables exist",
            ErrorCategory::Data => "Pick a different place in the same state",
            ErrorCategory::Lookup => "Run `home-score regions` to list the supported states",
            ErrorCategory::Configuration => "Fix the configuration file and run again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, HomeScoreError>;
