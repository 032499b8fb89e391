use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillError {
    #[error("Rate API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Rate API returned error {code}: {info}")]
    RateApiError { code: i64, info: String },

    #[error("Malformed quote in rate API response: {message}")]
    MalformedQuoteError { message: String },

    #[error("Unsupported intent: {name}")]
    UnsupportedIntentError { name: String },

    #[error("Unsupported request type")]
    UnsupportedRequestError,

    #[error("Invalid application id: {application_id}")]
    InvalidApplicationIdError { application_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for the CLI.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl SkillError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SkillError::ApiError(_)
            | SkillError::RateApiError { .. }
            | SkillError::MalformedQuoteError { .. } => ErrorSeverity::Medium,
            SkillError::UnsupportedIntentError { .. }
            | SkillError::UnsupportedRequestError
            | SkillError::InvalidApplicationIdError { .. }
            | SkillError::SerializationError(_) => ErrorSeverity::High,
            SkillError::IoError(_)
            | SkillError::TomlError(_)
            | SkillError::ConfigError { .. }
            | SkillError::MissingConfigError { .. }
            | SkillError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SkillError::ApiError(_) => "Could not reach the exchange rate service".to_string(),
            SkillError::RateApiError { info, .. } => {
                format!("The exchange rate service rejected the request: {}", info)
            }
            SkillError::MalformedQuoteError { .. } => {
                "The exchange rate service returned an unreadable quote".to_string()
            }
            SkillError::MissingConfigError { field } => {
                format!("Set the `{}` environment variable before starting", field)
            }
            SkillError::UnsupportedIntentError { name } => {
                format!("The skill does not handle the intent `{}`", name)
            }
            SkillError::SerializationError(_) => {
                "The event is not a valid voice platform request".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillError>;
