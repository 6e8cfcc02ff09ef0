use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("API reported status '{status}'")]
    UnexpectedApiStatus { status: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Storage error on key '{key}': {message}")]
    StorageError { key: String, message: String },

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

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    RemoteService,
    Storage,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FinderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FinderError::ApiError(_) => ErrorCategory::Network,
            FinderError::HttpStatusError { .. } | FinderError::UnexpectedApiStatus { .. } => {
                ErrorCategory::RemoteService
            }
            FinderError::IoError(_)
            | FinderError::SerializationError(_)
            | FinderError::StorageError { .. } => ErrorCategory::Storage,
            FinderError::ConfigError { .. }
            | FinderError::ConfigValidationError { .. }
            | FinderError::InvalidConfigValueError { .. }
            | FinderError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FinderError::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network | ErrorCategory::RemoteService => ErrorSeverity::Medium,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FinderError::ApiError(_) => "Check the network connection and retry".to_string(),
            FinderError::HttpStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Verify api_key and api_host in the configuration".to_string()
            }
            FinderError::HttpStatusError { status, .. } if *status == 429 => {
                "API quota exhausted, wait before issuing more requests".to_string()
            }
            FinderError::HttpStatusError { .. } | FinderError::UnexpectedApiStatus { .. } => {
                "The remote service rejected the request, retry later".to_string()
            }
            FinderError::IoError(_) | FinderError::StorageError { .. } => {
                "Check that the data directory exists and is writable".to_string()
            }
            FinderError::SerializationError(_) => {
                "The favorites file is unreadable, repair or remove it before saving".to_string()
            }
            FinderError::MissingConfigError { field } => {
                format!("Provide '{}' in the config file or environment", field)
            }
            FinderError::ConfigError { .. }
            | FinderError::ConfigValidationError { .. }
            | FinderError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again".to_string()
            }
            FinderError::ValidationError { .. } => "Check the command arguments".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("無法連線到評論服務: {}", self),
            ErrorCategory::RemoteService => format!("評論服務回傳錯誤: {}", self),
            ErrorCategory::Storage => format!("無法存取本機收藏資料: {}", self),
            ErrorCategory::Configuration => format!("設定錯誤: {}", self),
            ErrorCategory::Input => format!("輸入錯誤: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
