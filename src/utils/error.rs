use thiserror::Error;

#[derive(Error, Debug)]
pub enum OslcError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} {url} returned HTTP {status}")]
    HttpStatus {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Document error: {message}")]
    Document { message: String },

    #[error("Protocol error: {message}")]
    Protocol { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

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

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Provider,
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

impl OslcError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OslcError::Http(_) | OslcError::HttpStatus { .. } => ErrorCategory::Transport,
            OslcError::Document { .. } | OslcError::Protocol { .. } => ErrorCategory::Provider,
            OslcError::ConfigError { .. }
            | OslcError::ConfigValidationError { .. }
            | OslcError::InvalidConfigValueError { .. }
            | OslcError::MissingConfigError { .. } => ErrorCategory::Configuration,
            OslcError::Io(_) | OslcError::Serialization(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            OslcError::HttpStatus { status, .. } if *status == 404 => ErrorSeverity::Low,
            OslcError::Http(_) | OslcError::HttpStatus { .. } => ErrorSeverity::Medium,
            OslcError::Document { .. } | OslcError::Protocol { .. } => ErrorSeverity::High,
            OslcError::ConfigError { .. }
            | OslcError::ConfigValidationError { .. }
            | OslcError::InvalidConfigValueError { .. }
            | OslcError::MissingConfigError { .. } => ErrorSeverity::High,
            OslcError::Io(_) | OslcError::Serialization(_) => ErrorSeverity::Critical,
        }
    }

    /// HTTP 狀態碼（僅限傳輸錯誤）
    pub fn status(&self) -> Option<u16> {
        match self {
            OslcError::HttpStatus { status, .. } => Some(*status),
            OslcError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            OslcError::HttpStatus { status: 401, .. } | OslcError::HttpStatus { status: 403, .. } => {
                "Check the [auth] credentials in the configuration file"
            }
            OslcError::HttpStatus { status: 404, .. } => {
                "Verify the resource or service provider URL still exists"
            }
            OslcError::Http(_) | OslcError::HttpStatus { .. } => {
                "Check network connectivity and that the provider is reachable"
            }
            OslcError::Document { .. } => {
                "The provider did not return RDF/XML; check the Accept media type"
            }
            OslcError::Protocol { .. } => {
                "The provider answered outside the OSLC protocol; check the provider URL and domain"
            }
            OslcError::ConfigError { .. }
            | OslcError::ConfigValidationError { .. }
            | OslcError::InvalidConfigValueError { .. }
            | OslcError::MissingConfigError { .. } => "Fix the configuration file and try again",
            OslcError::Io(_) => "Check file paths and permissions",
            OslcError::Serialization(_) => "Check that the input is valid JSON",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            OslcError::HttpStatus { method, url, status, .. } => {
                format!("The provider rejected {} {} (HTTP {})", method, url, status)
            }
            OslcError::Http(e) => format!("Could not reach the provider: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OslcError>;
