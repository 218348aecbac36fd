use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("ReportError: {0}")]
    Report(#[from] ReportError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("SOAP fault from {endpoint}: {reason}")]
    SoapFault {
        endpoint: String,
        code: String,
        reason: String,
    },
    #[error("Transport error calling {endpoint}: {message}")]
    Transport { endpoint: String, message: String },
    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },
    #[error("Connection to {endpoint} is {state}")]
    ChannelUnavailable { endpoint: String, state: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String, hint: String },
    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Report response has no retrieval handle or inline content")]
    MissingRetrievalHandle,
    #[error("Invalid retrieval URI '{uri}': {reason}")]
    InvalidRetrievalUri { uri: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "CRITICAL",
            ErrorSeverity::High => "ERROR",
            ErrorSeverity::Medium => "WARNING",
            ErrorSeverity::Low => "NOTICE",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::SoapFault { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                ApiError::MalformedResponse { .. } => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Critical,
            AppError::Report(_) => ErrorSeverity::Medium,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Api(ApiError::SoapFault { reason, .. }) => {
                format!("The service rejected the request: {}", reason)
            }
            AppError::Config(ConfigError::FileNotFound { path, .. }) => {
                format!("configuration file not found: {}", path)
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Config(ConfigError::FileNotFound { hint, .. }) => Some(hint.clone()),
            AppError::Config(ConfigError::InvalidValue { reason, .. }) => Some(reason.clone()),
            AppError::Api(ApiError::Timeout { .. } | ApiError::Transport { .. }) => {
                Some("Check your network connection and the data service URL".to_string())
            }
            AppError::Storage(StorageError::FileIo { .. }) => {
                Some("Check that the output directory exists and is writable".to_string())
            }
            _ => None,
        }
    }
}
