use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Failed to fetch property data: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Source {url} answered with HTTP status {status}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Source {origin} is not valid UTF-8: {message}")]
    DecodeError { origin: String, message: String },

    #[error("Malformed record on line {line} ({content:?}): {reason}")]
    ParseError {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration in '{field}': {message}")]
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
    Data,
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

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::FetchError(_)
            | EtlError::HttpStatusError { .. }
            | EtlError::DecodeError { .. } => ErrorCategory::Network,
            EtlError::ParseError { .. }
            | EtlError::CsvError(_)
            | EtlError::SerializationError(_)
            | EtlError::ValidationError { .. } => ErrorCategory::Data,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EtlError::IoError(_) | EtlError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路問題通常重試即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::FetchError(_) => "Check network connectivity and the source URL, then retry",
            EtlError::HttpStatusError { .. } => {
                "Verify the source URL points at DerivedCoreProperties.txt"
            }
            EtlError::DecodeError { .. } => "Make sure the source document is UTF-8 text",
            EtlError::ParseError { .. } => {
                "The property file contains a malformed code point field; inspect the reported line"
            }
            EtlError::IoError(_) => "Check file permissions and available disk space",
            EtlError::CsvError(_) | EtlError::SerializationError(_) | EtlError::ZipError(_) => {
                "Retry with a different output format"
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
            EtlError::ValidationError { .. } => "Check the generated tables and the input data",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::FetchError(_) | EtlError::HttpStatusError { .. } => {
                format!("Could not download the Unicode data: {}", self)
            }
            EtlError::ParseError { line, reason, .. } => {
                format!("Unicode data is malformed at line {}: {}", line, reason)
            }
            _ => self.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_is_high_severity_data_error() {
        let err = EtlError::ParseError {
            line: 12,
            content: "00ZZ ; XID_Start".to_string(),
            reason: "invalid hex digit".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("line 12"));
    }

    #[test]
    fn test_http_status_error_is_retryable() {
        let err = EtlError::HttpStatusError {
            url: "https://example.com/ucd.txt".to_string(),
            status: 503,
        };

        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = EtlError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));

        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }
}
