use thiserror::Error;

#[derive(Error, Debug)]
pub enum PivotError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cannot read source directory {path}: {source}")]
    DirectoryError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading JSON file {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Malformed record #{index}: {reason}")]
    MalformedRecordError { index: usize, reason: String },

    #[error("Error writing CSV file {path}: {message}")]
    WriteError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Input,
    Data,
    Output,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PivotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PivotError::ParseError { .. } | PivotError::SerializationError(_) => {
                ErrorCategory::Input
            }
            PivotError::MalformedRecordError { .. } => ErrorCategory::Data,
            PivotError::WriteError { .. } | PivotError::CsvError(_) => ErrorCategory::Output,
            PivotError::ConfigError { .. }
            | PivotError::InvalidConfigValueError { .. }
            | PivotError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PivotError::DirectoryError { .. } | PivotError::IoError(_) => ErrorCategory::System,
        }
    }

    /// 單一檔案的錯誤不影響批次，只有目錄與設定錯誤是致命的
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PivotError::ParseError { .. }
            | PivotError::SerializationError(_)
            | PivotError::MalformedRecordError { .. } => ErrorSeverity::Medium,
            PivotError::WriteError { .. } | PivotError::CsvError(_) | PivotError::IoError(_) => {
                ErrorSeverity::High
            }
            PivotError::DirectoryError { .. }
            | PivotError::ConfigError { .. }
            | PivotError::InvalidConfigValueError { .. }
            | PivotError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check that the file is a valid JSON export with a `records` array",
            ErrorCategory::Data => {
                "Check that every record has Product2.Article_SAP_Code__c and CurrencyIsoCode"
            }
            ErrorCategory::Output => "Check that the output directory is writable and has free space",
            ErrorCategory::Configuration => "Review the command line flags or the TOML configuration file",
            ErrorCategory::System => "Make sure the source directory exists and is readable",
        }
    }

    /// 致命錯誤的結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PivotError::DirectoryError { path, .. } => {
                format!("Source directory '{}' could not be read", path)
            }
            PivotError::ParseError { path, .. } => format!("'{}' is not a valid JSON export", path),
            PivotError::MalformedRecordError { index, .. } => {
                format!("Record #{} is missing required fields", index)
            }
            PivotError::WriteError { path, .. } => format!("Could not write '{}'", path),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PivotError>;
