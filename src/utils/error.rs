use thiserror::Error;

#[derive(Error, Debug)]
pub enum PointLogError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Column '{column}' not found in point log (available: {available})")]
    MissingColumnError { column: String, available: String },

    #[error("Cannot read point log '{path}': {source}")]
    InputReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PointLogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PointLogError::ConfigValidationError { .. }
            | PointLogError::InvalidConfigValueError { .. }
            | PointLogError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PointLogError::CsvError(_)
            | PointLogError::MissingColumnError { .. }
            | PointLogError::InputReadError { .. } => ErrorCategory::Input,
            PointLogError::ZipError(_)
            | PointLogError::IoError(_)
            | PointLogError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PointLogError::ZipError(_) | PointLogError::SerializationError(_) => {
                ErrorSeverity::Medium
            }
            PointLogError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PointLogError::ConfigValidationError { field, .. }
            | PointLogError::InvalidConfigValueError { field, .. } => {
                format!("檢查設定欄位 '{}' 的值", field)
            }
            PointLogError::MissingConfigError { field } => {
                format!("請提供必要的設定 '{}'", field)
            }
            PointLogError::MissingColumnError { .. } => {
                "Use --score-column / --info-column with a header name or a 0-based index".to_string()
            }
            PointLogError::CsvError(_) => {
                "Make sure the input is a CSV/TSV export and --delimiter matches it".to_string()
            }
            PointLogError::InputReadError { path, .. } => {
                format!("確認比賽記錄 '{}' 存在且可讀取", path)
            }
            PointLogError::IoError(_) => "Check that the output path exists and is writable".to_string(),
            PointLogError::ZipError(_) | PointLogError::SerializationError(_) => {
                "Retry without --zip or with fewer output formats".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("設定錯誤: {}", self),
            ErrorCategory::Input => format!("無法讀取比賽記錄: {}", self),
            ErrorCategory::Output => format!("無法寫出結果: {}", self),
        }
    }

    /// Exit code used by the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, PointLogError>;
