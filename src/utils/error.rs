use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error("Annotator failed: {message}")]
    AnnotatorError { message: String },

    #[error("Date interpreter failed on '{span}': {message}")]
    DateInterpreterError { span: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Collaborator,
    Configuration,
    Io,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ExpenseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExpenseError::AnnotatorError { .. } | ExpenseError::DateInterpreterError { .. } => {
                ErrorCategory::Collaborator
            }
            ExpenseError::TomlError(_)
            | ExpenseError::ConfigValidationError { .. }
            | ExpenseError::InvalidConfigValueError { .. }
            | ExpenseError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ExpenseError::IoError(_) => ErrorCategory::Io,
            ExpenseError::SerializationError(_) | ExpenseError::CsvError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::Collaborator => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ExpenseError::AnnotatorError { .. } => {
                "Check that the annotator backend is available, or enter the expense manually"
            }
            ExpenseError::DateInterpreterError { .. } => {
                "Check the date interpreter backend, or enter the date manually"
            }
            ExpenseError::IoError(_) => "Check file paths and permissions",
            ExpenseError::SerializationError(_) | ExpenseError::CsvError(_) => {
                "Check that the output stream is writable"
            }
            ExpenseError::TomlError(_) => "Make sure the config file is valid TOML",
            ExpenseError::ConfigValidationError { .. }
            | ExpenseError::InvalidConfigValueError { .. } => {
                "Fix the reported field in the config file"
            }
            ExpenseError::MissingConfigError { .. } => "Add the missing field to the config file",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Collaborator => format!("Could not understand the input: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("File problem: {}", self),
            ErrorCategory::Output => format!("Could not write the result: {}", self),
        }
    }

    /// CLI 退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
