//! Error types for mm-core

use thiserror::Error;

/// Core error type for menu migrations
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: IO error with file path context
    #[error("[E003] IO error at {path}: {source}")]
    IoWithPath {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// E004: YAML parse error
    #[error("[E004] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// V001: String value carries leading or trailing whitespace
    #[error("[V001] Invalid value {value:?}: leading or trailing whitespace is not allowed")]
    PaddedValue { value: String },

    /// V002: Option key not understood by the operation
    #[error("[V002] {operation} '{name}': unrecognized option '{key}'")]
    UnknownOption {
        operation: String,
        name: String,
        key: String,
    },

    /// V003: Required option missing
    #[error("[V003] {operation} '{name}': missing required option '{key}'")]
    MissingOption {
        operation: String,
        name: String,
        key: String,
    },

    /// V004: A change operation was given nothing to change
    #[error("[V004] {operation} '{name}': no changes given")]
    NoChanges { operation: String, name: String },

    /// V005: Option value has the wrong type
    #[error("[V005] {operation} '{name}': option '{key}' must be {expected}")]
    InvalidOptionType {
        operation: String,
        name: String,
        key: String,
        expected: &'static str,
    },

    /// V006: Option does not accept null
    #[error("[V006] {operation} '{name}': option '{key}' cannot be null")]
    NullOption {
        operation: String,
        name: String,
        key: String,
    },

    /// N001: Migration filename has an invalid sequence prefix
    #[error("[N001] Invalid migration filename '{filename}': {reason}")]
    InvalidSequencePrefix { filename: String, reason: String },

    /// N002: Migration filename is not lowercase
    #[error("[N002] Migration filename must be lowercase: '{filename}'")]
    NotLowercase { filename: String },

    /// D001: Unknown migration direction
    #[error("[D001] Invalid direction '{value}': expected 'up' or 'down'")]
    InvalidDirection { value: String },
}

impl CoreError {
    /// True for errors raised while validating operation arguments.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            CoreError::PaddedValue { .. }
                | CoreError::UnknownOption { .. }
                | CoreError::MissingOption { .. }
                | CoreError::NoChanges { .. }
                | CoreError::InvalidOptionType { .. }
                | CoreError::NullOption { .. }
        )
    }

    /// True for errors raised by the migration filename convention.
    pub fn is_naming_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidSequencePrefix { .. } | CoreError::NotLowercase { .. }
        )
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
