//! Error types for fluentql

use thiserror::Error;

/// Result type alias for fluentql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum SqlError {
    /// A statement was rendered before `table()` was called
    #[error("Missing table: call `table()` before rendering a statement")]
    MissingTable,

    /// Comparison operator outside the whitelist
    #[error("Invalid comparison operator: '{0}'")]
    InvalidOperator(String),

    /// Range-style argument with the wrong number of elements
    #[error("Invalid argument arity: expected {expected} values, got {got}")]
    InvalidArity { expected: usize, got: usize },

    /// Template with an unterminated quoted section
    #[error("Invalid template: unterminated quote in {0:?}")]
    InvalidTemplate(String),

    /// UPDATE without any column to set
    #[error("UPDATE requires at least one column to set")]
    EmptyAssignments,

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[cfg(feature = "postgres")]
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SqlError {
    /// Create an invalid operator error for the offending token
    pub fn invalid_operator(token: impl Into<String>) -> Self {
        Self::InvalidOperator(token.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error was raised while validating builder input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidOperator(_)
                | Self::InvalidArity { .. }
                | Self::InvalidTemplate(_)
                | Self::EmptyAssignments
        )
    }

    /// Check if this is a missing table error
    pub fn is_missing_table(&self) -> bool {
        matches!(self, Self::MissingTable)
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<serde_json::Error> for SqlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SqlError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
