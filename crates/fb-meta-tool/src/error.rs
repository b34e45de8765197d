//! Error types for the metadata tool.

use std::path::PathBuf;
use thiserror::Error;

/// CLI exit code for configuration errors.
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// CLI exit code for metadata source or database errors.
pub const EXIT_DATABASE_ERROR: u8 = 2;
/// CLI exit code for a script statement that failed and was rolled back.
pub const EXIT_STATEMENT_ERROR: u8 = 3;
/// CLI exit code for file system errors.
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for export and update operations.
#[derive(Error, Debug)]
pub enum MetaError {
    /// Configuration error (invalid YAML, missing fields, bad connection string)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Metadata source failed while reading the catalog
    #[error("Metadata source error: {0}")]
    Source(String),

    /// Connection, transaction or executor failure outside a script statement
    #[error("Database error: {0}")]
    Database(String),

    /// A script statement failed; the transaction was rolled back
    #[error("Statement {index} failed: {message}\n  Statement: {statement}")]
    StatementFailed {
        /// 0-based position of the statement in the split script.
        index: usize,
        /// Text of the failing statement.
        statement: String,
        /// Error reported by the executor.
        message: String,
        /// Set when the rollback that followed the failure also failed.
        rollback_error: Option<String>,
    },

    /// No script file was found in the scripts directory
    #[error("No .sql file found in {}", .0.display())]
    ScriptNotFound(PathBuf),

    /// Firebird client error
    #[cfg(feature = "firebird")]
    #[error("Firebird error: {0}")]
    Firebird(#[from] rsfbclient::FbError),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MetaError {
    /// Create a Source error
    pub fn source_failure(message: impl Into<String>) -> Self {
        MetaError::Source(message.into())
    }

    /// Create a Database error
    pub fn database(message: impl Into<String>) -> Self {
        MetaError::Database(message.into())
    }

    /// Exit code the CLI reports for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            MetaError::Config(_) | MetaError::Yaml(_) => EXIT_CONFIG_ERROR,
            MetaError::Source(_) | MetaError::Database(_) => EXIT_DATABASE_ERROR,
            #[cfg(feature = "firebird")]
            MetaError::Firebird(_) => EXIT_DATABASE_ERROR,
            MetaError::StatementFailed { .. } => EXIT_STATEMENT_ERROR,
            MetaError::ScriptNotFound(_) | MetaError::Io(_) | MetaError::Json(_) => EXIT_IO_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        if let MetaError::StatementFailed {
            rollback_error: Some(rollback),
            ..
        } = self
        {
            output.push_str(&format!("\nRollback also failed: {}", rollback));
        }

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for metadata tool operations.
pub type Result<T> = std::result::Result<T, MetaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(MetaError::Config("x".into()).exit_code(), EXIT_CONFIG_ERROR);
        assert_eq!(MetaError::source_failure("down").exit_code(), EXIT_DATABASE_ERROR);
        assert_eq!(
            MetaError::ScriptNotFound(PathBuf::from("/tmp")).exit_code(),
            EXIT_IO_ERROR
        );
        let failed = MetaError::StatementFailed {
            index: 0,
            statement: "CREATE TABLE T (A INTEGER)".into(),
            message: "table exists".into(),
            rollback_error: None,
        };
        assert_eq!(failed.exit_code(), EXIT_STATEMENT_ERROR);
    }

    #[test]
    fn test_format_detailed_reports_rollback_failure() {
        let err = MetaError::StatementFailed {
            index: 2,
            statement: "DROP TABLE X".into(),
            message: "unknown table".into(),
            rollback_error: Some("connection lost".into()),
        };
        let text = err.format_detailed();
        assert!(text.starts_with("Error: Statement 2 failed: unknown table"));
        assert!(text.contains("Rollback also failed: connection lost"));
    }

    #[test]
    fn test_format_detailed_walks_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = MetaError::from(io);
        assert!(err.format_detailed().contains("IO error: missing"));
    }
}
