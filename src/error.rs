//! Error types for sqlport

use thiserror::Error;

/// Errors that can occur while exporting, diffing or importing a database.
#[derive(Error, Debug)]
pub enum SqlPortError {
    #[error("precondition not met: {message}")]
    Precondition { message: String },

    #[error("invalid document: {message}")]
    InvalidDocument { message: String },

    #[error("no type mapping for column type: {data_type}")]
    UnknownType { data_type: String },

    #[error("{operation} is not supported by the {dialect} dialect")]
    Unsupported { operation: String, dialect: String },

    #[error("statement failed: {sql}")]
    Statement {
        sql: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("XML writer error: {message}")]
    Xml { message: String },
}

impl SqlPortError {
    /// Create a Precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        SqlPortError::Precondition {
            message: message.into(),
        }
    }

    /// Create an InvalidDocument error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        SqlPortError::InvalidDocument {
            message: message.into(),
        }
    }

    /// Create an Unsupported error for a DDL operation the dialect cannot render
    pub fn unsupported(operation: impl Into<String>, dialect: impl Into<String>) -> Self {
        SqlPortError::Unsupported {
            operation: operation.into(),
            dialect: dialect.into(),
        }
    }
}

impl From<quick_xml::Error> for SqlPortError {
    fn from(err: quick_xml::Error) -> Self {
        SqlPortError::Xml {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for SqlPortError {
    fn from(err: std::io::Error) -> Self {
        SqlPortError::Xml {
            message: err.to_string(),
        }
    }
}

/// Result type alias for sqlport operations.
pub type Result<T> = std::result::Result<T, SqlPortError>;
