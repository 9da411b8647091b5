use thiserror::Error;

use crate::schema::PayloadKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GedcomError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Schema error: {0}")]
    Schema(String),
    #[error("Parse error at line {line}: {message}")]
    Parse { message: String, line: usize },
    #[error("Unresolved structure type: tag {tag} is not allowed under {parent}")]
    UnresolvedType { tag: String, parent: String },
    #[error("Cannot interpret {value} as type {kind}")]
    Cast { value: String, kind: PayloadKind },
    #[error("Invalid month in date: {0}")]
    InvalidMonth(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, GedcomError>;

impl GedcomError {
    pub(crate) fn parse(message: impl Into<String>, line: usize) -> Self {
        Self::Parse {
            message: message.into(),
            line,
        }
    }
    pub(crate) fn cast(value: &str, kind: PayloadKind) -> Self {
        Self::Cast {
            value: value.to_owned(),
            kind,
        }
    }
}

// Helper conversions
impl From<::config::ConfigError> for GedcomError {
    fn from(e: ::config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<serde_json::Error> for GedcomError {
    fn from(e: serde_json::Error) -> Self { Self::Schema(e.to_string()) }
}
impl From<std::io::Error> for GedcomError {
    fn from(e: std::io::Error) -> Self { Self::Schema(e.to_string()) }
}
