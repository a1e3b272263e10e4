use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A caller-supplied parameter failed validation before any side effect.
    #[error("invalid {parameter}: {reason}")]
    Validation {
        parameter: &'static str,
        reason: String,
    },

    /// A referenced property does not exist in the store.
    #[error("property not found: {id}")]
    NotFound { id: String },

    /// Malformed geographic data prevented a distance or centroid computation.
    #[error("computation failed: {0}")]
    Computation(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    /// The transactional edge-set replacement failed; nothing was persisted.
    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a caller-parameter validation error.
    pub fn validation(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            parameter,
            reason: reason.into(),
        }
    }

    /// Shorthand for a missing-property error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_formats_parameter() {
        let err = Error::validation("min_similarity", "must be in (0, 1]");
        assert_eq!(
            err.to_string(),
            "invalid min_similarity: must be in (0, 1]"
        );
    }

    #[test]
    fn domain_error_converts_transparently() {
        let err: Error = DomainError::WeightSumInvalid { sum: 0.9 }.into();
        assert_eq!(err.to_string(), "similarity weights must sum to 1.0, got 0.9");
    }

    #[test]
    fn not_found_includes_id() {
        let err = Error::not_found("prop-404");
        assert_eq!(err.to_string(), "property not found: prop-404");
    }
}
