//! Error types for animation builders

/// Errors raised by builders and their configuration objects.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BuilderError {
    /// A builder type did not provide an implementation of a required operation.
    /// This is a programming defect in the builder type, never a runtime condition to retry.
    #[error("Unimplemented method in child class: {method}")]
    UnimplementedMethod { method: &'static str },

    /// A timing value rejected at a validating boundary
    #[error("Invalid argument {name}={value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Remote configuration could not be parsed
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl BuilderError {
    pub(crate) fn unimplemented(method: &'static str) -> Self {
        Self::UnimplementedMethod { method }
    }

    /// Returns true for contract violations of a builder type.
    pub fn is_unimplemented(&self) -> bool {
        matches!(self, Self::UnimplementedMethod { .. })
    }
}

impl From<serde_json::Error> for BuilderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            reason: err.to_string(),
        }
    }
}

/// Rejects negative and non-finite milliseconds.
pub(crate) fn check_millis(name: &'static str, value: f64) -> Result<f64, BuilderError> {
    if !value.is_finite() {
        return Err(BuilderError::InvalidArgument {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(BuilderError::InvalidArgument {
            name,
            value,
            reason: "must be non-negative",
        });
    }
    Ok(value)
}
