use colored::Colorize;
use std::fmt;

/// Errors returned when resolving an environment variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvVarError {
    /// The variable is not set and no default was configured
    NotDefined { var_name: String },
    /// The variable is set but its value was rejected by the transformer
    Validation {
        var_name: String,
        value: String,
        message: Option<String>,
    },
}

impl EnvVarError {
    /// Name of the variable this error is about
    pub fn var_name(&self) -> &str {
        match self {
            EnvVarError::NotDefined { var_name } | EnvVarError::Validation { var_name, .. } => {
                var_name
            }
        }
    }

    pub fn is_not_defined(&self) -> bool {
        matches!(self, EnvVarError::NotDefined { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, EnvVarError::Validation { .. })
    }

    pub(crate) fn validation(var_name: &str, value: String, source: ValidationError) -> Self {
        EnvVarError::Validation {
            var_name: var_name.to_string(),
            value,
            message: source.message,
        }
    }
}

impl fmt::Display for EnvVarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvVarError::NotDefined { var_name } => {
                write!(
                    f,
                    "{}: Is missing from environment and has no default",
                    var_name.magenta().bold()
                )
            }
            EnvVarError::Validation {
                var_name,
                value,
                message,
            } => {
                write!(
                    f,
                    "{}: Invalid value {}",
                    var_name.magenta().bold(),
                    format!("'{}'", value).red(),
                )?;
                if let Some(message) = message {
                    write!(f, ": {}", message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for EnvVarError {}

/// Formats several resolution errors as one report
pub fn format_env_errors(errors: &[EnvVarError]) -> String {
    let error_summary = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Resolving environment failed with {} error(s):\n{}",
        errors.len().to_string().yellow().bold(),
        error_summary
    )
}

/// Failure signalled by a transformer for input outside its domain
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .message.as_deref().unwrap_or("invalid value"))]
pub struct ValidationError {
    pub message: Option<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// A failure without any explanation attached
    pub fn bare() -> Self {
        Self { message: None }
    }
}

/// Malformed transformer configuration, raised while building a resolver
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("min ({min}) should be less than or equal to max ({max})")]
    MinGreaterThanMax { min: String, max: String },
    #[error("bound {0} cannot be compared with other values")]
    IncomparableBound(String),
    #[error("base can only be set for integer values, not {kind}")]
    BaseNotSupported { kind: &'static str },
    #[error("base must be 0 or between 2 and 36, got {0}")]
    InvalidBase(u32),
    #[error("list delimiter must not be empty")]
    EmptyDelimiter,
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("enum mapping must contain at least one member")]
    EmptyEnum,
    #[error("enum mapping contains '{0}' more than once")]
    DuplicateEnumKey(String),
}

impl From<regex::Error> for ConfigurationError {
    fn from(err: regex::Error) -> Self {
        ConfigurationError::InvalidPattern(err.to_string())
    }
}
