use crate::error::EnvVarError;
use crate::source::{ReadEnv, SystemEnv};
use crate::transformers::Transformer;
use std::{env::VarError, fmt};
use tracing::{debug, trace};

/// A variable name bound to a transformer and an optional default
///
/// Built through [`env`](crate::env), consumed by [`required`](Resolver::required)
/// or [`optional`](Resolver::optional).
pub struct Resolver<T> {
    var_name: String,
    transformer: Transformer<T>,
    default: Option<T>,
}

impl<T> Resolver<T> {
    pub fn new(var_name: impl Into<String>, transformer: Transformer<T>) -> Self {
        Self {
            var_name: var_name.into(),
            transformer,
            default: None,
        }
    }

    pub fn var_name(&self) -> &str {
        &self.var_name
    }

    /// Value to return when the variable is not set
    ///
    /// The default is returned as is; it never goes through the transformer.
    pub fn default(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// Resolves from the process environment, failing when nothing is available
    pub fn required(self) -> Result<T, EnvVarError> {
        self.required_from(&SystemEnv)
    }

    /// Resolves from the process environment, `None` when nothing is available
    pub fn optional(self) -> Result<Option<T>, EnvVarError> {
        self.optional_from(&SystemEnv)
    }

    pub fn required_from<E: ReadEnv + ?Sized>(self, source: &E) -> Result<T, EnvVarError> {
        let var_name = self.var_name.clone();
        self.resolve(source)?
            .ok_or(EnvVarError::NotDefined { var_name })
    }

    pub fn optional_from<E: ReadEnv + ?Sized>(self, source: &E) -> Result<Option<T>, EnvVarError> {
        self.resolve(source)
    }

    fn resolve<E: ReadEnv + ?Sized>(self, source: &E) -> Result<Option<T>, EnvVarError> {
        let Self {
            var_name,
            transformer,
            default,
        } = self;

        trace!(var = %var_name, "reading environment variable");
        let raw = match source.var(&var_name) {
            Ok(raw) => raw,
            Err(VarError::NotPresent) => {
                if default.is_some() {
                    debug!(var = %var_name, "environment variable not set, using default");
                } else {
                    debug!(var = %var_name, "environment variable not set");
                }
                return Ok(default);
            }
            Err(VarError::NotUnicode(raw)) => {
                debug!(var = %var_name, "environment variable is not valid unicode");
                return Err(EnvVarError::Validation {
                    var_name,
                    value: raw.to_string_lossy().into_owned(),
                    message: Some("value is not valid unicode".to_string()),
                });
            }
        };

        match transformer(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                debug!(var = %var_name, error = %err, "environment variable failed validation");
                Err(EnvVarError::validation(&var_name, raw, err))
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("var_name", &self.var_name)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}
