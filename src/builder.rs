use crate::error::{ConfigurationError, ValidationError};
use crate::resolver::Resolver;
use crate::transformers::{
    self,
    date::{self, IsoDuration},
    list,
    network::{self, Fqdn, IpInterface, IpNetwork},
    numeric::{self, FloatOptions, IntOptions},
    pattern, varia, Transformer,
};
use chrono::{DateTime, FixedOffset};
use regex::Regex;
use std::{fmt, net::IpAddr, str::FromStr};

/// Starts resolving the variable `var_name`
///
/// # Example
/// ```rust
/// use env_var::{env, IntOptions};
///
/// # temp_env::with_var("WORKERS", Some("8"), || {
/// let workers = env("WORKERS")
///     .as_int_with(IntOptions::new().min(1).max(64))?
///     .default(4)
///     .required()?;
/// assert_eq!(workers, 8);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # }).unwrap();
/// ```
pub fn env(var_name: impl Into<String>) -> Env {
    Env {
        var_name: var_name.into(),
    }
}

/// Selects the transformer for a variable
///
/// Every `as_*` method returns a [`Resolver`]. Methods that take configuration
/// check it immediately and return a [`ConfigurationError`] when it is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Env {
    var_name: String,
}

impl Env {
    pub fn var_name(&self) -> &str {
        &self.var_name
    }

    fn bind<T>(self, transformer: Transformer<T>) -> Resolver<T> {
        Resolver::new(self.var_name, transformer)
    }

    // Numeric

    pub fn as_int(self) -> Resolver<i64> {
        self.bind(numeric::bounded(10, None, None))
    }

    /// Integer with a base and inclusive bounds
    pub fn as_int_with(self, options: IntOptions) -> Result<Resolver<i64>, ConfigurationError> {
        Ok(self.bind(numeric::numeric(options)?))
    }

    /// Integer `>= 0`
    pub fn as_int_positive(self) -> Resolver<i64> {
        self.bind(numeric::bounded(10, Some(0), None))
    }

    /// Integer `<= -1`
    pub fn as_int_negative(self) -> Resolver<i64> {
        self.bind(numeric::bounded(10, None, Some(-1)))
    }

    pub fn as_float(self) -> Resolver<f64> {
        self.bind(numeric::bounded(10, None, None))
    }

    /// Float with inclusive bounds; setting a base is an error
    pub fn as_float_with(self, options: FloatOptions) -> Result<Resolver<f64>, ConfigurationError> {
        Ok(self.bind(numeric::numeric(options)?))
    }

    pub fn as_float_positive(self) -> Resolver<f64> {
        self.bind(numeric::bounded(10, Some(0.0), None))
    }

    pub fn as_float_negative(self) -> Resolver<f64> {
        self.bind(numeric::bounded(10, None, Some(-1.0)))
    }

    pub fn as_port_number(self) -> Resolver<u16> {
        self.bind(numeric::port_number())
    }

    // Scalars

    pub fn as_bool(self) -> Resolver<bool> {
        self.bind(varia::boolean())
    }

    pub fn as_string(self) -> Resolver<String> {
        self.bind(varia::string())
    }

    /// Any type implementing `FromStr`
    pub fn as_parsed<T>(self) -> Resolver<T>
    where
        T: FromStr + 'static,
        T::Err: fmt::Display,
    {
        self.bind(varia::parsed())
    }

    /// One of the members of an explicit `name -> member` mapping
    ///
    /// ```rust
    /// use env_var::{env, InMemoryEnv};
    ///
    /// #[derive(Debug, Clone, PartialEq)]
    /// enum Level { Error, Info }
    ///
    /// let source: InMemoryEnv = [("LOG_LEVEL", "info")].into_iter().collect();
    /// let level = env("LOG_LEVEL")
    ///     .as_enum([("error", Level::Error), ("info", Level::Info)])
    ///     .unwrap()
    ///     .required_from(&source)
    ///     .unwrap();
    /// assert_eq!(level, Level::Info);
    /// ```
    pub fn as_enum<K, T, I>(self, members: I) -> Result<Resolver<T>, ConfigurationError>
    where
        K: Into<String>,
        T: Clone + 'static,
        I: IntoIterator<Item = (K, T)>,
    {
        Ok(self.bind(varia::enumeration(members)?))
    }

    // Patterns

    pub fn as_email(self) -> Resolver<String> {
        self.bind(pattern::email())
    }

    pub fn as_uri(self) -> Resolver<String> {
        self.bind(pattern::uri())
    }

    /// Public `http`, `https` or `ftp` URL, returned as the original string
    pub fn as_url(self) -> Resolver<String> {
        self.bind(pattern::url())
    }

    pub fn as_uuid(self) -> Resolver<String> {
        self.bind(pattern::uuid())
    }

    pub fn as_hostname(self) -> Resolver<String> {
        self.bind(pattern::hostname())
    }

    /// The whole value has to match `pattern`
    pub fn should_match(self, pattern: &str) -> Result<Resolver<String>, ConfigurationError> {
        Ok(self.bind(pattern::should_match(pattern)?))
    }

    pub fn should_match_regex(self, regex: Regex) -> Resolver<String> {
        self.bind(pattern::should_match_regex(regex))
    }

    // Structured

    pub fn as_iso_date(self) -> Resolver<DateTime<FixedOffset>> {
        self.bind(date::iso_datetime())
    }

    pub fn as_date(self) -> Resolver<DateTime<FixedOffset>> {
        self.bind(date::datetime())
    }

    pub fn as_iso_duration(self) -> Resolver<IsoDuration> {
        self.bind(date::iso_duration())
    }

    /// RFC3339 string, returned unchanged
    pub fn as_iso_date_string(self) -> Resolver<String> {
        self.bind(date::iso_date_string())
    }

    pub fn as_ip_address(self) -> Resolver<IpAddr> {
        self.bind(network::ip_address())
    }

    pub fn as_ip_network(self) -> Resolver<IpNetwork> {
        self.bind(network::ip_network())
    }

    pub fn as_ip_interface(self) -> Resolver<IpInterface> {
        self.bind(network::ip_interface())
    }

    pub fn as_url_parse(self) -> Resolver<url::Url> {
        self.bind(network::url_parse())
    }

    pub fn as_fqdn(self) -> Resolver<Fqdn> {
        self.bind(network::fqdn())
    }

    // Lists

    /// Comma separated values converted by `item`
    pub fn as_list<T, E, F>(self, item: F) -> Resolver<Vec<T>>
    where
        T: 'static,
        F: Fn(&str) -> Result<T, E> + 'static,
        E: fmt::Display,
    {
        self.bind(comma_separated(transformers::from_fn(item)))
    }

    pub fn as_list_with<T, E, F>(
        self,
        item: F,
        split_on: &str,
    ) -> Result<Resolver<Vec<T>>, ConfigurationError>
    where
        T: 'static,
        F: Fn(&str) -> Result<T, E> + 'static,
        E: fmt::Display,
    {
        Ok(self.bind(list::list(transformers::from_fn(item), split_on)?))
    }

    pub fn as_int_list(self) -> Resolver<Vec<i64>> {
        self.bind(comma_separated(numeric::bounded(10, None, None)))
    }

    /// Integers with per-item base and bounds
    pub fn as_int_list_with(
        self,
        options: IntOptions,
        split_on: &str,
    ) -> Result<Resolver<Vec<i64>>, ConfigurationError> {
        Ok(self.bind(list::list(numeric::numeric(options)?, split_on)?))
    }

    pub fn as_float_list(self) -> Resolver<Vec<f64>> {
        self.bind(comma_separated(numeric::bounded(10, None, None)))
    }

    pub fn as_float_list_with(
        self,
        options: FloatOptions,
        split_on: &str,
    ) -> Result<Resolver<Vec<f64>>, ConfigurationError> {
        Ok(self.bind(list::list(numeric::numeric(options)?, split_on)?))
    }

    pub fn as_string_list(self) -> Resolver<Vec<String>> {
        self.bind(comma_separated(varia::string()))
    }

    pub fn as_string_list_with(
        self,
        split_on: &str,
    ) -> Result<Resolver<Vec<String>>, ConfigurationError> {
        Ok(self.bind(list::list(varia::string(), split_on)?))
    }

    // Custom

    /// Any conversion; its error's `Display` becomes the validation message
    pub fn custom_transformer<T, E, F>(self, transformer: F) -> Resolver<T>
    where
        T: 'static,
        F: Fn(&str) -> Result<T, E> + 'static,
        E: fmt::Display,
    {
        self.bind(transformers::from_fn(transformer))
    }

    /// Uses a transformer that already reports [`ValidationError`]
    pub fn with_transformer<T, F>(self, transformer: F) -> Resolver<T>
    where
        T: 'static,
        F: Fn(&str) -> Result<T, ValidationError> + 'static,
    {
        self.bind(Box::new(transformer))
    }
}

fn comma_separated<T: 'static>(item: Transformer<T>) -> Transformer<Vec<T>> {
    list::split(item, list::DEFAULT_DELIMITER.to_string())
}
