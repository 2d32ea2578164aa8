//! Functions turning a raw string into a typed value.
//!
//! Every transformer either returns the value or a [`ValidationError`]
//! describing why the input was rejected. Factories that take configuration
//! check it up front and return a [`ConfigurationError`](crate::ConfigurationError)
//! instead of deferring the problem to the first read.

pub mod date;
pub mod list;
pub mod network;
pub mod numeric;
pub mod pattern;
pub mod varia;

use crate::error::ValidationError;
use std::fmt;

/// A boxed `&str -> T` conversion
pub type Transformer<T> = Box<dyn Fn(&str) -> Result<T, ValidationError>>;

/// Wraps any fallible conversion as a transformer
///
/// The error's `Display` output becomes the validation message.
pub fn from_fn<T, E, F>(f: F) -> Transformer<T>
where
    F: Fn(&str) -> Result<T, E> + 'static,
    E: fmt::Display,
{
    Box::new(move |s: &str| f(s).map_err(|e| ValidationError::new(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_wraps_error_message() {
        let pair = from_fn(|s: &str| match s.split_once(',') {
            Some((a, b)) if !b.contains(',') => Ok((a.to_string(), b.to_string())),
            _ => Err("expected exactly two items"),
        });

        assert_eq!(pair("a,b"), Ok(("a".to_string(), "b".to_string())));
        assert_eq!(
            pair("a,b,c"),
            Err(ValidationError::new("expected exactly two items"))
        );
        assert!(pair("").is_err());
    }
}
