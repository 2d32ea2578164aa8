use super::Transformer;
use crate::error::{ConfigurationError, ValidationError};
use std::{collections::HashMap, fmt, str::FromStr};

const TRUE_VALUES: &[&str] = &["y", "yes", "t", "true", "on", "1"];
const FALSE_VALUES: &[&str] = &["n", "no", "f", "false", "off", "0"];

/// Identity
pub fn string() -> Transformer<String> {
    Box::new(|s: &str| Ok(s.to_string()))
}

/// Case-insensitive yes/no style boolean
pub fn boolean() -> Transformer<bool> {
    Box::new(|s: &str| {
        let lower = s.to_ascii_lowercase();
        if TRUE_VALUES.contains(&lower.as_str()) {
            Ok(true)
        } else if FALSE_VALUES.contains(&lower.as_str()) {
            Ok(false)
        } else {
            Err(ValidationError::new(format!("invalid truth value '{}'", s)))
        }
    })
}

/// Any type with a `FromStr` impl
pub fn parsed<T>() -> Transformer<T>
where
    T: FromStr + 'static,
    T::Err: fmt::Display,
{
    Box::new(|s: &str| s.parse::<T>().map_err(|e| ValidationError::new(e.to_string())))
}

/// Looks the value up in an explicit `name -> member` mapping
///
/// Matching is exact, so `"ERROR"` does not select a member registered as `"error"`.
pub fn enumeration<K, T, I>(members: I) -> Result<Transformer<T>, ConfigurationError>
where
    K: Into<String>,
    T: Clone + 'static,
    I: IntoIterator<Item = (K, T)>,
{
    let mut lookup = HashMap::new();
    let mut names = Vec::new();
    for (name, member) in members {
        let name = name.into();
        if lookup.insert(name.clone(), member).is_some() {
            return Err(ConfigurationError::DuplicateEnumKey(name));
        }
        names.push(name);
    }
    if lookup.is_empty() {
        return Err(ConfigurationError::EmptyEnum);
    }

    let expected = names.join(", ");
    Ok(Box::new(move |s: &str| {
        lookup.get(s).cloned().ok_or_else(|| {
            ValidationError::new(format!("'{}' is not one of: {}", s, expected))
        })
    }))
}
