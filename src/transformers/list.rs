use super::Transformer;
use crate::error::{ConfigurationError, ValidationError};

pub const DEFAULT_DELIMITER: &str = ",";

/// Splits on `split_on` and converts every segment with `item`
///
/// The first segment that fails stops the conversion and its error is
/// returned; empty segments are passed to `item` like any other.
pub fn list<T: 'static>(
    item: Transformer<T>,
    split_on: &str,
) -> Result<Transformer<Vec<T>>, ConfigurationError> {
    if split_on.is_empty() {
        return Err(ConfigurationError::EmptyDelimiter);
    }
    Ok(split(item, split_on.to_string()))
}

/// Same as [`list`] for a delimiter already known to be non-empty
pub(crate) fn split<T: 'static>(item: Transformer<T>, split_on: String) -> Transformer<Vec<T>> {
    Box::new(move |s: &str| {
        s.split(split_on.as_str())
            .enumerate()
            .map(|(index, segment)| {
                item(segment).map_err(|e| {
                    ValidationError::new(match e.message {
                        Some(message) => format!("item {} ('{}'): {}", index, segment, message),
                        None => format!("item {} ('{}') is invalid", index, segment),
                    })
                })
            })
            .collect()
    })
}
