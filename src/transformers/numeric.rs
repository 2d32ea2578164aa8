use super::Transformer;
use crate::error::{ConfigurationError, ValidationError};
use std::{cmp::Ordering, fmt};

/// Number types the numeric transformers can produce
pub trait Numeric: Copy + PartialOrd + fmt::Display + 'static {
    /// Name used in error messages
    const KIND: &'static str;
    /// Whether a parse base other than 10 makes sense for this type
    const SUPPORTS_BASE: bool;

    fn parse(s: &str, base: u32) -> Result<Self, ValidationError>;
}

impl Numeric for i64 {
    const KIND: &'static str = "integer";
    const SUPPORTS_BASE: bool = true;

    fn parse(s: &str, base: u32) -> Result<Self, ValidationError> {
        parse_int(s, base)
    }
}

impl Numeric for f64 {
    const KIND: &'static str = "float";
    const SUPPORTS_BASE: bool = false;

    fn parse(s: &str, _base: u32) -> Result<Self, ValidationError> {
        s.trim()
            .parse()
            .map_err(|_| ValidationError::new(format!("'{}' is not a valid float", s)))
    }
}

/// Base and inclusive bounds for a numeric transformer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericOptions<N> {
    /// Parse base; 0 or 2..=36, integers only. Defaults to 10
    pub base: Option<u32>,
    pub min: Option<N>,
    pub max: Option<N>,
}

pub type IntOptions = NumericOptions<i64>;
pub type FloatOptions = NumericOptions<f64>;

impl<N> NumericOptions<N> {
    pub fn new() -> Self {
        Self {
            base: None,
            min: None,
            max: None,
        }
    }

    pub fn base(mut self, base: u32) -> Self {
        self.base = Some(base);
        self
    }

    pub fn min(mut self, min: N) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: N) -> Self {
        self.max = Some(max);
        self
    }
}

impl<N> Default for NumericOptions<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a numeric transformer after checking the options
pub fn numeric<N: Numeric>(options: NumericOptions<N>) -> Result<Transformer<N>, ConfigurationError> {
    for bound in options.min.into_iter().chain(options.max) {
        if bound.partial_cmp(&bound).is_none() {
            return Err(ConfigurationError::IncomparableBound(bound.to_string()));
        }
    }
    if let (Some(min), Some(max)) = (options.min, options.max) {
        if min > max {
            return Err(ConfigurationError::MinGreaterThanMax {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
    }

    if let Some(base) = options.base {
        if !N::SUPPORTS_BASE {
            return Err(ConfigurationError::BaseNotSupported { kind: N::KIND });
        }
        if base == 1 || base > 36 {
            return Err(ConfigurationError::InvalidBase(base));
        }
    }

    Ok(bounded(options.base.unwrap_or(10), options.min, options.max))
}

pub(crate) fn bounded<N: Numeric>(base: u32, min: Option<N>, max: Option<N>) -> Transformer<N> {
    Box::new(move |s: &str| check_bounds(N::parse(s, base)?, min, max))
}

fn check_bounds<N: Numeric>(value: N, min: Option<N>, max: Option<N>) -> Result<N, ValidationError> {
    // NaN compares as neither below nor above a bound and is rejected by both
    if let Some(min) = min {
        if !matches!(value.partial_cmp(&min), Some(Ordering::Greater | Ordering::Equal)) {
            return Err(ValidationError::new(format!(
                "should be greater than or equal to {}",
                min
            )));
        }
    }
    if let Some(max) = max {
        if !matches!(value.partial_cmp(&max), Some(Ordering::Less | Ordering::Equal)) {
            return Err(ValidationError::new(format!(
                "should be less than or equal to {}",
                max
            )));
        }
    }
    Ok(value)
}

/// TCP/UDP port in `1..=65535`
pub fn port_number() -> Transformer<u16> {
    Box::new(|s: &str| {
        let port = check_bounds(parse_int(s, 10)?, Some(1), Some(i64::from(u16::MAX)))?;
        u16::try_from(port).map_err(|e| ValidationError::new(e.to_string()))
    })
}

fn parse_int(s: &str, base: u32) -> Result<i64, ValidationError> {
    let invalid = || {
        ValidationError::new(format!(
            "'{}' is not a valid integer in base {}",
            s, base
        ))
    };

    let trimmed = s.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (radix, digits) = split_radix_prefix(unsigned, base);
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(invalid());
    }
    // Base 0 follows literal syntax: "010" is ambiguous and rejected
    if base == 0 && radix == 10 && digits.len() > 1 && digits.starts_with('0') {
        if digits.trim_start_matches('0').is_empty() {
            return Ok(0);
        }
        return Err(invalid());
    }

    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    i64::from_str_radix(&signed, radix).map_err(|_| invalid())
}

/// Returns the effective radix and the digits with any literal prefix removed
fn split_radix_prefix(digits: &str, base: u32) -> (u32, &str) {
    let prefixed = |lower: &str, upper: &str| {
        digits
            .strip_prefix(lower)
            .or_else(|| digits.strip_prefix(upper))
    };

    match base {
        0 => {
            for (lower, upper, radix) in [("0x", "0X", 16), ("0o", "0O", 8), ("0b", "0B", 2)] {
                if let Some(rest) = prefixed(lower, upper) {
                    return (radix, rest);
                }
            }
            (10, digits)
        }
        16 => (16, prefixed("0x", "0X").unwrap_or(digits)),
        8 => (8, prefixed("0o", "0O").unwrap_or(digits)),
        2 => (2, prefixed("0b", "0B").unwrap_or(digits)),
        _ => (base, digits),
    }
}
