use super::Transformer;
use crate::error::ValidationError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::{Captures, Regex};
use std::{fmt, sync::LazyLock, time::Duration};

const ISO_NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

const LOOSE_DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y, %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d %B %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
];

const LOOSE_DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d %B %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%b %d, %Y",
];

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<sign>[+-])?P",
        r"(?:(?P<years>\d+(?:[.,]\d+)?)Y)?",
        r"(?:(?P<months>\d+(?:[.,]\d+)?)M)?",
        r"(?:(?P<weeks>\d+(?:[.,]\d+)?)W)?",
        r"(?:(?P<days>\d+(?:[.,]\d+)?)D)?",
        r"(?:(?P<time>T)",
        r"(?:(?P<hours>\d+(?:[.,]\d+)?)H)?",
        r"(?:(?P<minutes>\d+(?:[.,]\d+)?)M)?",
        r"(?:(?P<seconds>\d+(?:[.,]\d+)?)S)?",
        r")?$",
    ))
    .expect("valid iso duration regex")
});

/// ISO-8601 date-time; naive values are read as UTC and a bare date as midnight
pub fn iso_datetime() -> Transformer<DateTime<FixedOffset>> {
    Box::new(parse_iso_datetime)
}

/// Date-time in ISO-8601 or one of the common month-first layouts
pub fn datetime() -> Transformer<DateTime<FixedOffset>> {
    Box::new(|s: &str| {
        let s = s.trim();
        if let Ok(parsed) = parse_iso_datetime(s) {
            return Ok(parsed);
        }
        if let Ok(parsed) = DateTime::parse_from_rfc2822(s) {
            return Ok(parsed);
        }
        LOOSE_DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .or_else(|| {
                LOOSE_DATE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(as_utc)
            .ok_or_else(|| ValidationError::new(format!("'{}' is not a recognised date", s)))
    })
}

/// RFC3339 check that hands back the original string
pub fn iso_date_string() -> Transformer<String> {
    Box::new(|s: &str| match DateTime::parse_from_rfc3339(s) {
        Ok(_) => Ok(s.to_string()),
        Err(e) => Err(ValidationError::new(format!(
            "{} is not a valid rfc3339 date string: {}",
            s, e
        ))),
    })
}

pub fn iso_duration() -> Transformer<IsoDuration> {
    Box::new(|s: &str| s.parse::<IsoDuration>())
}

fn parse_iso_datetime(s: &str) -> Result<DateTime<FixedOffset>, ValidationError> {
    let rfc3339_err = match DateTime::parse_from_rfc3339(s) {
        Ok(parsed) => return Ok(parsed),
        Err(e) => e,
    };

    ISO_NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(as_utc)
        .ok_or_else(|| {
            ValidationError::new(format!(
                "'{}' is not a valid ISO-8601 date-time: {}",
                s, rfc3339_err
            ))
        })
}

fn as_utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&naive).into()
}

/// Nominal ISO-8601 duration such as `P3Y6M4DT12H30M5S`
///
/// Components are kept separately because years and months have no fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsoDuration {
    pub negative: bool,
    pub years: f64,
    pub months: f64,
    pub weeks: f64,
    pub days: f64,
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl IsoDuration {
    /// Exact length, available when the duration is positive and has no calendar parts
    pub fn to_std(&self) -> Option<Duration> {
        if self.negative || self.years != 0.0 || self.months != 0.0 {
            return None;
        }
        let days = self.weeks * 7.0 + self.days;
        let secs = days * 86_400.0 + self.hours * 3_600.0 + self.minutes * 60.0 + self.seconds;
        Duration::try_from_secs_f64(secs).ok()
    }
}

impl std::str::FromStr for IsoDuration {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::new(format!("'{}' is not a valid ISO-8601 duration", s));

        let caps = ISO_DURATION.captures(s).ok_or_else(invalid)?;
        let date_parts = ["years", "months", "weeks", "days"];
        let time_parts = ["hours", "minutes", "seconds"];
        let has_any = |names: &[&str]| names.iter().any(|name| caps.name(name).is_some());

        // "P" and "PT" alone carry no components
        if !has_any(&date_parts) && !has_any(&time_parts) {
            return Err(invalid());
        }
        if caps.name("time").is_some() && !has_any(&time_parts) {
            return Err(invalid());
        }

        let component = |caps: &Captures<'_>, name: &str| -> Result<f64, ValidationError> {
            match caps.name(name) {
                Some(m) => m.as_str().replace(',', ".").parse().map_err(|_| invalid()),
                None => Ok(0.0),
            }
        };

        Ok(Self {
            negative: caps.name("sign").is_some_and(|m| m.as_str() == "-"),
            years: component(&caps, "years")?,
            months: component(&caps, "months")?,
            weeks: component(&caps, "weeks")?,
            days: component(&caps, "days")?,
            hours: component(&caps, "hours")?,
            minutes: component(&caps, "minutes")?,
            seconds: component(&caps, "seconds")?,
        })
    }
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;
        let date = [
            (self.years, 'Y'),
            (self.months, 'M'),
            (self.weeks, 'W'),
            (self.days, 'D'),
        ];
        for (value, unit) in date {
            if value != 0.0 {
                write!(f, "{}{}", value, unit)?;
            }
        }
        let time = [(self.hours, 'H'), (self.minutes, 'M'), (self.seconds, 'S')];
        if time.iter().any(|(value, _)| *value != 0.0) {
            write!(f, "T")?;
            for (value, unit) in time {
                if value != 0.0 {
                    write!(f, "{}{}", value, unit)?;
                }
            }
        } else if date.iter().all(|(value, _)| *value == 0.0) {
            write!(f, "T0S")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_iso_datetime_with_zulu() {
        let parsed = iso_datetime()("2022-04-09T01:30:03.602Z").unwrap();
        let expected = Utc.with_ymd_and_hms(2022, 4, 9, 1, 30, 3).unwrap()
            + chrono::Duration::milliseconds(602);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_iso_datetime_keeps_offset() {
        let parsed = iso_datetime()("2022-04-09T01:30:03+02:00").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(parsed.hour(), 1);
    }

    #[test]
    fn test_iso_datetime_naive_and_date_only() {
        let naive = iso_datetime()("2022-04-09T01:30:03").unwrap();
        assert_eq!(naive.offset().local_minus_utc(), 0);
        assert_eq!(naive.minute(), 30);

        let date = iso_datetime()("2022-04-09").unwrap();
        assert_eq!((date.year(), date.month(), date.day(), date.hour()), (2022, 4, 9, 0));
    }

    #[test]
    fn test_iso_datetime_rejects_garbage() {
        let err = iso_datetime()("26f47ed0-b7a4-11ec-b909-0242ac12000").unwrap_err();
        assert!(err.to_string().contains("not a valid ISO-8601 date-time"));
        assert!(iso_datetime()("09/04/2022, 03:30:37").is_err());
    }

    #[test]
    fn test_datetime_loose_layouts() {
        let t = datetime();
        assert_eq!(
            t("2022-04-09T01:30:03.602Z").unwrap(),
            iso_datetime()("2022-04-09T01:30:03.602Z").unwrap()
        );

        let month_first = t("09/04/2022, 03:30:37").unwrap();
        assert_eq!(
            month_first,
            Utc.with_ymd_and_hms(2022, 9, 4, 3, 30, 37).unwrap()
        );

        let named = t("4 March 2021").unwrap();
        assert_eq!((named.year(), named.month(), named.day()), (2021, 3, 4));

        let rfc2822 = t("Tue, 1 Jul 2003 10:52:37 +0200").unwrap();
        assert_eq!(rfc2822.offset().local_minus_utc(), 2 * 3600);

        assert!(t("26f47ed0-b7a4-11ec-b909-0242ac12000").is_err());
    }

    #[test]
    fn test_iso_date_string_returns_input() {
        let t = iso_date_string();
        let value = "2001-10-23T15:32:12.9023368Z";
        assert_eq!(t(value), Ok(value.to_string()));
        assert!(t("2001-10-23").is_err());
        assert!(t("yesterday").is_err());
    }

    #[test]
    fn test_iso_duration_full() {
        let parsed: IsoDuration = "P3Y6M4DT12H30M5S".parse().unwrap();
        assert_eq!(
            parsed,
            IsoDuration {
                negative: false,
                years: 3.0,
                months: 6.0,
                weeks: 0.0,
                days: 4.0,
                hours: 12.0,
                minutes: 30.0,
                seconds: 5.0,
            }
        );
        assert_eq!(parsed.to_string(), "P3Y6M4DT12H30M5S");
        assert_eq!(parsed.to_std(), None);
    }

    #[test]
    fn test_iso_duration_time_only() {
        let parsed = iso_duration()("PT1M30.5S").unwrap();
        assert_eq!(parsed.minutes, 1.0);
        assert_eq!(parsed.seconds, 30.5);
        assert_eq!(parsed.to_std(), Some(Duration::from_millis(90_500)));

        let weeks = iso_duration()("P2W").unwrap();
        assert_eq!(weeks.to_std(), Some(Duration::from_secs(14 * 86_400)));
    }

    #[test]
    fn test_iso_duration_sign_and_comma() {
        let parsed: IsoDuration = "-P1,5D".parse().unwrap();
        assert!(parsed.negative);
        assert_eq!(parsed.days, 1.5);
        assert_eq!(parsed.to_std(), None);
        assert_eq!(parsed.to_string(), "-P1.5D");
    }

    #[test]
    fn test_iso_duration_rejects() {
        let invalid_values = [
            "26f47ed0-b7a4-11ec-b909-0242ac12000",
            "P",
            "PT",
            "P1DT",
            "1D",
            "P1H",
            "",
        ];
        for invalid in invalid_values {
            assert!(invalid.parse::<IsoDuration>().is_err(), "{invalid} should be rejected");
        }
    }

    #[test]
    fn test_zero_duration_display() {
        let zero: IsoDuration = "PT0S".parse().unwrap();
        assert_eq!(zero.to_string(), "PT0S");
        assert_eq!(zero.to_std(), Some(Duration::ZERO));
    }
}
