//! # Temporal Types — Granularity-Bound Datestamps
//!
//! OAI-PMH datestamps are UTC and come in exactly two precisions, declared
//! once per repository in the Identify response:
//!
//! | Granularity | Literal form |
//! |---|---|
//! | [`Granularity::Date`] | `YYYY-MM-DD` |
//! | [`Granularity::DateTime`] | `YYYY-MM-DDThh:mm:ssZ` |
//!
//! A [`UtcDateTime`] is the pair (literal, granularity). The literal is
//! valid only if it has the exact shape its granularity prescribes *and*
//! names a real calendar instant. Two datestamps with different
//! granularities are never equal, even when one is a prefix of the other.
//!
//! Offsets other than `Z`, fractional seconds and leap seconds are rejected
//! at construction. There is no silent conversion.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::macros::{impl_value_display, is_blank, matches, Pattern};

static DATE_SHAPE: Pattern = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").ok());
static DATE_TIME_SHAPE: Pattern = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}Z$").ok()
});

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Datestamp precision supported by a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// Day precision: `YYYY-MM-DD`.
    #[serde(rename = "YYYY-MM-DD")]
    Date,
    /// Second precision: `YYYY-MM-DDThh:mm:ssZ`.
    #[serde(rename = "YYYY-MM-DDThh:mm:ssZ")]
    DateTime,
}

impl Granularity {
    /// Both granularities, coarsest first.
    pub fn all() -> &'static [Granularity] {
        &[Self::Date, Self::DateTime]
    }

    /// Returns the protocol literal, which is also the datestamp pattern.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "YYYY-MM-DD",
            Self::DateTime => "YYYY-MM-DDThh:mm:ssZ",
        }
    }

    /// Alias of [`Granularity::as_str`] for call sites that read better
    /// as "the pattern of this granularity".
    pub fn pattern(&self) -> &'static str {
        self.as_str()
    }

    /// Parse and validate a granularity literal.
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        value.parse()
    }

    /// Returns true if `literal` has exactly the shape of this granularity.
    ///
    /// Only the shape is checked, not the calendar.
    pub fn matches_shape(&self, literal: &str) -> bool {
        match self {
            Self::Date => matches(&DATE_SHAPE, literal),
            Self::DateTime => matches(&DATE_TIME_SHAPE, literal),
        }
    }

    /// Render an instant at this granularity, truncating finer components.
    pub fn format(&self, instant: &DateTime<Utc>) -> String {
        instant.format(self.chrono_format()).to_string()
    }

    fn chrono_format(&self) -> &'static str {
        match self {
            Self::Date => DATE_FORMAT,
            Self::DateTime => DATE_TIME_FORMAT,
        }
    }

    fn other(&self) -> Self {
        match self {
            Self::Date => Self::DateTime,
            Self::DateTime => Self::Date,
        }
    }
}

impl FromStr for Granularity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_blank(s) {
            return Err(ValidationError::Empty {
                type_name: "Granularity",
            });
        }
        match s {
            "YYYY-MM-DD" => Ok(Self::Date),
            "YYYY-MM-DDThh:mm:ssZ" => Ok(Self::DateTime),
            other => Err(ValidationError::DisallowedValue {
                type_name: "Granularity",
                value: other.to_string(),
                allowed: "YYYY-MM-DD, YYYY-MM-DDThh:mm:ssZ",
            }),
        }
    }
}

impl_value_display!(Granularity, "granularity");

/// A UTC datestamp bound to the granularity it was declared in.
///
/// # Construction
///
/// - [`UtcDateTime::new()`]: from a literal and its granularity.
/// - [`UtcDateTime::from_datetime()`]: render a `DateTime<Utc>` at a granularity.
///
/// # Ordering
///
/// Datestamps of the same granularity are ordered chronologically.
/// Comparing across granularities yields `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDatestamp", into = "RawDatestamp")]
pub struct UtcDateTime {
    datestamp: String,
    granularity: Granularity,
    instant: DateTime<Utc>,
}

impl UtcDateTime {
    /// Create a datestamp, validating it against `granularity`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::Empty`] for blank input.
    /// - [`ValidationError::GranularityMismatch`] if the literal has the
    ///   shape of the *other* granularity.
    /// - [`ValidationError::InvalidFormat`] if it has neither shape.
    /// - [`ValidationError::InvalidCalendarDate`] if the shape is right but
    ///   the date/time does not exist (month 13, Feb 30, 24:00:00, leap second).
    pub fn new(
        value: impl Into<String>,
        granularity: Granularity,
    ) -> Result<Self, ValidationError> {
        let datestamp = value.into();
        if is_blank(&datestamp) {
            return Err(ValidationError::Empty {
                type_name: "UtcDateTime",
            });
        }

        if !granularity.matches_shape(&datestamp) {
            if granularity.other().matches_shape(&datestamp) {
                return Err(ValidationError::GranularityMismatch {
                    value: datestamp,
                    granularity: granularity.as_str(),
                });
            }
            return Err(ValidationError::InvalidFormat {
                type_name: "UtcDateTime",
                value: datestamp,
                expected: granularity.as_str(),
            });
        }

        let instant = parse_instant(&datestamp, granularity)?;

        Ok(Self {
            datestamp,
            granularity,
            instant,
        })
    }

    /// Render `instant` at `granularity`, truncating finer components.
    ///
    /// Fails only for instants outside the four-digit year range.
    pub fn from_datetime(
        instant: DateTime<Utc>,
        granularity: Granularity,
    ) -> Result<Self, ValidationError> {
        Self::new(granularity.format(&instant), granularity)
    }

    /// The datestamp literal exactly as given.
    pub fn as_str(&self) -> &str {
        &self.datestamp
    }

    /// The granularity this datestamp was validated against.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// The instant the literal denotes. Day-granularity datestamps denote
    /// midnight UTC at the start of the day.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.instant
    }
}

fn parse_instant(
    datestamp: &str,
    granularity: Granularity,
) -> Result<DateTime<Utc>, ValidationError> {
    let calendar_error = |reason: String| ValidationError::InvalidCalendarDate {
        value: datestamp.to_string(),
        reason,
    };

    let naive = match granularity {
        Granularity::Date => NaiveDate::parse_from_str(datestamp, DATE_FORMAT)
            .map_err(|e| calendar_error(e.to_string()))?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| calendar_error("no midnight on this date".to_string()))?,
        Granularity::DateTime => NaiveDateTime::parse_from_str(datestamp, DATE_TIME_FORMAT)
            .map_err(|e| calendar_error(e.to_string()))?,
    };

    // chrono accepts second 60 as a leap second and stores it as nanoseconds.
    if naive.nanosecond() != 0 {
        return Err(calendar_error("leap seconds are not representable".to_string()));
    }

    Ok(naive.and_utc())
}

impl PartialOrd for UtcDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.granularity != other.granularity {
            return None;
        }
        Some(self.instant.cmp(&other.instant))
    }
}

impl std::fmt::Display for UtcDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "UtcDateTime(datestamp: {}, granularity: {})",
            self.datestamp,
            self.granularity.as_str()
        )
    }
}

/// Wire form of a [`UtcDateTime`].
#[derive(Serialize, Deserialize)]
struct RawDatestamp {
    datestamp: String,
    granularity: Granularity,
}

impl TryFrom<RawDatestamp> for UtcDateTime {
    type Error = ValidationError;

    fn try_from(raw: RawDatestamp) -> Result<Self, Self::Error> {
        Self::new(raw.datestamp, raw.granularity)
    }
}

impl From<UtcDateTime> for RawDatestamp {
    fn from(value: UtcDateTime) -> Self {
        Self {
            datestamp: value.datestamp,
            granularity: value.granularity,
        }
    }
}
