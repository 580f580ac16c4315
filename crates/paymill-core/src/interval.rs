//! # Interval
//!
//! Billing periods for offers and subscriptions, written on the wire as
//! `"<count> <UNIT>"`, e.g. `"1 MONTH"` or `"2 WEEK"`.

use crate::error::PaymillError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Day,
    Week,
    Month,
    Year,
    /// Unit token not known to this client version
    Undefined,
}

impl IntervalUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalUnit::Day => "DAY",
            IntervalUnit::Week => "WEEK",
            IntervalUnit::Month => "MONTH",
            IntervalUnit::Year => "YEAR",
            IntervalUnit::Undefined => "UNDEFINED",
        }
    }

    fn from_token(token: &str) -> Self {
        match token.to_ascii_uppercase().trim_end_matches('S') {
            "DAY" => IntervalUnit::Day,
            "WEEK" => IntervalUnit::Week,
            "MONTH" => IntervalUnit::Month,
            "YEAR" => IntervalUnit::Year,
            _ => IntervalUnit::Undefined,
        }
    }
}

/// A billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub count: u32,
    pub unit: IntervalUnit,
}

impl Interval {
    pub fn new(count: u32, unit: IntervalUnit) -> Self {
        Self { count, unit }
    }

    pub fn days(count: u32) -> Self {
        Self::new(count, IntervalUnit::Day)
    }

    pub fn weeks(count: u32) -> Self {
        Self::new(count, IntervalUnit::Week)
    }

    pub fn months(count: u32) -> Self {
        Self::new(count, IntervalUnit::Month)
    }

    pub fn years(count: u32) -> Self {
        Self::new(count, IntervalUnit::Year)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.count, self.unit.as_str())
    }
}

impl FromStr for Interval {
    type Err = PaymillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (count, unit) = match (parts.next(), parts.next(), parts.next()) {
            (Some(count), Some(unit), None) => (count, unit),
            _ => {
                return Err(PaymillError::InvalidArgument(format!(
                    "interval must look like \"1 MONTH\", got {:?}",
                    s
                )))
            }
        };

        let count = count.parse().map_err(|_| {
            PaymillError::InvalidArgument(format!("interval count is not a number: {:?}", s))
        })?;

        // Weekday suffixes such as "MONTH,FRIDAY" pin the charge day
        let unit = unit.split(',').next().unwrap_or(unit);

        Ok(Self::new(count, IntervalUnit::from_token(unit)))
    }
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
