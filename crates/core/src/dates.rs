use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HitFinderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl DurationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DurationUnit {
    type Err = HitFinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let unit = match lower.trim_end_matches('s') {
            "second" => Self::Seconds,
            "minute" => Self::Minutes,
            "hour" => Self::Hours,
            "day" => Self::Days,
            "week" => Self::Weeks,
            "month" => Self::Months,
            "year" => Self::Years,
            _ => return Err(HitFinderError::Config(format!("unknown duration unit: {}", s))),
        };
        Ok(unit)
    }
}

/// The instant `duration` units before `now`.
///
/// Months and years follow the calendar (Mar 31 minus one month is Feb 28/29).
/// Results that fall before the representable range clamp to the minimum date.
pub fn threshold(now: DateTime<Utc>, duration: u32, unit: DurationUnit) -> DateTime<Utc> {
    let n = i64::from(duration);
    let shifted = match unit {
        DurationUnit::Seconds => now.checked_sub_signed(Duration::seconds(n)),
        DurationUnit::Minutes => now.checked_sub_signed(Duration::minutes(n)),
        DurationUnit::Hours => now.checked_sub_signed(Duration::hours(n)),
        DurationUnit::Days => now.checked_sub_signed(Duration::days(n)),
        DurationUnit::Weeks => now.checked_sub_signed(Duration::weeks(n)),
        DurationUnit::Months => now.checked_sub_months(Months::new(duration)),
        DurationUnit::Years => duration
            .checked_mul(12)
            .and_then(|months| now.checked_sub_months(Months::new(months))),
    };
    shifted.unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Strictly before `cutoff`. A date equal to the cutoff is not older.
pub fn before_cutoff(date: DateTime<Utc>, cutoff: DateTime<Utc>) -> bool {
    date < cutoff
}

/// Strictly after `cutoff`. A date equal to the cutoff is not younger.
pub fn after_cutoff(date: DateTime<Utc>, cutoff: DateTime<Utc>) -> bool {
    date > cutoff
}

/// True when `date` lies strictly before `now - duration`.
pub fn older_than(
    date: DateTime<Utc>,
    duration: u32,
    now: DateTime<Utc>,
    unit: DurationUnit,
) -> bool {
    before_cutoff(date, threshold(now, duration, unit))
}

/// True when `date` lies strictly after `now - duration`.
pub fn younger_than(
    date: DateTime<Utc>,
    duration: u32,
    now: DateTime<Utc>,
    unit: DurationUnit,
) -> bool {
    after_cutoff(date, threshold(now, duration, unit))
}
