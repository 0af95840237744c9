//! Calendar reporting periods.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::RevenueError;

/// A reporting period resolved against "now" into a concrete window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    /// Returns the inclusive start of the window ending at `now`.
    ///
    /// Week is a rolling seven days; the calendar periods snap to the first
    /// day of the current month, quarter, or year at midnight UTC.
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Period::Week => now - Duration::days(7),
            Period::Month => month_start(now.year(), now.month()),
            Period::Quarter => {
                let quarter_month = (now.month0() / 3) * 3 + 1;
                month_start(now.year(), quarter_month)
            }
            Period::Year => month_start(now.year(), 1),
        }
    }

    /// Returns the half-open `[start, now)` window.
    pub fn window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start(now), now)
    }

    /// Returns the period name as used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = RevenueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "quarter" => Ok(Period::Quarter),
            "year" => Ok(Period::Year),
            other => Err(RevenueError::InvalidPeriod {
                value: other.to_string(),
            }),
        }
    }
}

fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    // Day 1 of any month is always a valid, unambiguous instant in UTC.
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
