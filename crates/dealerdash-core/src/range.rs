//! Date-range selection for the analytics screen.

use anyhow::anyhow;
use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Wire format for calendar days (`startDate`/`endDate` query params).
pub const DATE_FMT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RangeKind {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7days")]
    Last7Days,
    #[default]
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "90days")]
    Last90Days,
    #[serde(rename = "custom")]
    Custom,
}

impl RangeKind {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim() {
            "today" => Ok(Self::Today),
            "7days" => Ok(Self::Last7Days),
            "30days" => Ok(Self::Last30Days),
            "90days" => Ok(Self::Last90Days),
            "custom" => Ok(Self::Custom),
            _ => Err(anyhow!(
                "range must be one of: today, 7days, 30days, 90days, custom"
            )),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::Last90Days => "Last 90 days",
            Self::Custom => "Custom",
        }
    }
}

/// An inclusive calendar-day range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub kind: RangeKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Resolve a range selection against the given calendar day.
    ///
    /// For `Custom`, both bounds must be present and well-formed `YYYY-MM-DD`
    /// strings with `start <= end`; anything else yields `None`. An absent
    /// range is a valid waiting state (the user is still picking dates), so
    /// there is no error variant here.
    pub fn resolve(
        kind: RangeKind,
        custom_start: Option<&str>,
        custom_end: Option<&str>,
        today: NaiveDate,
    ) -> Option<Self> {
        let (start, end) = match kind {
            RangeKind::Today => (today, today),
            RangeKind::Last7Days => (today - Duration::days(7), today),
            RangeKind::Last30Days => (today - Duration::days(30), today),
            RangeKind::Last90Days => (today - Duration::days(90), today),
            RangeKind::Custom => {
                let start = parse_date(custom_start?)?;
                let end = parse_date(custom_end?)?;
                if end < start {
                    return None;
                }
                (start, end)
            }
        };
        Some(Self { kind, start, end })
    }

    /// [`Self::resolve`] against the viewer's local calendar date.
    pub fn resolve_local(
        kind: RangeKind,
        custom_start: Option<&str>,
        custom_end: Option<&str>,
    ) -> Option<Self> {
        Self::resolve(kind, custom_start, custom_end, Local::now().date_naive())
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATE_FMT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FMT).to_string()
    }

    /// Number of calendar days covered, both bounds inclusive.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FMT).ok()
}
