//! Sparse-to-dense expansion of the per-day click counts.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::format::display_label;
use crate::range::DATE_FMT;

/// One charted day. Recomputed on every range or data change, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySeriesPoint {
    pub date: String,
    pub display_label: String,
    pub clicks: i64,
}

/// Zero-fill: walk every calendar day from `start` to `end` inclusive and
/// emit one point per day, taking counts from the sparse map and defaulting
/// absent days to zero. Output is strictly ascending by date.
///
/// Day stepping uses date-only arithmetic, so daylight-saving transitions
/// cannot skip or duplicate a day.
pub fn expand_daily_series(
    start: NaiveDate,
    end: NaiveDate,
    clicks_by_date: &HashMap<String, i64>,
) -> Vec<DailySeriesPoint> {
    let mut series = Vec::new();
    let mut current = start;
    while current <= end {
        let date = current.format(DATE_FMT).to_string();
        let clicks = clicks_by_date.get(&date).copied().unwrap_or(0);
        series.push(DailySeriesPoint {
            display_label: display_label(current),
            date,
            clicks,
        });
        current += Duration::days(1);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FMT).expect("test date")
    }

    #[test]
    fn fills_gaps_with_zero_and_keeps_exact_counts() {
        let mut clicks = HashMap::new();
        clicks.insert("2024-01-01".to_string(), 5);
        clicks.insert("2024-01-03".to_string(), 2);

        let series = expand_daily_series(day("2024-01-01"), day("2024-01-03"), &clicks);

        let flat: Vec<(&str, i64)> = series
            .iter()
            .map(|p| (p.date.as_str(), p.clicks))
            .collect();
        assert_eq!(
            flat,
            vec![("2024-01-01", 5), ("2024-01-02", 0), ("2024-01-03", 2)]
        );
    }

    #[test]
    fn one_point_per_day_strictly_ascending() {
        let series = expand_daily_series(day("2024-02-20"), day("2024-03-05"), &HashMap::new());
        assert_eq!(series.len(), 15);
        for pair in series.windows(2) {
            assert!(pair[0].date < pair[1].date, "dates must ascend with no duplicates");
        }
        // Leap day is present.
        assert!(series.iter().any(|p| p.date == "2024-02-29"));
    }

    #[test]
    fn single_day_range_yields_one_point() {
        let series = expand_daily_series(day("2024-06-01"), day("2024-06-01"), &HashMap::new());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].clicks, 0);
        assert_eq!(series[0].display_label, "1 Jun 2024");
    }

    #[test]
    fn keys_outside_the_range_are_ignored() {
        let mut clicks = HashMap::new();
        clicks.insert("2023-12-31".to_string(), 99);
        clicks.insert("2024-01-02".to_string(), 4);

        let series = expand_daily_series(day("2024-01-01"), day("2024-01-02"), &clicks);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].clicks, 0);
        assert_eq!(series[1].clicks, 4);
    }

    #[test]
    fn length_matches_day_count_across_month_boundaries() {
        let start = day("2024-01-15");
        let end = day("2024-04-10");
        let series = expand_daily_series(start, end, &HashMap::new());
        assert_eq!(series.len() as i64, (end - start).num_days() + 1);
    }
}
