//! Spreadsheet export of a click-stats period.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::format::format_rate;
use crate::metrics::derive_metrics;
use crate::range::DATE_FMT;
use crate::stats::ClickStats;

pub const CSV_MIME: &str = "text/csv; charset=utf-8";

/// Spreadsheet tools need the BOM to detect UTF-8 and render `₹` correctly.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// How many characters of a listing id survive into the export.
const LISTING_ID_PREFIX: usize = 8;

/// Download name for an export taken on `today`. Callers pass the UTC
/// calendar date, so the name is stable across viewer timezones.
pub fn export_filename(today: NaiveDate) -> String {
    format!("analytics-{}.csv", today.format(DATE_FMT))
}

/// Serialize the period into a BOM-prefixed CSV document.
///
/// Row order is fixed: a `Metric,Value` summary block, a blank separator,
/// per-date rows ascending by ISO date, another separator, then per-listing
/// rows. Quoting follows RFC 4180 (handled by the `csv` writer), so cells
/// round-trip exactly even with embedded commas, quotes or newlines.
///
/// The per-listing cost column is reconstructed as `clicks × period CPC`.
/// The backend exposes no per-row historical cost, so the blended rate is
/// the specified behavior, not an approximation to fix here.
pub fn build_csv(stats: &ClickStats) -> Result<Vec<u8>, CoreError> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let metrics = derive_metrics(stats);
    wtr.write_record(["Metric", "Value"])?;
    wtr.write_record(["Total Clicks", stats.total_clicks.to_string().as_str()])?;
    wtr.write_record(["Total Leads", stats.total_leads.to_string().as_str()])?;
    wtr.write_record(["Total Cost", format_rate(stats.total_cost).as_str()])?;
    wtr.write_record(["CPC", metrics.cpc_display().as_str()])?;
    wtr.write_record(["CPL", metrics.cpl_display().as_str()])?;

    wtr.write_record([""])?;
    wtr.write_record(["Date", "Clicks"])?;
    let mut dates: Vec<(&String, &i64)> = stats.clicks_by_date.iter().collect();
    dates.sort_by(|a, b| a.0.cmp(b.0));
    for (date, clicks) in dates {
        wtr.write_record([date.as_str(), clicks.to_string().as_str()])?;
    }

    wtr.write_record([""])?;
    wtr.write_record(["Listing", "Clicks", "Leads", "Cost (₹)"])?;
    for row in &stats.clicks_by_listing {
        let clicks = row.count.id;
        let leads = stats.leads_for(row.listing_id.as_deref());
        let cost = clicks as f64 * stats.cpc;
        wtr.write_record([
            listing_label(row.listing_id.as_deref()).as_str(),
            clicks.to_string().as_str(),
            leads.to_string().as_str(),
            format!("{cost:.2}").as_str(),
        ])?;
    }

    let body = wtr
        .into_inner()
        .map_err(|e| CoreError::CsvFlush(e.to_string()))?;
    let mut document = Vec::with_capacity(UTF8_BOM.len() + body.len());
    document.extend_from_slice(UTF8_BOM);
    document.extend_from_slice(&body);
    Ok(document)
}

/// Truncated identifier for the listing column, or `External` for clicks
/// attributed outside the agency's catalog.
fn listing_label(listing_id: Option<&str>) -> String {
    match listing_id {
        Some(id) => format!("{}…", id.chars().take(LISTING_ID_PREFIX).collect::<String>()),
        None => "External".to_string(),
    }
}
