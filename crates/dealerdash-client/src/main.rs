//! `dealerdash-export` — fetch click stats for a range and write the CSV
//! artifact, standing in for the dashboard's download button.
//!
//! Usage: `dealerdash-export [today|7days|30days|90days|custom] [start] [end]`
//! with `DEALERDASH_TOKEN` and `DEALERDASH_AGENCY_ID` in the environment.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use dealerdash_client::api::ApiClient;
use dealerdash_client::config::Config;
use dealerdash_client::session::{Session, SessionStore};
use dealerdash_core::export::{build_csv, export_filename};
use dealerdash_core::range::{DateRange, RangeKind};

#[tokio::main]
async fn main() -> Result<()> {
    // Level controlled via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dealerdash_client=info".parse()?),
        )
        .init();

    let cfg = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let token = std::env::var("DEALERDASH_TOKEN").context("DEALERDASH_TOKEN is required")?;
    let agency_id =
        std::env::var("DEALERDASH_AGENCY_ID").context("DEALERDASH_AGENCY_ID is required")?;

    let session = SessionStore::with_session(Session {
        token,
        agency_id: agency_id.clone(),
        agency_name: None,
    });
    let api = ApiClient::new(&cfg, session)?;

    let args: Vec<String> = std::env::args().collect();
    let kind = match args.get(1) {
        Some(raw) => RangeKind::parse(raw)?,
        None => RangeKind::default(),
    };
    let range = DateRange::resolve_local(
        kind,
        args.get(2).map(String::as_str),
        args.get(3).map(String::as_str),
    )
    .context("custom range requires start and end dates as YYYY-MM-DD")?;

    info!(start = %range.start_str(), end = %range.end_str(), "fetching click stats");
    let stats = api
        .get_click_stats(&agency_id, &range.start_str(), &range.end_str())
        .await?;

    let document = build_csv(&stats)?;
    let filename = export_filename(Utc::now().date_naive());
    std::fs::write(&filename, document)?;
    info!(
        file = %filename,
        clicks = stats.total_clicks,
        leads = stats.total_leads,
        "export written"
    );
    Ok(())
}
