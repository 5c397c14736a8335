//! View model for the analytics screen.
//!
//! Holds the range selection and the latest good stats. A failed or
//! superseded fetch never blanks data that is already on screen: the view
//! keeps showing the previous period until a newer fetch lands.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use dealerdash_core::error::CoreError;
use dealerdash_core::export::{build_csv, export_filename};
use dealerdash_core::metrics::{derive_metrics, CostMetrics};
use dealerdash_core::range::{DateRange, RangeKind};
use dealerdash_core::series::{expand_daily_series, DailySeriesPoint};
use dealerdash_core::stats::ClickStats;

use crate::api::ApiClient;
use crate::error::ApiError;

/// What the screen should show right now. `Failed` and `AwaitingRange`
/// coexist with stale data; only the message area changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// No session; the shell routes to login instead of rendering an error.
    NotSignedIn,
    /// Custom range incomplete — a neutral prompt, not an error.
    AwaitingRange,
    Loading,
    Ready,
    /// Fetch failed; carries the backend message when one was provided.
    Failed { message: String },
}

/// Immutable view of the model at one instant.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub status: Status,
    pub stats: Option<ClickStats>,
    pub series: Vec<DailySeriesPoint>,
    pub metrics: Option<CostMetrics>,
}

struct Inner {
    kind: RangeKind,
    custom_start: Option<String>,
    custom_end: Option<String>,
    /// Range the current `stats` were fetched for.
    range: Option<DateRange>,
    stats: Option<ClickStats>,
    status: Status,
}

pub struct AnalyticsModel {
    api: ApiClient,
    inner: Arc<RwLock<Inner>>,
    /// Request generation counter. Each `refresh` claims the next value;
    /// a response only lands if its generation is still the latest, so a
    /// slow superseded request cannot overwrite a newer selection.
    generation: AtomicU64,
}

impl AnalyticsModel {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            inner: Arc::new(RwLock::new(Inner {
                kind: RangeKind::default(),
                custom_start: None,
                custom_end: None,
                range: None,
                stats: None,
                status: Status::Loading,
            })),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn select_range(&self, kind: RangeKind) {
        self.inner.write().await.kind = kind;
    }

    pub async fn set_custom_bounds(&self, start: Option<String>, end: Option<String>) {
        let mut inner = self.inner.write().await;
        inner.kind = RangeKind::Custom;
        inner.custom_start = start;
        inner.custom_end = end;
    }

    /// Fetch stats for the current selection. Exactly one request per call;
    /// last-write-wins by initiation order.
    pub async fn refresh(&self) -> Status {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (kind, custom_start, custom_end) = {
            let inner = self.inner.read().await;
            (
                inner.kind,
                inner.custom_start.clone(),
                inner.custom_end.clone(),
            )
        };

        let Some(agency_id) = self.api.session().agency_id() else {
            return self.finish(generation, |inner| {
                inner.status = Status::NotSignedIn;
            })
            .await;
        };

        let Some(range) =
            DateRange::resolve_local(kind, custom_start.as_deref(), custom_end.as_deref())
        else {
            // Waiting for the user to finish picking dates; keep whatever
            // was on screen.
            return self.finish(generation, |inner| {
                inner.status = Status::AwaitingRange;
            })
            .await;
        };

        self.finish(generation, |inner| inner.status = Status::Loading)
            .await;

        let result = self
            .api
            .get_click_stats(&agency_id, &range.start_str(), &range.end_str())
            .await;

        self.finish(generation, |inner| match result {
            Ok(stats) => {
                inner.stats = Some(stats);
                inner.range = Some(range);
                inner.status = Status::Ready;
            }
            Err(ApiError::NoSession | ApiError::Unauthorized) => {
                inner.status = Status::NotSignedIn;
            }
            Err(err) => {
                // Stale-while-revalidate: previous stats stay on screen.
                inner.status = Status::Failed {
                    message: err.to_string(),
                };
            }
        })
        .await
    }

    /// Apply `update` only if `generation` is still the newest request.
    async fn finish<F>(&self, generation: u64, update: F) -> Status
    where
        F: FnOnce(&mut Inner),
    {
        let mut inner = self.inner.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding superseded stats response");
            return inner.status.clone();
        }
        update(&mut inner);
        inner.status.clone()
    }

    pub async fn snapshot(&self) -> Snapshot {
        let inner = self.inner.read().await;
        let series = match (&inner.range, &inner.stats) {
            (Some(range), Some(stats)) => {
                expand_daily_series(range.start, range.end, &stats.clicks_by_date)
            }
            _ => Vec::new(),
        };
        Snapshot {
            status: inner.status.clone(),
            stats: inner.stats.clone(),
            metrics: inner.stats.as_ref().map(derive_metrics),
            series,
        }
    }

    /// Build the CSV artifact for the currently displayed period. `None`
    /// when nothing has loaded yet.
    pub async fn export_csv(&self) -> Result<Option<(String, Vec<u8>)>, CoreError> {
        let inner = self.inner.read().await;
        let Some(stats) = &inner.stats else {
            return Ok(None);
        };
        let document = build_csv(stats)?;
        Ok(Some((
            export_filename(Utc::now().date_naive()),
            document,
        )))
    }
}
