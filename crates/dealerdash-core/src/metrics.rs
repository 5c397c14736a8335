//! Derived cost metrics.

use crate::format::{format_rate, EM_DASH};
use crate::stats::ClickStats;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostMetrics {
    /// Cost per click. Always displayable, even with zero clicks — the
    /// backend reports the flat per-listing rate either way.
    pub cpc: f64,
    /// Cost per lead. `None` when the period has no leads; dividing by zero
    /// would produce a misleading figure, so the value is simply undefined.
    pub cpl: Option<f64>,
}

impl CostMetrics {
    pub fn cpc_display(&self) -> String {
        format_rate(self.cpc)
    }

    /// Em-dash placeholder when undefined, never `₹0.00` or NaN.
    pub fn cpl_display(&self) -> String {
        match self.cpl {
            Some(cpl) => format_rate(cpl),
            None => EM_DASH.to_string(),
        }
    }
}

pub fn derive_metrics(stats: &ClickStats) -> CostMetrics {
    CostMetrics {
        cpc: stats.cpc,
        cpl: (stats.total_leads > 0).then_some(stats.cpl),
    }
}
