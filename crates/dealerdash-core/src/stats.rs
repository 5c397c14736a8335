//! Backend-owned response types.
//!
//! Everything here is computed server-side and decoded read-only. Field
//! names mirror the backend JSON (camelCase, Prisma-shaped `_count` rows).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-period click/lead aggregate from `GET /click/stats/{agencyId}`.
///
/// `clicks_by_date` is sparse: days with no clicks are absent and imply
/// zero. Older agencies may omit the lead fields entirely, hence the
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickStats {
    #[serde(default)]
    pub total_clicks: i64,
    #[serde(default)]
    pub total_leads: i64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub cpc: f64,
    #[serde(default)]
    pub cpl: f64,
    #[serde(default)]
    pub clicks_by_date: HashMap<String, i64>,
    #[serde(default)]
    pub clicks_by_listing: Vec<ListingCount>,
    #[serde(default)]
    pub leads_by_date: HashMap<String, i64>,
    #[serde(default)]
    pub leads_by_listing: Vec<ListingCount>,
}

impl ClickStats {
    /// Lead count for a listing, matched by id against the leads breakdown.
    /// A listing absent from the breakdown has zero leads.
    pub fn leads_for(&self, listing_id: Option<&str>) -> i64 {
        self.leads_by_listing
            .iter()
            .find(|row| row.listing_id.as_deref() == listing_id)
            .map(|row| row.count.id)
            .unwrap_or(0)
    }
}

/// One breakdown row. A `null` listing id means the click was attributed
/// outside the agency's own catalog ("External").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingCount {
    pub listing_id: Option<String>,
    #[serde(rename = "_count")]
    pub count: CountField,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountField {
    pub id: i64,
}

/// Lifetime + trailing-period metrics from `GET /click/dashboard-summary`.
/// Consumed as-is by the dashboard view; never transformed client-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub active_listings: i64,
    #[serde(default)]
    pub total_clicks: i64,
    #[serde(default)]
    pub total_bill: f64,
    #[serde(default)]
    pub cpc: f64,
    #[serde(default)]
    pub total_leads: i64,
    #[serde(default)]
    pub cpl: f64,
    #[serde(default)]
    pub today_leads: i64,
    #[serde(default)]
    pub week_leads: i64,
    #[serde(default)]
    pub month_leads: i64,
    #[serde(default)]
    pub today_clicks: i64,
    #[serde(default)]
    pub yesterday_clicks: i64,
    #[serde(default)]
    pub week_clicks: i64,
    #[serde(default)]
    pub last_week_clicks: i64,
    #[serde(default)]
    pub month_clicks: i64,
    #[serde(default)]
    pub last_month_clicks: i64,
    #[serde(default)]
    pub month_bill: f64,
    #[serde(default)]
    pub last_month_bill: f64,
    #[serde(default)]
    pub recent_clicks: Vec<RecentClick>,
    #[serde(default)]
    pub top_listings: Vec<TopListing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentClick {
    pub id: String,
    pub listing_id: Option<String>,
    #[serde(default)]
    pub listing: Option<ListingRef>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRef {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopListing {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub clicks: i64,
}

/// Onboarding/approval state from `GET /onboarding`. The payload also
/// carries the agency profile fields; only the gate-relevant subset is
/// decoded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub onboarding_status: OnboardingState,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
}

/// Unrecognised values decode to `Unknown`, which every check treats as
/// not-completed (fail closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnboardingState {
    Incomplete,
    Completed,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    #[default]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_stats_decode_backend_shape() {
        let json = r#"{
            "totalClicks": 42,
            "totalCost": 105.0,
            "cpc": 2.5,
            "totalLeads": 3,
            "cpl": 35.0,
            "clicksByDate": {"2024-01-01": 5, "2024-01-03": 2},
            "clicksByListing": [
                {"listingId": "lst_0001", "_count": {"id": 30}},
                {"listingId": null, "_count": {"id": 12}}
            ],
            "leadsByListing": [
                {"listingId": "lst_0001", "_count": {"id": 3}}
            ]
        }"#;
        let stats: ClickStats = serde_json::from_str(json).expect("decode");
        assert_eq!(stats.total_clicks, 42);
        assert_eq!(stats.clicks_by_date.get("2024-01-01"), Some(&5));
        assert_eq!(stats.clicks_by_listing[1].listing_id, None);
        assert_eq!(stats.leads_for(Some("lst_0001")), 3);
        assert_eq!(stats.leads_for(None), 0);
    }

    #[test]
    fn click_stats_tolerate_missing_lead_fields() {
        let json = r#"{"totalClicks": 7, "totalCost": 14.0, "cpc": 2.0, "clicksByDate": {}, "clicksByListing": []}"#;
        let stats: ClickStats = serde_json::from_str(json).expect("decode");
        assert_eq!(stats.total_leads, 0);
        assert!(stats.leads_by_listing.is_empty());
    }

    #[test]
    fn onboarding_status_decodes_known_and_unknown_states() {
        let json = r#"{"id": "ag_1", "name": "Acme Motors", "onboardingStatus": "COMPLETED", "approvalStatus": "PENDING"}"#;
        let status: OnboardingStatus = serde_json::from_str(json).expect("decode");
        assert_eq!(status.onboarding_status, OnboardingState::Completed);
        assert_eq!(status.approval_status, ApprovalStatus::Pending);

        let json = r#"{"id": "ag_1", "onboardingStatus": "PAUSED", "approvalStatus": "ESCALATED"}"#;
        let status: OnboardingStatus = serde_json::from_str(json).expect("decode");
        assert_eq!(status.onboarding_status, OnboardingState::Unknown);
        assert_eq!(status.approval_status, ApprovalStatus::Unknown);
    }

    #[test]
    fn dashboard_summary_decodes_with_nested_rows() {
        let json = r#"{
            "activeListings": 12,
            "totalClicks": 900,
            "totalBill": 2250.0,
            "cpc": 2.5,
            "totalLeads": 18,
            "cpl": 125.0,
            "todayLeads": 1, "weekLeads": 4, "monthLeads": 9,
            "todayClicks": 20, "yesterdayClicks": 31,
            "weekClicks": 140, "lastWeekClicks": 120,
            "monthClicks": 540, "lastMonthClicks": 460,
            "monthBill": 1350.0, "lastMonthBill": 1150.0,
            "recentClicks": [
                {"id": "clk_1", "listingId": "lst_1",
                 "listing": {"id": "lst_1", "brand": "Maruti", "model": "Swift", "year": 2021},
                 "createdAt": "2024-03-01T10:00:00Z"},
                {"id": "clk_2", "listingId": null, "listing": null,
                 "createdAt": "2024-03-01T09:00:00Z"}
            ],
            "topListings": [
                {"id": "lst_1", "brand": "Maruti", "model": "Swift", "year": 2021, "clicks": 88}
            ]
        }"#;
        let summary: DashboardSummary = serde_json::from_str(json).expect("decode");
        assert_eq!(summary.active_listings, 12);
        assert_eq!(summary.recent_clicks.len(), 2);
        assert!(summary.recent_clicks[1].listing.is_none());
        assert_eq!(summary.top_listings[0].clicks, 88);
    }
}
