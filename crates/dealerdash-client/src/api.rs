//! Typed client for the marketplace backend.
//!
//! Every request carries the session token as a bearer credential. A 401
//! anywhere is the authoritative "session invalid" signal: the shared
//! session store is cleared before the error is returned, which routes the
//! whole shell back to login.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use dealerdash_core::stats::{ClickStats, DashboardSummary, OnboardingStatus};

use crate::config::Config;
use crate::error::ApiError;
use crate::session::SessionStore;

const GENERIC_FAILURE: &str = "Failed to load data.";

/// Error envelope the backend uses for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionStore) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()?;
        let mut base_url = Url::parse(&config.api_base_url)?;
        // Relative joins need the base path to end with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// `GET /click/stats/{agencyId}?startDate=&endDate=`
    pub async fn get_click_stats(
        &self,
        agency_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<ClickStats, ApiError> {
        let mut url = self.endpoint(&format!("click/stats/{agency_id}"))?;
        url.query_pairs_mut()
            .append_pair("startDate", start_date)
            .append_pair("endDate", end_date);
        self.get_json(url).await
    }

    /// `GET /click/dashboard-summary/{agencyId}`
    pub async fn get_dashboard_summary(
        &self,
        agency_id: &str,
    ) -> Result<DashboardSummary, ApiError> {
        let url = self.endpoint(&format!("click/dashboard-summary/{agency_id}"))?;
        self.get_json(url).await
    }

    /// `GET /onboarding` — approval state plus profile fields.
    pub async fn get_onboarding_status(&self) -> Result<OnboardingStatus, ApiError> {
        let url = self.endpoint("onboarding")?;
        self.get_json(url).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let token = self.session.token().ok_or(ApiError::NoSession)?;
        let response = self.http.get(url).bearer_auth(token).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("backend returned 401, tearing down session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }
}
