use thiserror::Error;

/// Failures surfaced by the REST client, split the way the views need them:
/// "not signed in" routes to login, everything else is shown in-page.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session token present; no request was issued.
    #[error("not signed in")]
    NoSession,

    /// The backend rejected the token (HTTP 401). The session store has
    /// already been cleared by the time this is returned.
    #[error("session expired, please sign in again")]
    Unauthorized,

    /// Non-2xx response. Carries the backend-provided message when the body
    /// had one, a generic fallback otherwise.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid API base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}
