use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub http_timeout_ms: u64,
    pub approval_poll_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            api_base_url: std::env::var("DEALERDASH_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3377".to_string()),
            http_timeout_ms: parse_or_default("DEALERDASH_HTTP_TIMEOUT_MS", 10_000)?,
            approval_poll_interval_secs: parse_or_default("DEALERDASH_APPROVAL_POLL_SECONDS", 15)?,
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn approval_poll_interval(&self) -> Duration {
        Duration::from_secs(self.approval_poll_interval_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3377".to_string(),
            http_timeout_ms: 10_000,
            approval_poll_interval_secs: 15,
        }
    }
}

/// Numeric env var: absent means the default, present but unparseable is an
/// error naming the variable.
fn parse_or_default(name: &str, default: u64) -> Result<u64, String> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("invalid {name}: {e}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_vars_fall_back_to_defaults() {
        assert_eq!(
            parse_or_default("DEALERDASH_TEST_UNSET", 15).expect("default"),
            15
        );
    }

    #[test]
    fn set_vars_parse_with_whitespace_tolerated() {
        std::env::set_var("DEALERDASH_TEST_SECONDS", " 30 ");
        assert_eq!(
            parse_or_default("DEALERDASH_TEST_SECONDS", 15).expect("parsed"),
            30
        );
        std::env::remove_var("DEALERDASH_TEST_SECONDS");
    }

    #[test]
    fn garbage_values_are_reported_not_swallowed() {
        std::env::set_var("DEALERDASH_TEST_GARBAGE", "soonish");
        let err = parse_or_default("DEALERDASH_TEST_GARBAGE", 15).expect_err("parse error");
        assert!(err.contains("DEALERDASH_TEST_GARBAGE"), "error names the variable: {err}");
        std::env::remove_var("DEALERDASH_TEST_GARBAGE");
    }
}
