use std::{env, path::PathBuf, time::Duration};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{ExportError, Result};

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const ORG_NAME_VAR: &str = "ORG_NAME";
pub const GITHUB_API_URL_VAR: &str = "GITHUB_API_URL";

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_OUTPUT_FILE: &str = "github_apps.csv";

/// GitHub caps `per_page` at 100 for this endpoint.
pub const MAX_PER_PAGE: u8 = 100;

/// How often, and how far apart, a request is re-sent after a transport error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

/// Everything the exporter needs, resolved once at startup.
#[derive(Debug)]
pub struct ExportConfig {
    pub token: SecretString,
    pub org: String,
    pub api_base_url: String,
    pub per_page: u8,
    pub output_path: PathBuf,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    pub rate_limit_margin: Duration,
}

impl ExportConfig {
    pub fn new(token: impl Into<String>, org: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let org = org.into();

        if token.trim().is_empty() {
            return Err(ExportError::MissingEnv(GITHUB_TOKEN_VAR));
        }
        validate_org(&org)?;

        Ok(Self {
            token: SecretString::new(token),
            org,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            per_page: MAX_PER_PAGE,
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            request_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            rate_limit_margin: Duration::from_secs(5),
        })
    }

    /// Loads a `.env` file from the working directory (if there is one) and then reads
    /// the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// `GITHUB_TOKEN` and `ORG_NAME` are required, `GITHUB_API_URL` is optional.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = required(&lookup, GITHUB_TOKEN_VAR)?;
        let org = required(&lookup, ORG_NAME_VAR)?;

        let mut config = Self::new(token, org)?;
        if let Some(url) = lookup(GITHUB_API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_api_base_url(url);
        }

        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_per_page(mut self, per_page: u8) -> Result<Self> {
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(ExportError::Config(format!(
                "per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE, per_page
            )));
        }

        self.per_page = per_page;
        Ok(self)
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_rate_limit_margin(mut self, margin: Duration) -> Self {
        self.rate_limit_margin = margin;
        self
    }

    pub(crate) fn token(&self) -> String {
        self.token.expose_secret().to_string()
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ExportError::MissingEnv(key)),
    }
}

// The org ends up as a path segment of the request URI.
fn validate_org(org: &str) -> Result<()> {
    if org.trim().is_empty() {
        return Err(ExportError::MissingEnv(ORG_NAME_VAR));
    }

    if org.contains('/') || org.chars().any(char::is_whitespace) {
        return Err(ExportError::Config(format!(
            "The organization name is not a valid GitHub login: [{}]",
            org
        )));
    }

    Ok(())
}
