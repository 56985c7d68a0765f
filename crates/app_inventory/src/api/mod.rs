use chrono::Utc;
use octocrab::Octocrab;
use tracing::{debug, info, instrument, warn};

use crate::config::{ExportConfig, RetryPolicy};
use crate::errors::{ExportError, Result};

pub mod installations;
pub mod rate_limit;

use installations::{InstallationRecord, InstallationsPage};
use rate_limit::RateLimitGuard;

pub struct GitHubClient {
    octocrab: Octocrab,
    org: String,
    per_page: u8,
    retry: RetryPolicy,
    guard: RateLimitGuard,
}

impl GitHubClient {
    pub fn new(config: &ExportConfig) -> Result<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(config.token())
            .base_uri(config.api_base_url.as_str())?
            .add_header(
                http::header::ACCEPT,
                "application/vnd.github+json".to_string(),
            )
            .set_connect_timeout(Some(config.request_timeout))
            .set_read_timeout(Some(config.request_timeout))
            .build()?;

        Ok(Self {
            octocrab,
            org: config.org.clone(),
            per_page: config.per_page,
            retry: config.retry,
            guard: RateLimitGuard::new(config.rate_limit_margin),
        })
    }

    /// Walks every page of the organization's installations.
    ///
    /// Paging stops at the first empty page. Any other non-200 answer also stops it, and
    /// whatever was collected up to that point is returned. A rate-limited page is
    /// requested again once the limit has reset.
    #[instrument(skip(self), fields(org = %self.org))]
    pub async fn fetch_installations(&self) -> Result<Vec<InstallationRecord>> {
        let mut records = Vec::new();
        let mut page: u32 = 1;

        loop {
            let path = format!(
                "/orgs/{}/installations?per_page={}&page={}",
                self.org, self.per_page, page
            );

            debug!("Requesting page {}", page);
            let mut attempt = 1;
            let response = loop {
                match self.octocrab._get(path.as_str()).await {
                    Ok(response) => break response,
                    Err(source) if attempt >= self.retry.max_attempts => {
                        return Err(ExportError::Transport {
                            attempts: attempt,
                            source,
                        });
                    }
                    Err(source) => {
                        warn!(
                            attempt = attempt,
                            error_message = source.to_string(),
                            "Request for page {} failed, retrying in {:?}",
                            page,
                            self.retry.delay
                        );
                        tokio::time::sleep(self.retry.delay).await;
                        attempt += 1;
                    }
                }
            };
            let status = response.status();

            if status != http::StatusCode::OK {
                if self
                    .guard
                    .pause_if_exhausted(status, response.headers(), Utc::now())
                    .await
                {
                    continue;
                }

                match self.octocrab.body_to_string(response).await {
                    Ok(body) => warn!(
                        page = page,
                        status_code = status.as_u16(),
                        body = body.as_str(),
                        "Failed to fetch page {}: {} - {}",
                        page,
                        status.as_u16(),
                        body
                    ),
                    Err(e) => warn!(
                        page = page,
                        status_code = status.as_u16(),
                        error_message = e.to_string(),
                        "Failed to fetch page {}: {} - body unreadable: {}",
                        page,
                        status.as_u16(),
                        e
                    ),
                }
                break;
            }

            let body = self
                .octocrab
                .body_to_string(response)
                .await
                .map_err(|source| ExportError::Transport {
                    attempts: 1,
                    source,
                })?;
            let payload: InstallationsPage = serde_json::from_str(&body)?;

            if payload.installations.is_empty() {
                break;
            }

            debug!(
                "Page {} returned {} installation(s)",
                page,
                payload.installations.len()
            );
            records.extend(
                payload
                    .installations
                    .into_iter()
                    .map(InstallationRecord::from),
            );
            page += 1;
        }

        info!("Fetched {} installation(s)", records.len());
        Ok(records)
    }
}
