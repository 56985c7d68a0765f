//! Exports the GitHub App installations of an organization to CSV.
//!
//! The pipeline is three steps run in order: page through
//! `GET /orgs/{org}/installations` (backing off when the rate limit is exhausted),
//! flatten each installation to an [`InstallationRecord`], then write the records to a
//! CSV file.

use tracing::info;

pub mod api;
pub mod config;
pub mod errors;
pub mod export;
pub mod telemetry;

pub use api::installations::InstallationRecord;
pub use api::GitHubClient;
pub use config::{ExportConfig, RetryPolicy};
pub use errors::{ExportError, Result};
pub use export::WriteOutcome;

/// Fetches every installation for the configured organization and writes them to
/// `config.output_path`.
pub async fn export_installations(config: &ExportConfig) -> Result<WriteOutcome> {
    info!("Fetching GitHub Apps...");

    let client = GitHubClient::new(config)?;
    let records = client.fetch_installations().await?;

    export::write_records(&records, &config.output_path)
}
