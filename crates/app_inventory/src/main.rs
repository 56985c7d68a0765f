use std::path::PathBuf;

use anyhow::Error;
use app_inventory::{config, export_installations, telemetry, ExportConfig};
use clap::Parser;


/// Export the GitHub App installations of an organization to CSV.
///
/// The token and organization are read from GITHUB_TOKEN and ORG_NAME, either in the
/// environment or in a .env file in the working directory.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Where to write the CSV file
    #[arg(long, default_value = config::DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Number of installations to request per page (1-100)
    #[arg(long, default_value_t = config::MAX_PER_PAGE)]
    per_page: u8,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();
    telemetry::init_local_telemetry()?;

    let config = ExportConfig::from_env()?
        .with_per_page(args.per_page)?
        .with_output_path(args.output);

    export_installations(&config).await?;

    Ok(())
}
