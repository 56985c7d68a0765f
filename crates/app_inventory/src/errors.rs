use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to create the GitHub client: {0}")]
    Client(#[from] octocrab::Error),

    #[error("Request failed after {attempts} attempt(s): {source}")]
    Transport {
        attempts: u32,
        #[source]
        source: octocrab::Error,
    },

    #[error("Unexpected installations payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
