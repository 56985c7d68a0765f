use serde::{Deserialize, Serialize};

/// One page of `GET /orgs/{org}/installations`.
#[derive(Deserialize)]
pub struct InstallationsPage {
    #[serde(default)]
    pub installations: Vec<Installation>,
}

#[derive(Deserialize)]
pub struct Installation {
    pub app_slug: String,
    pub app_id: u64,
    pub target_type: String,
}

/// A single exported row. Field order here is the column order of the CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationRecord {
    #[serde(rename = "App Name")]
    pub app_name: String,
    #[serde(rename = "App ID")]
    pub app_id: u64,
    #[serde(rename = "Target Type")]
    pub target_type: String,
}

impl From<Installation> for InstallationRecord {
    fn from(installation: Installation) -> Self {
        Self {
            app_name: installation.app_slug,
            app_id: installation.app_id,
            target_type: installation.target_type,
        }
    }
}
