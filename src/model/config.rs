use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 6;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiscoverConfig {
    pub version: u32,

    #[serde(default)]
    pub remote: Option<RemoteConfig>,

    /// Rows requested per page of discovered applications.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// When false, "import selected" in the discovery list only reports what
    /// would be imported; single-item import from the detail view always runs.
    #[serde(default)]
    pub bulk_import: bool,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            version: 1,
            remote: None,
            page_size: DEFAULT_PAGE_SIZE,
            bulk_import: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    pub token: String,
}
