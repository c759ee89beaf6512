use anyhow::{Context, Result};

use crate::catalog::{
    ApplicationPage, CatalogError, EnvironmentList, ImportRequest, ImportResult, PageRequest,
    RemoteCatalog,
};
use crate::model::{CatalogItem, RemoteConfig};

mod http_client;
mod operations;

/// HTTP client for a gateway catalog.
pub struct RemoteClient {
    remote: RemoteConfig,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(remote: RemoteConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("discover")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("build reqwest client")?;
        Ok(Self { remote, client })
    }

    pub fn remote(&self) -> &RemoteConfig {
        &self.remote
    }
}
