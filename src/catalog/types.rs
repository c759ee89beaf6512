//! Request/response payloads of the catalog API.

use serde::{Deserialize, Serialize};

use crate::model::{CatalogItem, Environment};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EnvironmentList {
    #[serde(default)]
    pub list: Vec<Environment>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
    pub query: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApplicationPage {
    #[serde(default)]
    pub list: Vec<CatalogItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl ApplicationPage {
    /// A further page exists iff the cursor carries a `next` link.
    pub fn has_next(&self) -> bool {
        self.pagination
            .as_ref()
            .is_some_and(|p| p.next.is_some())
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub environment_id: String,
    pub reference_artifact: String,
}

impl ImportRequest {
    /// Uses the item's own artifact when present, otherwise a minimal
    /// `{"externalId","name"}` descriptor serialized as a string.
    pub fn for_item(item: &CatalogItem, environment_id: &str) -> Self {
        let reference_artifact = match item.artifact() {
            Some(artifact) => artifact.to_string(),
            None => serde_json::json!({
                "externalId": item.external_id,
                "name": item.name,
            })
            .to_string(),
        };
        Self {
            environment_id: environment_id.to_string(),
            reference_artifact,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
#[path = "../tests/catalog/types_tests.rs"]
mod tests;
