use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::{
    ApplicationPage, CatalogError, EnvironmentList, ImportRequest, ImportResult, PageRequest,
    Pagination, RemoteCatalog,
};
use crate::model::{CatalogItem, Environment};

/// On-disk shape of a catalog: environments plus their applications.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogFixture {
    #[serde(default)]
    pub environments: Vec<Environment>,

    /// Applications keyed by environment id, in listing order.
    #[serde(default)]
    pub applications: BTreeMap<String, Vec<CatalogItem>>,
}

#[derive(Debug)]
struct CatalogState {
    fixture: CatalogFixture,
    next_import: u64,
}

/// Catalog held in process memory. Imports flip `alreadyImported` so a second
/// import of the same application reports a conflict.
#[derive(Debug)]
pub struct MemoryCatalog {
    state: Mutex<CatalogState>,
}

impl MemoryCatalog {
    pub fn new(fixture: CatalogFixture) -> Self {
        Self {
            state: Mutex::new(CatalogState {
                fixture,
                next_import: 1,
            }),
        }
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read fixture {}", path.display()))?;
        let fixture: CatalogFixture = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse fixture {}", path.display()))?;
        Ok(Self::new(fixture))
    }

    pub fn snapshot(&self) -> CatalogFixture {
        self.lock().fixture.clone()
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn environment_apps<'a>(
    fixture: &'a CatalogFixture,
    environment_id: &str,
) -> Result<&'a [CatalogItem], CatalogError> {
    if !fixture.environments.iter().any(|e| e.id == environment_id) {
        return Err(CatalogError::NotFound(format!(
            "environment {}",
            environment_id
        )));
    }
    Ok(fixture
        .applications
        .get(environment_id)
        .map(Vec::as_slice)
        .unwrap_or(&[]))
}

fn page_link(offset: usize, limit: usize, query: &str) -> String {
    if query.is_empty() {
        format!("offset={}&limit={}", offset, limit)
    } else {
        format!("offset={}&limit={}&query={}", offset, limit, query)
    }
}

/// Locates the application an artifact refers to: either the synthesized
/// `{"externalId": ...}` descriptor or a verbatim reference artifact.
fn resolve_artifact(apps: &[CatalogItem], artifact: &str) -> Option<usize> {
    if let Ok(serde_json::Value::Object(obj)) = serde_json::from_str::<serde_json::Value>(artifact)
        && let Some(serde_json::Value::String(id)) = obj.get("externalId")
        && let Some(idx) = apps.iter().position(|a| &a.external_id == id)
    {
        return Some(idx);
    }
    apps.iter()
        .position(|a| a.reference_artifact.as_deref() == Some(artifact))
}

impl RemoteCatalog for MemoryCatalog {
    fn list_environments(&self) -> Result<EnvironmentList, CatalogError> {
        Ok(EnvironmentList {
            list: self.lock().fixture.environments.clone(),
        })
    }

    fn list_discovered_applications(
        &self,
        environment_id: &str,
        page: &PageRequest,
    ) -> Result<ApplicationPage, CatalogError> {
        if page.limit == 0 {
            return Err(CatalogError::BadRequest("limit must be positive".to_string()));
        }
        let state = self.lock();
        let apps = environment_apps(&state.fixture, environment_id)?;

        let needle = page.query.trim().to_lowercase();
        let matching: Vec<&CatalogItem> = apps
            .iter()
            .filter(|a| needle.is_empty() || a.name.to_lowercase().contains(&needle))
            .collect();

        let total = matching.len();
        let list: Vec<CatalogItem> = matching
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .cloned()
            .collect();

        let end = page.offset.saturating_add(page.limit);
        let next = (end < total).then(|| page_link(end, page.limit, &page.query));
        let previous = (page.offset > 0).then(|| {
            page_link(
                page.offset.saturating_sub(page.limit),
                page.limit,
                &page.query,
            )
        });

        Ok(ApplicationPage {
            list,
            pagination: Some(Pagination {
                offset: page.offset,
                limit: page.limit,
                total,
                next,
                previous,
            }),
        })
    }

    fn get_discovered_application(
        &self,
        environment_id: &str,
        application_id: &str,
    ) -> Result<CatalogItem, CatalogError> {
        let state = self.lock();
        environment_apps(&state.fixture, environment_id)?
            .iter()
            .find(|a| a.external_id == application_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("application {}", application_id)))
    }

    fn import_application(&self, request: &ImportRequest) -> Result<ImportResult, CatalogError> {
        if request.reference_artifact.trim().is_empty() {
            return Err(CatalogError::BadRequest(
                "referenceArtifact is required".to_string(),
            ));
        }

        let mut state = self.lock();
        let idx = {
            let apps = environment_apps(&state.fixture, &request.environment_id)?;
            resolve_artifact(apps, &request.reference_artifact).ok_or_else(|| {
                CatalogError::NotFound("application for reference artifact".to_string())
            })?
        };

        let local_id = format!("app-{:04}", state.next_import);
        let Some(app) = state
            .fixture
            .applications
            .get_mut(&request.environment_id)
            .and_then(|apps| apps.get_mut(idx))
        else {
            return Err(CatalogError::NotFound(format!(
                "environment {}",
                request.environment_id
            )));
        };

        if app.already_imported {
            return Err(CatalogError::Conflict(format!("application {}", app.name)));
        }
        app.already_imported = true;
        app.imported_application_id = Some(local_id.clone());
        let name = app.name.clone();
        state.next_import += 1;

        tracing::debug!(
            environment = %request.environment_id,
            application = %local_id,
            "imported application"
        );
        Ok(ImportResult {
            application_id: Some(local_id),
            name: Some(name),
        })
    }
}

#[cfg(test)]
#[path = "../tests/catalog/memory_tests.rs"]
mod tests;
