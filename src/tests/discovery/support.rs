//! Catalog fixtures shared by the discovery unit tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::catalog::{
    ApplicationPage, CatalogError, CatalogFixture, EnvironmentList, ImportRequest, ImportResult,
    MemoryCatalog, PageRequest, RemoteCatalog,
};
use crate::model::{CatalogItem, Environment};

pub(super) fn env(id: &str) -> Environment {
    Environment {
        id: id.to_string(),
        name: id.to_string(),
        display_name: None,
    }
}

pub(super) fn item(id: &str) -> CatalogItem {
    CatalogItem::new(id, format!("App {}", id))
}

/// `env1` holding A, B, C; `env2` holding X.
pub(super) fn abc_catalog() -> MemoryCatalog {
    let mut applications = BTreeMap::new();
    applications.insert("env1".to_string(), vec![item("A"), item("B"), item("C")]);
    applications.insert("env2".to_string(), vec![item("X")]);
    MemoryCatalog::new(CatalogFixture {
        environments: vec![env("env1"), env("env2")],
        applications,
    })
}

/// Wraps [`abc_catalog`] with scripted failures and records import requests.
pub(super) struct ScriptedCatalog {
    inner: MemoryCatalog,
    conflicts: HashSet<String>,
    failures: HashSet<String>,
    fail_listing: AtomicBool,
    pub(super) imports: Mutex<Vec<ImportRequest>>,
}

impl ScriptedCatalog {
    pub(super) fn new() -> Self {
        Self {
            inner: abc_catalog(),
            conflicts: HashSet::new(),
            failures: HashSet::new(),
            fail_listing: AtomicBool::new(false),
            imports: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn with_conflicts(mut self, ids: &[&str]) -> Self {
        self.conflicts = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub(super) fn with_failures(mut self, ids: &[&str]) -> Self {
        self.failures = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub(super) fn fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    pub(super) fn recorded_imports(&self) -> Vec<ImportRequest> {
        self.imports.lock().expect("imports lock").clone()
    }
}

fn artifact_id(artifact: &str) -> String {
    serde_json::from_str::<serde_json::Value>(artifact)
        .ok()
        .and_then(|v| v.get("externalId").and_then(|id| id.as_str()).map(str::to_string))
        .unwrap_or_else(|| artifact.to_string())
}

impl RemoteCatalog for ScriptedCatalog {
    fn list_environments(&self) -> Result<EnvironmentList, CatalogError> {
        self.inner.list_environments()
    }

    fn list_discovered_applications(
        &self,
        environment_id: &str,
        page: &PageRequest,
    ) -> Result<ApplicationPage, CatalogError> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(CatalogError::Status {
                context: "list discovered applications".to_string(),
                status: 503,
                message: "gateway unavailable".to_string(),
            });
        }
        self.inner.list_discovered_applications(environment_id, page)
    }

    fn get_discovered_application(
        &self,
        environment_id: &str,
        application_id: &str,
    ) -> Result<CatalogItem, CatalogError> {
        self.inner
            .get_discovered_application(environment_id, application_id)
    }

    fn import_application(&self, request: &ImportRequest) -> Result<ImportResult, CatalogError> {
        self.imports
            .lock()
            .expect("imports lock")
            .push(request.clone());
        let id = artifact_id(&request.reference_artifact);
        if self.conflicts.contains(&id) {
            return Err(CatalogError::Conflict(format!("application {}", id)));
        }
        if self.failures.contains(&id) {
            return Err(CatalogError::Status {
                context: "import application".to_string(),
                status: 500,
                message: "registry write failed".to_string(),
            });
        }
        Ok(ImportResult {
            application_id: Some(format!("local-{}", id)),
            name: None,
        })
    }
}
