use super::{DiscoveryError, FetchOutcome, ImportCoordinator, ImportOutcome, ImportState, ImportTicket};
use crate::catalog::{CatalogError, RemoteCatalog};
use crate::model::CatalogItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetailTicket {
    seq: u64,
}

/// One discovered application opened by `(environment, application)` id.
#[derive(Debug)]
pub struct DetailState {
    environment_id: String,
    application_id: String,
    item: Option<CatalogItem>,
    loading: bool,
    not_found: bool,
    issued: u64,
}

impl DetailState {
    pub fn new(environment_id: &str, application_id: &str) -> Self {
        Self {
            environment_id: environment_id.to_string(),
            application_id: application_id.to_string(),
            item: None,
            loading: false,
            not_found: false,
            issued: 0,
        }
    }

    pub fn environment_id(&self) -> &str {
        &self.environment_id
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn item(&self) -> Option<&CatalogItem> {
        self.item.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The application does not exist; the view stays empty.
    pub fn is_not_found(&self) -> bool {
        self.not_found
    }

    pub fn begin_load(&mut self) -> DetailTicket {
        self.issued += 1;
        self.loading = true;
        DetailTicket { seq: self.issued }
    }

    pub fn apply(
        &mut self,
        ticket: DetailTicket,
        result: Result<CatalogItem, CatalogError>,
    ) -> FetchOutcome {
        if ticket.seq != self.issued {
            return FetchOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(item) => {
                self.not_found = false;
                self.item = Some(item);
                FetchOutcome::Applied
            }
            Err(err) if err.is_not_found() => {
                self.not_found = true;
                self.item = None;
                FetchOutcome::Failed(DiscoveryError::NotFound {
                    environment_id: self.environment_id.clone(),
                    application_id: self.application_id.clone(),
                })
            }
            Err(err) => {
                tracing::warn!(error = %err, application = %self.application_id, "loading application details failed");
                FetchOutcome::Failed(DiscoveryError::Detail(err))
            }
        }
    }

    pub fn load(&mut self, catalog: &dyn RemoteCatalog) -> FetchOutcome {
        let ticket = self.begin_load();
        let result = catalog.get_discovered_application(&self.environment_id, &self.application_id);
        self.apply(ticket, result)
    }

    /// Starts importing the loaded application. Refused while loading, while
    /// an import of it is running, or when it is already imported.
    pub fn begin_import(
        &self,
        importer: &mut ImportCoordinator,
    ) -> Result<ImportTicket, DiscoveryError> {
        let item = match (&self.item, self.loading) {
            (Some(item), false) => item,
            _ => return Err(DiscoveryError::NothingToImport),
        };
        if item.already_imported {
            return Err(DiscoveryError::AlreadyImported(item.name.clone()));
        }
        if importer.state(&item.external_id) == ImportState::Importing {
            return Err(DiscoveryError::ImportInProgress(item.name.clone()));
        }
        Ok(importer.begin(item, &self.environment_id))
    }

    pub fn import(
        &self,
        catalog: &dyn RemoteCatalog,
        importer: &mut ImportCoordinator,
    ) -> Result<ImportOutcome, DiscoveryError> {
        let ticket = self.begin_import(importer)?;
        Ok(importer.run(catalog, ticket))
    }
}

#[cfg(test)]
#[path = "../tests/discovery/detail_tests.rs"]
mod tests;
