use std::collections::HashMap;

use super::SelectionSet;
use crate::catalog::{CatalogError, ImportRequest, ImportResult, RemoteCatalog};
use crate::model::CatalogItem;

/// Terminal result of one import attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    Succeeded { id: String, result: ImportResult },
    /// The application already exists in the registry. Recoverable.
    Conflict { id: String },
    Failed { id: String, cause: String },
    /// The selected id is not a row of the page in view, so there is no
    /// fetched item to import.
    Skipped { id: String },
}

impl ImportOutcome {
    pub fn id(&self) -> &str {
        match self {
            ImportOutcome::Succeeded { id, .. }
            | ImportOutcome::Conflict { id }
            | ImportOutcome::Failed { id, .. }
            | ImportOutcome::Skipped { id } => id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ImportOutcome::Succeeded { .. })
    }

    fn classify(id: &str, result: Result<ImportResult, CatalogError>) -> Self {
        let id = id.to_string();
        match result {
            Ok(result) => ImportOutcome::Succeeded { id, result },
            Err(err) if err.is_conflict() => ImportOutcome::Conflict { id },
            Err(err) => ImportOutcome::Failed {
                id,
                cause: err.to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ImportState {
    #[default]
    Idle,
    Importing,
    Succeeded,
    Conflict,
    Failed(String),
}

impl From<&ImportOutcome> for ImportState {
    fn from(outcome: &ImportOutcome) -> Self {
        match outcome {
            ImportOutcome::Succeeded { .. } => ImportState::Succeeded,
            ImportOutcome::Conflict { .. } => ImportState::Conflict,
            ImportOutcome::Failed { cause, .. } => ImportState::Failed(cause.clone()),
            ImportOutcome::Skipped { .. } => ImportState::Idle,
        }
    }
}

/// Handle for one issued import call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportTicket {
    seq: u64,
    id: String,
    request: ImportRequest,
}

impl ImportTicket {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn request(&self) -> &ImportRequest {
        &self.request
    }
}

/// Tracks import attempts per application id. Retries are never automatic:
/// each attempt is a new [`ImportCoordinator::begin`].
#[derive(Debug, Default)]
pub struct ImportCoordinator {
    issued: u64,
    attempts: HashMap<String, (u64, ImportState)>,
}

impl ImportCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: &str) -> ImportState {
        self.attempts
            .get(id)
            .map(|(_, state)| state.clone())
            .unwrap_or_default()
    }

    pub fn is_importing(&self) -> bool {
        self.attempts
            .values()
            .any(|(_, state)| *state == ImportState::Importing)
    }

    pub fn reset(&mut self) {
        self.attempts.clear();
    }

    pub fn begin(&mut self, item: &CatalogItem, environment_id: &str) -> ImportTicket {
        self.issued += 1;
        let seq = self.issued;
        let id = item.external_id.clone();
        self.attempts
            .insert(id.clone(), (seq, ImportState::Importing));
        tracing::debug!(seq, application = %id, environment = environment_id, "import started");
        ImportTicket {
            seq,
            id,
            request: ImportRequest::for_item(item, environment_id),
        }
    }

    fn is_current(&self, ticket: &ImportTicket) -> bool {
        self.attempts
            .get(&ticket.id)
            .is_some_and(|(seq, _)| *seq == ticket.seq)
    }

    fn record(&mut self, ticket: &ImportTicket, outcome: &ImportOutcome) {
        if !self.is_current(ticket) {
            tracing::debug!(seq = ticket.seq, application = %ticket.id, "dropping stale import result");
            return;
        }
        match outcome {
            ImportOutcome::Succeeded { .. } => {
                tracing::info!(application = %ticket.id, "application imported")
            }
            ImportOutcome::Conflict { .. } => {
                tracing::info!(application = %ticket.id, "application already imported")
            }
            ImportOutcome::Failed { cause, .. } => {
                tracing::warn!(application = %ticket.id, cause = %cause, "import failed")
            }
            ImportOutcome::Skipped { .. } => {}
        }
        self.attempts
            .insert(ticket.id.clone(), (ticket.seq, ImportState::from(outcome)));
    }

    /// Records the result of an issued import. Returns `None` when a newer
    /// attempt for the same application superseded this one.
    pub fn finish(
        &mut self,
        ticket: ImportTicket,
        result: Result<ImportResult, CatalogError>,
    ) -> Option<ImportOutcome> {
        if !self.is_current(&ticket) {
            tracing::debug!(seq = ticket.seq, application = %ticket.id, "dropping stale import result");
            return None;
        }
        let outcome = ImportOutcome::classify(&ticket.id, result);
        self.record(&ticket, &outcome);
        Some(outcome)
    }

    /// Executes an issued import against `catalog`.
    pub fn run(&mut self, catalog: &dyn RemoteCatalog, ticket: ImportTicket) -> ImportOutcome {
        let result = catalog.import_application(&ticket.request);
        let outcome = ImportOutcome::classify(&ticket.id, result);
        self.record(&ticket, &outcome);
        outcome
    }

    pub fn import_one(
        &mut self,
        catalog: &dyn RemoteCatalog,
        item: &CatalogItem,
        environment_id: &str,
    ) -> ImportOutcome {
        let ticket = self.begin(item, environment_id);
        self.run(catalog, ticket)
    }

    /// Starts one import per selected id that resolves to one of `items`,
    /// in `items` order. Unresolvable ids are settled right away as
    /// [`ImportOutcome::Skipped`], sorted.
    pub fn begin_many(
        &mut self,
        selection: &SelectionSet,
        items: &[CatalogItem],
        environment_id: &str,
    ) -> ImportBatch {
        let tickets = items
            .iter()
            .filter(|i| selection.contains(&i.external_id))
            .map(|item| self.begin(item, environment_id))
            .collect();

        let mut unresolved: Vec<&str> = selection
            .iter()
            .filter(|id| !items.iter().any(|i| i.external_id == *id))
            .collect();
        unresolved.sort_unstable();
        let skipped = unresolved
            .into_iter()
            .map(|id| {
                tracing::debug!(application = id, "selected id not on page; skipped");
                ImportOutcome::Skipped { id: id.to_string() }
            })
            .collect();

        ImportBatch { tickets, skipped }
    }

    /// Imports every selected id that resolves to one of `items`, one call at
    /// a time. Each selected id gets exactly one outcome: rows in `items`
    /// order first, then unresolvable ids as [`ImportOutcome::Skipped`].
    pub fn import_many(
        &mut self,
        catalog: &dyn RemoteCatalog,
        selection: &SelectionSet,
        items: &[CatalogItem],
        environment_id: &str,
    ) -> Vec<ImportOutcome> {
        let batch = self.begin_many(selection, items, environment_id);
        let mut outcomes = Vec::with_capacity(batch.len());
        for ticket in batch.tickets {
            outcomes.push(self.run(catalog, ticket));
        }
        outcomes.extend(batch.skipped);
        outcomes
    }
}

/// Imports started together by [`ImportCoordinator::begin_many`].
#[derive(Debug, Default)]
pub struct ImportBatch {
    /// One ticket per selected row, still to be executed.
    pub tickets: Vec<ImportTicket>,
    pub skipped: Vec<ImportOutcome>,
}

impl ImportBatch {
    /// Number of selected ids the batch covers.
    pub fn len(&self) -> usize {
        self.tickets.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../tests/discovery/import_tests.rs"]
mod tests;
