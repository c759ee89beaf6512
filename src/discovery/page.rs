use super::{DiscoveryError, SelectionSet};
use crate::catalog::{ApplicationPage, CatalogError, EnvironmentList, PageRequest, RemoteCatalog};
use crate::model::{CatalogItem, Environment};

/// What a page was requested with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub environment_id: String,
    pub search: String,
    pub offset: usize,
    pub page_size: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageResult {
    pub items: Vec<CatalogItem>,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageResult {
    fn from_response(resp: ApplicationPage, offset: usize) -> Self {
        let has_next = resp.has_next();
        Self {
            items: resp.list,
            has_next,
            has_previous: offset > 0,
        }
    }
}

/// A page in view paired with the selection made on it. Replacing the page
/// replaces the selection, so selections never leak across pages.
#[derive(Clone, Debug)]
pub struct Page {
    query: Query,
    result: PageResult,
    selection: SelectionSet,
}

impl Page {
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn result(&self) -> &PageResult {
        &self.result
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.result.items
    }

    pub fn ids(&self) -> Vec<&str> {
        self.result
            .items
            .iter()
            .map(|i| i.external_id.as_str())
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&CatalogItem> {
        self.result.items.iter().find(|i| i.external_id == id)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Toggles `id` if it is a row of this page. Returns false otherwise.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.selection.toggle(id);
        true
    }

    pub fn toggle_all(&mut self) {
        let ids: Vec<String> = self
            .result
            .items
            .iter()
            .map(|i| i.external_id.clone())
            .collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        self.selection.toggle_all(&refs);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(&self.ids())
    }

    pub fn is_partially_selected(&self) -> bool {
        self.selection.is_partially_selected(&self.ids())
    }

    /// Selected rows in page order.
    pub fn selected_items(&self) -> Vec<&CatalogItem> {
        self.result
            .items
            .iter()
            .filter(|i| self.selection.contains(&i.external_id))
            .collect()
    }
}

/// Handle for one issued page request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: Query,
}

impl FetchTicket {
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn environment_id(&self) -> &str {
        &self.query.environment_id
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            limit: self.query.page_size,
            offset: self.query.offset,
            query: self.query.search.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnvironmentsTicket {
    seq: u64,
}

#[derive(Debug)]
pub enum FetchOutcome {
    /// The response replaced the page in view.
    Applied,
    /// A newer request was issued after this one; the response was dropped.
    Stale,
    /// Nothing was requested (no environment, or navigation not possible).
    Skipped,
    Failed(DiscoveryError),
}

impl FetchOutcome {
    pub fn into_result(self) -> Result<bool, DiscoveryError> {
        match self {
            FetchOutcome::Applied => Ok(true),
            FetchOutcome::Stale | FetchOutcome::Skipped => Ok(false),
            FetchOutcome::Failed(err) => Err(err),
        }
    }
}

/// Owns the query in view and the page it produced.
#[derive(Debug)]
pub struct PageCoordinator {
    page_size: usize,
    environments: Vec<Environment>,
    environment_id: Option<String>,
    search: String,
    offset: usize,
    page: Option<Page>,
    loading: bool,
    loading_environments: bool,
    issued: u64,
    latest_fetch: u64,
    latest_environments: u64,
}

impl PageCoordinator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            environments: Vec::new(),
            environment_id: None,
            search: String::new(),
            offset: 0,
            page: None,
            loading: false,
            loading_environments: false,
            issued: 0,
            latest_fetch: 0,
            latest_environments: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    pub fn environment_id(&self) -> Option<&str> {
        self.environment_id.as_deref()
    }

    pub fn environment(&self) -> Option<&Environment> {
        let id = self.environment_id.as_deref()?;
        self.environments.iter().find(|e| e.id == id)
    }

    pub fn search_query(&self) -> &str {
        &self.search
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loading_environments(&self) -> bool {
        self.loading_environments
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn page_mut(&mut self) -> Option<&mut Page> {
        self.page.as_mut()
    }

    pub fn items(&self) -> &[CatalogItem] {
        self.page.as_ref().map(Page::items).unwrap_or(&[])
    }

    pub fn has_next(&self) -> bool {
        self.page.as_ref().is_some_and(|p| p.result.has_next)
    }

    pub fn has_previous(&self) -> bool {
        self.page.as_ref().is_some_and(|p| p.result.has_previous)
    }

    fn next_seq(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    fn clear_selection(&mut self) {
        if let Some(page) = self.page.as_mut() {
            page.clear_selection();
        }
    }

    pub fn begin_load_environments(&mut self) -> EnvironmentsTicket {
        let seq = self.next_seq();
        self.latest_environments = seq;
        self.loading_environments = true;
        EnvironmentsTicket { seq }
    }

    /// Stores the environment list. When no environment is chosen yet (or
    /// the chosen one disappeared) the first one becomes the default and its
    /// first page is requested. A stale response yields `Ok(None)`.
    pub fn apply_environments(
        &mut self,
        ticket: EnvironmentsTicket,
        result: Result<EnvironmentList, CatalogError>,
    ) -> Result<Option<FetchTicket>, DiscoveryError> {
        if ticket.seq != self.latest_environments {
            tracing::debug!(seq = ticket.seq, "dropping stale environment list");
            return Ok(None);
        }
        self.loading_environments = false;

        let list = match result {
            Ok(list) => list.list,
            Err(err) => {
                tracing::warn!(error = %err, "loading environments failed");
                return Err(DiscoveryError::Environments(err));
            }
        };
        tracing::debug!(count = list.len(), "environments loaded");
        self.environments = list;

        let current_known = self
            .environment_id
            .as_deref()
            .is_some_and(|id| self.environments.iter().any(|e| e.id == id));
        if current_known {
            return Ok(None);
        }

        match self.environments.first().map(|e| e.id.clone()) {
            Some(first) => self.set_environment(&first).map(Some),
            None => {
                self.environment_id = None;
                self.page = None;
                self.offset = 0;
                Ok(None)
            }
        }
    }

    /// Switches environment: offset back to 0, selection cleared, first page requested.
    pub fn set_environment(&mut self, environment_id: &str) -> Result<FetchTicket, DiscoveryError> {
        let environment_id = environment_id.trim();
        if environment_id.is_empty() {
            return Err(DiscoveryError::InvalidEnvironment(environment_id.to_string()));
        }
        self.environment_id = Some(environment_id.to_string());
        self.offset = 0;
        self.clear_selection();
        Ok(self.issue(environment_id.to_string(), 0))
    }

    /// Stores the search text. Nothing is requested until [`Self::search`].
    pub fn set_search_query(&mut self, text: &str) {
        self.search = text.to_string();
    }

    /// Runs the stored search from the first page.
    pub fn search(&mut self) -> Option<FetchTicket> {
        self.offset = 0;
        self.begin_fetch(None, Some(0))
    }

    /// Re-requests the current page.
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        self.begin_fetch(None, None)
    }

    /// Issues a page request. Returns `None` when no environment is selected.
    pub fn begin_fetch(
        &mut self,
        environment_id: Option<&str>,
        offset: Option<usize>,
    ) -> Option<FetchTicket> {
        if let Some(id) = environment_id.filter(|id| !id.trim().is_empty()) {
            self.environment_id = Some(id.trim().to_string());
        }
        let environment_id = self.environment_id.clone()?;
        let offset = offset.unwrap_or(self.offset);
        Some(self.issue(environment_id, offset))
    }

    fn issue(&mut self, environment_id: String, offset: usize) -> FetchTicket {
        let seq = self.next_seq();
        self.latest_fetch = seq;
        self.loading = true;
        self.clear_selection();
        tracing::debug!(seq, environment = %environment_id, offset, "page requested");
        FetchTicket {
            seq,
            query: Query {
                environment_id,
                search: self.search.clone(),
                offset,
                page_size: self.page_size,
            },
        }
    }

    /// Requests the page after the one in view, with the environment and
    /// search that page was fetched with.
    pub fn next_page(&mut self) -> Option<FetchTicket> {
        let query = self.navigable(|r| r.has_next)?;
        let offset = query.offset.saturating_add(query.page_size);
        Some(self.step(query, offset))
    }

    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        let query = self.navigable(|r| r.has_previous)?;
        let offset = query.offset.saturating_sub(query.page_size);
        Some(self.step(query, offset))
    }

    fn navigable(&self, allowed: impl Fn(&PageResult) -> bool) -> Option<Query> {
        if self.loading {
            return None;
        }
        self.page
            .as_ref()
            .filter(|p| allowed(&p.result))
            .map(|p| p.query.clone())
    }

    fn step(&mut self, query: Query, offset: usize) -> FetchTicket {
        self.environment_id = Some(query.environment_id.clone());
        self.search = query.search;
        self.issue(query.environment_id, offset)
    }

    /// Applies a page response if `ticket` is the latest request. On failure
    /// the page in view is kept.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<ApplicationPage, CatalogError>,
    ) -> FetchOutcome {
        if ticket.seq != self.latest_fetch {
            tracing::debug!(seq = ticket.seq, latest = self.latest_fetch, "dropping stale page");
            return FetchOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(resp) => {
                let query = ticket.query;
                let result = PageResult::from_response(resp, query.offset);
                tracing::debug!(
                    environment = %query.environment_id,
                    offset = query.offset,
                    rows = result.items.len(),
                    has_next = result.has_next,
                    "page applied"
                );
                self.offset = query.offset;
                self.page = Some(Page {
                    query,
                    result,
                    selection: SelectionSet::new(),
                });
                FetchOutcome::Applied
            }
            Err(err) if err.is_not_found() => {
                tracing::warn!(environment = %ticket.query.environment_id, "unknown environment");
                FetchOutcome::Failed(DiscoveryError::InvalidEnvironment(
                    ticket.query.environment_id,
                ))
            }
            Err(err) => {
                tracing::warn!(error = %err, "loading discovered applications failed");
                FetchOutcome::Failed(DiscoveryError::Fetch(err))
            }
        }
    }

    /// Executes an issued request against `catalog` and applies it.
    pub fn run(&mut self, catalog: &dyn RemoteCatalog, ticket: FetchTicket) -> FetchOutcome {
        let result = catalog.list_discovered_applications(ticket.environment_id(), &ticket.page_request());
        self.apply(ticket, result)
    }

    fn run_opt(&mut self, catalog: &dyn RemoteCatalog, ticket: Option<FetchTicket>) -> FetchOutcome {
        match ticket {
            Some(ticket) => self.run(catalog, ticket),
            None => FetchOutcome::Skipped,
        }
    }

    pub fn load_environments(&mut self, catalog: &dyn RemoteCatalog) -> FetchOutcome {
        let ticket = self.begin_load_environments();
        let result = catalog.list_environments();
        match self.apply_environments(ticket, result) {
            Ok(next) => self.run_opt(catalog, next),
            Err(err) => FetchOutcome::Failed(err),
        }
    }

    pub fn select_environment(
        &mut self,
        catalog: &dyn RemoteCatalog,
        environment_id: &str,
    ) -> FetchOutcome {
        match self.set_environment(environment_id) {
            Ok(ticket) => self.run(catalog, ticket),
            Err(err) => FetchOutcome::Failed(err),
        }
    }

    pub fn fetch(
        &mut self,
        catalog: &dyn RemoteCatalog,
        environment_id: Option<&str>,
        offset: Option<usize>,
    ) -> FetchOutcome {
        let ticket = self.begin_fetch(environment_id, offset);
        self.run_opt(catalog, ticket)
    }

    pub fn run_search(&mut self, catalog: &dyn RemoteCatalog) -> FetchOutcome {
        let ticket = self.search();
        self.run_opt(catalog, ticket)
    }

    pub fn go_next(&mut self, catalog: &dyn RemoteCatalog) -> FetchOutcome {
        let ticket = self.next_page();
        self.run_opt(catalog, ticket)
    }

    pub fn go_previous(&mut self, catalog: &dyn RemoteCatalog) -> FetchOutcome {
        let ticket = self.previous_page();
        self.run_opt(catalog, ticket)
    }
}

#[cfg(test)]
#[path = "../tests/discovery/page_tests.rs"]
mod tests;
