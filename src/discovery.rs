//! Page, selection and import state for browsing a gateway catalog.
//!
//! Coordinators are plain state machines owned by one thread. Every catalog
//! call is split into a `begin_*` step that hands out a ticket and an
//! `apply`/`finish` step that takes the ticket back with the result. Results
//! whose ticket has been superseded are discarded, so the last request issued
//! wins regardless of the order responses arrive in. The `fetch`/`import_*`
//! helpers run both steps inline against a
//! [`RemoteCatalog`](crate::catalog::RemoteCatalog).

mod detail;
mod error;
mod import;
mod page;
mod selection;

pub use self::detail::{DetailState, DetailTicket};
pub use self::error::DiscoveryError;
pub use self::import::{ImportBatch, ImportCoordinator, ImportOutcome, ImportState, ImportTicket};
pub use self::page::{
    EnvironmentsTicket, FetchOutcome, FetchTicket, Page, PageCoordinator, PageResult, Query,
};
pub use self::selection::SelectionSet;

#[cfg(test)]
#[path = "tests/discovery/support.rs"]
mod test_support;
