//! The gateway-side inventory of discoverable applications.
//!
//! [`RemoteCatalog`] is the seam between the discovery coordinators and the
//! transport: [`crate::remote::RemoteClient`] speaks HTTP to a gateway
//! catalog, [`MemoryCatalog`] answers from an in-process fixture.

use crate::model::CatalogItem;

mod error;
mod memory;
mod types;

pub use self::error::CatalogError;
pub use self::memory::{CatalogFixture, MemoryCatalog};
pub use self::types::*;

pub trait RemoteCatalog {
    fn list_environments(&self) -> Result<EnvironmentList, CatalogError>;

    fn list_discovered_applications(
        &self,
        environment_id: &str,
        page: &PageRequest,
    ) -> Result<ApplicationPage, CatalogError>;

    fn get_discovered_application(
        &self,
        environment_id: &str,
        application_id: &str,
    ) -> Result<CatalogItem, CatalogError>;

    /// Fails with [`CatalogError::Conflict`] when the application was already imported.
    fn import_application(&self, request: &ImportRequest) -> Result<ImportResult, CatalogError>;
}
