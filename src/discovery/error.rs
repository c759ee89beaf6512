use crate::catalog::CatalogError;

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("invalid gateway environment {0:?}")]
    InvalidEnvironment(String),

    #[error("error loading gateway environments: {0}")]
    Environments(#[source] CatalogError),

    #[error("error loading discovered applications: {0}")]
    Fetch(#[source] CatalogError),

    #[error("discovered application {application_id} not found in {environment_id}")]
    NotFound {
        environment_id: String,
        application_id: String,
    },

    #[error("error loading application details: {0}")]
    Detail(#[source] CatalogError),

    #[error("no application loaded to import")]
    NothingToImport,

    #[error("application {0} is already imported")]
    AlreadyImported(String),

    #[error("import of {0} is already in progress")]
    ImportInProgress(String),
}
