#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unauthorized (token invalid/expired; run `discover remote set --url ... --token ...`)")]
    Unauthorized,

    #[error("forbidden (insufficient permissions on the gateway catalog)")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("{context}: unexpected status {status}: {message}")]
    Status {
        context: String,
        status: u16,
        message: String,
    },

    #[error("invalid remote url {0}")]
    InvalidUrl(String),

    #[error("{context}")]
    Http {
        context: String,
        #[source]
        source: reqwest::Error,
    },
}

impl CatalogError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, CatalogError::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }

    /// HTTP status a server should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::Unauthorized => 401,
            CatalogError::Forbidden => 403,
            CatalogError::NotFound(_) => 404,
            CatalogError::Conflict(_) => 409,
            CatalogError::BadRequest(_) => 400,
            CatalogError::Status { status, .. } => *status,
            CatalogError::InvalidUrl(_) => 500,
            CatalogError::Http { .. } => 502,
        }
    }
}
