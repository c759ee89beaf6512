//! Development gateway catalog serving discovered applications from a JSON
//! fixture over the same REST surface the `discover` client speaks.

use std::sync::Arc;

use axum::extract::{Extension, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use discover::catalog::{CatalogError, MemoryCatalog, RemoteCatalog};

#[path = "discover_catalog/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "discover_catalog/handlers.rs"]
mod handlers;
use self::handlers::*;
#[path = "discover_catalog/routes.rs"]
mod routes;
#[path = "discover_catalog/runtime.rs"]
mod runtime;

#[derive(Clone, Debug)]
struct Subject {
    can_import: bool,
}

struct AppState {
    catalog: MemoryCatalog,
    token: String,
    read_only_token: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
