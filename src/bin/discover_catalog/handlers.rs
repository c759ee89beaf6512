use axum::extract::rejection::JsonRejection;
use discover::catalog::{ImportRequest, PageRequest};

use super::*;

const DEFAULT_LIMIT: usize = 25;

pub(super) async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"ok": true}))
}

pub(super) async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized();
    };
    let Ok(value) = value.to_str() else {
        return unauthorized();
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return unauthorized();
    };

    let subject = if token == state.token {
        Subject { can_import: true }
    } else if state.read_only_token.as_deref() == Some(token) {
        Subject { can_import: false }
    } else {
        return unauthorized();
    };

    req.extensions_mut().insert(subject);
    next.run(req).await
}

pub(super) async fn list_environments(State(state): State<Arc<AppState>>) -> Response {
    match state.catalog.list_environments() {
        Ok(list) => Json(list).into_response(),
        Err(err) => catalog_error(err),
    }
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct ListParams {
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    offset: Option<usize>,
    #[serde(default)]
    query: Option<String>,
}

pub(super) async fn list_applications(
    State(state): State<Arc<AppState>>,
    Path(environment_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let page = PageRequest {
        limit: params.limit.unwrap_or(DEFAULT_LIMIT),
        offset: params.offset.unwrap_or(0),
        query: params.query.unwrap_or_default(),
    };
    match state
        .catalog
        .list_discovered_applications(&environment_id, &page)
    {
        Ok(resp) => Json(resp).into_response(),
        Err(err) => catalog_error(err),
    }
}

pub(super) async fn get_application(
    State(state): State<Arc<AppState>>,
    Path((environment_id, application_id)): Path<(String, String)>,
) -> Response {
    match state
        .catalog
        .get_discovered_application(&environment_id, &application_id)
    {
        Ok(item) => Json(item).into_response(),
        Err(err) => catalog_error(err),
    }
}

pub(super) async fn import_application(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    body: Result<Json<ImportRequest>, JsonRejection>,
) -> Response {
    if !subject.can_import {
        return forbidden();
    }
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };

    match state.catalog.import_application(&request) {
        Ok(result) => {
            tracing::info!(
                environment = %request.environment_id,
                application = ?result.application_id,
                "application imported"
            );
            (StatusCode::CREATED, Json(result)).into_response()
        }
        Err(err) => catalog_error(err),
    }
}
