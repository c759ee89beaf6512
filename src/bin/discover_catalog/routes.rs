//! Authenticated HTTP route registration for the catalog server.

use super::*;

pub(super) fn authed_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/environments", get(list_environments))
        .route(
            "/environments/:environment_id/discovered-applications",
            get(list_applications),
        )
        .route(
            "/environments/:environment_id/discovered-applications/:application_id",
            get(get_application),
        )
        .route("/discovered-applications/import", post(import_application))
        .layer(middleware::from_fn_with_state(state, require_bearer))
}
