use axum::routing::get;
use axum::Router;

use crate::handlers::device;
use crate::state::AppState;

/// Device routes.
///
/// ```text
/// GET, POST          /api/devices
/// GET, PUT, DELETE   /api/devices/{id}
/// ```
///
/// POST and PUT bodies are checked by the validation middleware installed in
/// [`crate::router::build_app_router`].
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/devices",
            get(device::list_devices).post(device::create_device),
        )
        .route(
            "/api/devices/{id}",
            get(device::get_device)
                .put(device::update_device)
                .delete(device::delete_device),
        )
}
