use crate::files::PassFileResolver;
use crate::handlers::{
    deregister_device_handler, get_pass_handler, list_updated_handler, log_handler,
    redirect_legacy_handler, register_device_handler, PassesState,
};
use axum::routing::{get, post};
use axum::Router;
use passhub_config::AppConfig;
use passhub_db::PushAssociationRepository;
use std::sync::Arc;

/// Build the PassKit web service router.
///
/// The pass file directory comes from the configuration; the association
/// store is whatever repository the caller hands in.
pub fn routes(config: Arc<AppConfig>, repo: Arc<dyn PushAssociationRepository>) -> Router {
    let resolver = PassFileResolver::new(config.passes.directory.clone());
    let state = Arc::new(PassesState {
        config,
        repo,
        resolver,
    });

    Router::new()
        .route(
            "/v1/devices/{device_id}/registrations/{pass_type}/{pass_id}",
            post(register_device_handler).delete(deregister_device_handler),
        )
        .route(
            "/v1/devices/{device_id}/registrations/{pass_type}",
            get(list_updated_handler),
        )
        .route(
            "/v1/passes/{pass_type}/{serial_number}",
            get(get_pass_handler),
        )
        .route("/v1/log", post(log_handler))
        .route("/{serial_number}", get(redirect_legacy_handler))
        .with_state(state)
}
