use crate::models::{PushQueryResponse, RegistrationPayload};
use utoipa::OpenApi;

/// OpenAPI documentation for the PassKit web service endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::register_device_handler,
        crate::handlers::list_updated_handler,
        crate::handlers::deregister_device_handler,
        crate::handlers::get_pass_handler,
        crate::handlers::log_handler,
        crate::handlers::redirect_legacy_handler,
    ),
    components(schemas(RegistrationPayload, PushQueryResponse)),
    tags((name = "PassKit", description = "Apple Wallet web service endpoints"))
)]
pub struct PassesApiDoc;
