use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use passhub_common::logging;
use passhub_config::load_config;
use passhub_db::{
    DbClient, DbClientFactory, PushAssociationRepository, PushAssociationRepositoryFactory,
    RepositoryFactory,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[axum::debug_handler]
async fn health_handler(State(db): State<DbClient>) -> (StatusCode, &'static str) {
    if db.is_healthy().await {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "database unreachable")
    }
}

#[tokio::main]
async fn main() {
    logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));

    let db_client = DbClientFactory::new()
        .from_app_config(&config)
        .await
        .expect("Failed to connect to database");
    let repository = PushAssociationRepositoryFactory::new().create_repository(db_client.clone());
    repository
        .init_schema()
        .await
        .expect("Failed to initialize database schema");
    let repository: Arc<dyn PushAssociationRepository> = Arc::new(repository);

    let health_router = Router::new()
        .route("/health", get(health_handler))
        .with_state(db_client);

    #[allow(unused_mut)] // with the openapi feature it needs to be mutable
    let mut app = passhub_passes::routes(config.clone(), repository)
        .merge(health_router)
        .layer(TraceLayer::new_for_http());

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use passhub_passes::doc::PassesApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        info!("Adding Swagger UI at /docs");
        let swagger_ui = SwaggerUi::new("/docs").url("/docs/openapi.json", PassesApiDoc::openapi());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!(
        "Serving pass type {} at http://{}",
        config.passes.pass_type_identifier, addr
    );

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
