//! Application route configuration.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{appointment_handler, auth_handler, message_handler, user_handler};
use super::middleware::{require_admin, require_patient};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::{Config, API_PREFIX, MAX_UPLOAD_BYTES, UPLOADS_ROUTE};

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/user", user_routes(&state))
        .nest("/appointment", appointment_routes(&state))
        .nest("/message", message_routes(&state));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(API_PREFIX, api)
        // Stored doctor avatars
        .nest_service(UPLOADS_ROUTE, ServeDir::new(&state.config.upload_dir))
        // Global middleware
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn user_routes(state: &AppState) -> Router<AppState> {
    let admin = auth_handler::admin_routes()
        .merge(user_handler::admin_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let patient = auth_handler::patient_routes()
        .merge(user_handler::patient_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_patient));

    auth_handler::public_routes()
        .merge(user_handler::public_routes())
        .merge(admin)
        .merge(patient)
}

fn appointment_routes(state: &AppState) -> Router<AppState> {
    appointment_handler::admin_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .merge(
            appointment_handler::patient_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_patient)),
        )
}

fn message_routes(state: &AppState) -> Router<AppState> {
    message_handler::public_routes().merge(
        message_handler::admin_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
    )
}

/// Browsers send the session cookie cross-site, so origins are listed
/// explicitly and credentials allowed.
fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to the Hospital Management API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match &state.database {
        Some(db) => match db.ping().await {
            Ok(_) => ServiceStatus {
                status: "healthy",
                error: None,
            },
            Err(e) => ServiceStatus {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        },
        None => ServiceStatus {
            status: "not configured",
            error: None,
        },
    };

    let healthy = database.status != "unhealthy";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        database,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
