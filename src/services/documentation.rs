use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the coordination service.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::internal::restart_timers,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::internal::RecoveryResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "internal", description = "Operator endpoints driving cross-service recovery"),
    )
)]
pub struct ApiDoc;
