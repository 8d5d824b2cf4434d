use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

/// Path the Swagger UI is mounted under.
const UI_PATH: &str = "/docs";
/// Path serving the raw OpenAPI document.
const OPENAPI_PATH: &str = "/api-doc/openapi.json";

/// Serve the generated OpenAPI document together with its Swagger UI.
pub fn router() -> Router<SharedState> {
    SwaggerUi::new(UI_PATH)
        .url(OPENAPI_PATH, ApiDoc::openapi())
        .into()
}
