//! OpenAPI document served alongside Swagger UI.
//!
//! Only the operations listed in `paths(...)` are exposed; each handler still
//! needs its own `#[utoipa::path(...)]` attribute.

use utoipa::OpenApi;

use crate::routes::check_email_exists::{
    self, CheckEmailPayload, CheckEmailResponse, ErrorResponse,
};
use crate::routes::health_check;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check::health_check,
        check_email_exists::check_email_exists,
    ),
    components(schemas(CheckEmailPayload, CheckEmailResponse, ErrorResponse)),
    tags(
        (name = "accounts", description = "Account existence lookups for signup flows"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
