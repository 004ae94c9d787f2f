use axum::http::StatusCode;

/// Liveness probe
///
/// Returns 200 OK as soon as the server accepts connections. It does not
/// reach out to the Identity Admin API.
#[utoipa::path(
    get,
    path = "/health_check",
    tag = "health",
    responses(
        (status = 200, description = "Service is up")
    )
)]
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
