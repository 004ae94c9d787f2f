use crate::domain::CandidateEmail;
use crate::identity_admin_client::AdminApiError;
use crate::routes::constants::{MAX_REQUEST_BODY_BYTES, PREFLIGHT_BODY};
use crate::startup::AppState;
use crate::telemetry::error_chain_fmt;
use axum::Json;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

/// Documented shape of the request body. The handler reads the body as
/// loose JSON so that only syntax errors are rejected.
#[derive(utoipa::ToSchema)]
pub struct CheckEmailPayload {
    /// Address to look up. Absent, null or blank means "does not exist".
    pub email: Option<String>,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct CheckEmailResponse {
    pub exists: bool,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(thiserror::Error)]
pub enum CheckEmailError {
    #[error("Missing Supabase env config.")]
    MissingConfiguration,
    #[error("Invalid JSON.")]
    InvalidJson,
    #[error("Admin API error {0}")]
    AdminApi(u16),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for CheckEmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<AdminApiError> for CheckEmailError {
    fn from(e: AdminApiError) -> Self {
        match e {
            AdminApiError::UnexpectedStatus { status, .. } => Self::AdminApi(status.as_u16()),
            other => Self::UnexpectedError(other.into()),
        }
    }
}

impl IntoResponse for CheckEmailError {
    fn into_response(self) -> Response {
        let status = match self {
            CheckEmailError::InvalidJson => StatusCode::BAD_REQUEST,
            CheckEmailError::MissingConfiguration
            | CheckEmailError::AdminApi(_)
            | CheckEmailError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Check whether an account exists
///
/// Looks the email up through the Identity Admin API and answers with a
/// single flag. A request without a usable email is answered with
/// `exists: false` without contacting the admin API.
#[utoipa::path(
    post,
    path = "/check-email-exists",
    tag = "accounts",
    request_body = CheckEmailPayload,
    responses(
        (status = 200, description = "Lookup completed", body = CheckEmailResponse),
        (status = 400, description = "Body is not valid JSON", body = ErrorResponse),
        (status = 500, description = "Missing configuration, admin API failure or unexpected error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    name = "Checking whether an account exists",
    skip(state, request),
    fields(method = %request.method(), email = tracing::field::Empty)
)]
pub async fn check_email_exists(State(state): State<AppState>, request: Request) -> Response {
    if request.method() == Method::OPTIONS {
        return Response::new(Body::from(PREFLIGHT_BODY));
    }

    match check(&state, request).await {
        Ok(exists) => Json(CheckEmailResponse { exists }).into_response(),
        Err(e) => {
            match &e {
                CheckEmailError::InvalidJson => {}
                // Status and body were logged where the response was read
                CheckEmailError::AdminApi(_) => {}
                CheckEmailError::MissingConfiguration | CheckEmailError::UnexpectedError(_) => {
                    tracing::error!("Failed to check whether the account exists: {:?}", e);
                }
            }
            e.into_response()
        }
    }
}

async fn check(state: &AppState, request: Request) -> Result<bool, CheckEmailError> {
    let admin_client = state
        .admin_client
        .as_ref()
        .ok_or(CheckEmailError::MissingConfiguration)?;

    let body = axum::body::to_bytes(request.into_body(), MAX_REQUEST_BODY_BYTES)
        .await
        .map_err(invalid_json)?;
    let payload: Value = serde_json::from_slice(&body).map_err(invalid_json)?;

    let Some(email) = requested_email(&payload)? else {
        return Ok(false);
    };
    tracing::Span::current().record("email", tracing::field::display(&email));

    let listing = admin_client.list_users(&email).await?;
    Ok(listing.contains(&email))
}

/// Reads `email` out of a parsed body.
///
/// Documents that are not objects carry no `email` and yield `None`, as does
/// an absent, null or blank `email`. A `null` document or a non-string
/// `email` cannot be read at all.
fn requested_email(payload: &Value) -> Result<Option<CandidateEmail>, CheckEmailError> {
    let email = match payload {
        Value::Null => {
            return Err(anyhow::anyhow!("Cannot read `email` from a null request body").into());
        }
        Value::Object(fields) => fields.get("email"),
        _ => None,
    };
    match email {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(email)) => Ok(CandidateEmail::parse(Some(email))),
        Some(other) => {
            Err(anyhow::anyhow!("`email` must be a string, got `{}`", other).into())
        }
    }
}

fn invalid_json<E>(e: E) -> CheckEmailError
where
    E: std::fmt::Display,
{
    tracing::warn!("Rejecting request body: {}", e);
    CheckEmailError::InvalidJson
}
