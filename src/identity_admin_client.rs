use crate::domain::CandidateEmail;
use crate::telemetry::error_chain_fmt;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

const ADMIN_USERS_PATH: &str = "/auth/v1/admin/users";
// A single page is requested. Accounts past the first page are not seen.
const FIRST_PAGE: u32 = 1;
const PAGE_SIZE: u32 = 50;

/// Client for the privileged user-listing endpoint of the identity provider.
#[derive(Clone, Debug)]
pub struct IdentityAdminClient {
    base_url: String,
    http_client: Client,
    service_role_key: Secret<String>,
}

#[derive(serde::Serialize)]
struct ListUsersQuery<'a> {
    filter: &'a str,
    page: u32,
    per_page: u32,
}

/// Body of a successful listing.
///
/// Depending on its version the admin API answers with a bare array of users
/// or with an object carrying a `users` array. Anything else is treated as an
/// empty listing. Entries are kept as raw JSON so that one record without a
/// readable `email` does not hide the others.
#[derive(serde::Deserialize, Debug)]
#[serde(untagged)]
pub enum ListUsersResponse {
    Bare(Vec<serde_json::Value>),
    Wrapped { users: Vec<serde_json::Value> },
    Unrecognised(serde::de::IgnoredAny),
}

impl ListUsersResponse {
    pub fn users(&self) -> &[serde_json::Value] {
        match self {
            ListUsersResponse::Bare(users) | ListUsersResponse::Wrapped { users } => users,
            ListUsersResponse::Unrecognised(_) => &[],
        }
    }

    /// Emails of the listed users. Entries that are not objects with a
    /// string `email` are skipped.
    pub fn emails(&self) -> impl Iterator<Item = &str> {
        self.users()
            .iter()
            .filter_map(|user| user.get("email"))
            .filter_map(serde_json::Value::as_str)
    }

    /// Whether any listed user carries `email`, ignoring case.
    pub fn contains(&self, email: &CandidateEmail) -> bool {
        self.emails().any(|listed| email.matches(listed))
    }
}

#[derive(thiserror::Error)]
pub enum AdminApiError {
    #[error("Admin API responded with status {status}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

impl std::fmt::Debug for AdminApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl IdentityAdminClient {
    pub fn new(base_url: String, service_role_key: Secret<String>) -> Self {
        Self {
            base_url,
            http_client: Client::new(),
            service_role_key,
        }
    }

    #[tracing::instrument(name = "Listing users matching an email", skip(self))]
    pub async fn list_users(
        &self,
        email: &CandidateEmail,
    ) -> Result<ListUsersResponse, AdminApiError> {
        let url = format!("{}{}", self.base_url, ADMIN_USERS_PATH);
        let service_role_key = self.service_role_key.expose_secret();
        let response = self
            .http_client
            .get(&url)
            .query(&ListUsersQuery {
                filter: email.as_ref(),
                page: FIRST_PAGE,
                per_page: PAGE_SIZE,
            })
            .bearer_auth(service_role_key)
            .header("apikey", service_role_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!(%status, %body, "Admin users fetch failed");
            return Err(AdminApiError::UnexpectedStatus { status, body });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("Failed to parse admin users listing: {:?}", e);
            AdminApiError::Decode(e)
        })
    }
}
