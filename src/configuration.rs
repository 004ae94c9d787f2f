use crate::identity_admin_client::IdentityAdminClient;
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

/// Variables the hosting runtime uses to hand the admin API coordinates to a function.
const RUNTIME_BASE_URL_VAR: &str = "SUPABASE_URL";
const RUNTIME_SERVICE_ROLE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub admin_api: AdminApiSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

/// Coordinates of the Identity Admin API.
///
/// Both values are optional: a server without them still starts, but answers
/// every existence check with a configuration error.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct AdminApiSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub service_role_key: Option<Secret<String>>,
}

impl AdminApiSettings {
    /// Returns `None` if either value is absent or blank.
    pub fn client(&self) -> Option<IdentityAdminClient> {
        let base_url = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())?;
        let service_role_key = self
            .service_role_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())?;
        Some(IdentityAdminClient::new(
            base_url.to_string(),
            service_role_key.clone(),
        ))
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_APPLICATION__PORT=5001 would set `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("admin_api.base_url", std::env::var(RUNTIME_BASE_URL_VAR).ok())?
        .set_override_option(
            "admin_api.service_role_key",
            std::env::var(RUNTIME_SERVICE_ROLE_KEY_VAR).ok(),
        )?
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// The possible runtime environment for our application.
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
