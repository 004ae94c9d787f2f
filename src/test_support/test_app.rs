use super::helpers::{AdminUsersResponder, TRACING};
use crate::configuration::get_configuration;
use crate::startup::Application;
use secrecy::Secret;
use std::sync::LazyLock;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

const E2E_SERVICE_ROLE_KEY: &str = "e2e-service-role-key";

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub admin_server: MockServer,
}

#[tracing::instrument(name = "Spawning e2e application", skip_all)]
pub async fn spawn_app(existing_emails: Vec<String>) -> Result<TestApp, anyhow::Error> {
    LazyLock::force(&TRACING);

    let admin_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(AdminUsersResponder::new(existing_emails))
        .mount(&admin_server)
        .await;

    let configuration = {
        let mut c = get_configuration()?;
        // Use a random OS port
        c.application.port = 0;
        c.admin_api.base_url = Some(admin_server.uri());
        c.admin_api.service_role_key = Some(Secret::new(E2E_SERVICE_ROLE_KEY.to_string()));
        c
    };

    let application = Application::build(configuration).await?;
    let port = application.port();
    let address = format!("http://127.0.0.1:{}", port);

    #[allow(clippy::let_underscore_future)]
    let _ = tokio::spawn(application.run_until_stopped());

    Ok(TestApp {
        address,
        port,
        admin_server,
    })
}
