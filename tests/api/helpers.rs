use check_email_exists::configuration::{Settings, get_configuration};
use check_email_exists::startup::Application;
use check_email_exists::telemetry::{get_subscriber, init_subscriber};
use fake::{Fake, Faker};
use secrecy::Secret;
use std::sync::LazyLock;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Ensure that the `tracing` stack is only initialised once using `LazyLock`
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // We cannot assign the output of `get_subscriber` to a variable based on the
    // value TEST_LOG` because the sink is part of the type returned by
    // `get_subscriber`, therefore they are not the same type.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub admin_server: MockServer,
    pub service_role_key: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub fn check_email_url(&self) -> String {
        format!("{}/check-email-exists", &self.address)
    }

    pub async fn post_check_email<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(self.check_email_url())
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_check_email_raw(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(self.check_email_url())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn options_check_email(&self) -> reqwest::Response {
        self.api_client
            .request(reqwest::Method::OPTIONS, self.check_email_url())
            .header("Origin", "http://localhost:5173")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Make the admin API answer every listing with `body`.
    pub async fn mount_admin_users(&self, body: serde_json::Value) {
        Mock::given(path("/auth/v1/admin/users"))
            .and(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .named("Admin users listing")
            .mount(&self.admin_server)
            .await;
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Spawn the application against a fresh mock admin API, letting the caller
/// adjust the configuration before the server is built.
pub async fn spawn_app_with<F>(customise: F) -> TestApp
where
    F: FnOnce(&mut Settings),
{
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    LazyLock::force(&TRACING);

    // Launch a mock server to stand in for the Identity Admin API
    let admin_server = MockServer::start().await;
    let service_role_key: String = Faker.fake();

    // Randomise configuration to ensure test isolation
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Use a random OS port
        c.application.port = 0;
        c.admin_api.base_url = Some(admin_server.uri());
        c.admin_api.service_role_key = Some(Secret::new(service_role_key.clone()));
        customise(&mut c);
        c
    };

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());

    #[allow(clippy::let_underscore_future)]
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        admin_server,
        service_role_key,
        api_client: reqwest::Client::new(),
    }
}

pub fn assert_cross_origin_headers(response: &reqwest::Response) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-headers"],
        "authorization, x-client-info, apikey, content-type"
    );
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
}

pub fn assert_json_content_type(response: &reqwest::Response) {
    assert_eq!(response.headers()["content-type"], "application/json");
}
