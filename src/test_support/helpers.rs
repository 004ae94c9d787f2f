use crate::telemetry::{get_subscriber, init_subscriber};
use std::sync::LazyLock;
use wiremock::{Request, Respond, ResponseTemplate};

// Ensure that the `tracing` stack is only initialised once using `LazyLock`
pub static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    let loglevel = std::env::var("LOGLEVEL").unwrap_or(default_filter_level);

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, loglevel, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, loglevel, std::io::sink);
        init_subscriber(subscriber);
    }
});

/// Answers admin user listings the way the real API does: every known
/// account whose email contains the `filter` query parameter is returned,
/// wrapped in a `users` array.
pub struct AdminUsersResponder {
    emails: Vec<String>,
}

impl AdminUsersResponder {
    pub fn new(emails: Vec<String>) -> Self {
        Self { emails }
    }
}

impl Respond for AdminUsersResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let filter = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "filter")
            .map(|(_, value)| value.to_lowercase())
            .unwrap_or_default();
        let users: Vec<serde_json::Value> = self
            .emails
            .iter()
            .filter(|email| email.to_lowercase().contains(&filter))
            .map(|email| serde_json::json!({ "email": email }))
            .collect();
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "users": users }))
    }
}
