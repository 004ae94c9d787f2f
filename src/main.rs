use check_email_exists::configuration::get_configuration;
use check_email_exists::startup::Application;
use check_email_exists::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber(
        "check-email-exists".into(),
        "info".into(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let configuration = get_configuration()?;
    let application = Application::build(configuration).await?;
    tracing::info!("Listening on port {}", application.port());
    application.run_until_stopped().await?;
    Ok(())
}
