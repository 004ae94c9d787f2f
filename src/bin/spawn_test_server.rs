// This binary is used by front-end E2E tests to spawn a backend whose
// Identity Admin API is mocked.
// Build with: cargo build --bin spawn_test_server --features e2e-tests --release

#[cfg(feature = "e2e-tests")]
use check_email_exists::test_support::spawn_app;
#[cfg(feature = "e2e-tests")]
use std::io::{self, Write};

#[cfg(feature = "e2e-tests")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Accounts the mock admin API should report as existing, comma-separated
    let existing_emails: Vec<String> = std::env::var("E2E_EXISTING_EMAILS")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(String::from)
        .collect();

    let app = spawn_app(existing_emails).await?;

    // Output the port and address as JSON to stdout
    let output = serde_json::json!({
        "port": app.port,
        "address": app.address,
        "admin_api": app.admin_server.uri()
    });

    println!("{}", serde_json::to_string(&output)?);
    io::stdout().flush()?;

    // Keep the server running until we receive a signal
    // This allows the calling test runner to control the lifecycle
    tokio::signal::ctrl_c().await?;

    Ok(())
}

#[cfg(not(feature = "e2e-tests"))]
fn main() {
    eprintln!("This binary requires the 'e2e-tests' feature to be enabled.");
    eprintln!("Build with: cargo build --bin spawn_test_server --features e2e-tests --release");
    std::process::exit(1);
}
