pub mod api_doc;
pub mod configuration;
pub mod domain;
pub mod identity_admin_client;
pub mod routes;
pub mod startup;
pub mod telemetry;

// Test support utilities only available with e2e-tests feature
#[cfg(feature = "e2e-tests")]
pub mod test_support;
