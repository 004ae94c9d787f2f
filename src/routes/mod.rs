pub mod check_email_exists; // Public for OpenAPI annotations
pub mod constants;
pub mod health_check; // Public for OpenAPI annotations

pub use check_email_exists::*;
pub use health_check::*;
