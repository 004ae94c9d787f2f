//! Common constants used across route handlers

/// Path the existence check is served on
pub const CHECK_EMAIL_EXISTS_PATH: &str = "/check-email-exists";

/// Browsers may call the existence check from any origin
pub const CORS_ALLOW_ORIGIN: &str = "*";

/// Request headers the signup front-end sends along with the check
pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Methods the front-end may use against the check
pub const CORS_ALLOW_METHODS: &str = "POST, OPTIONS";

/// Body of the answer to a pre-flight request
pub const PREFLIGHT_BODY: &str = "ok";

/// Upper bound on the request body read before giving up on it as invalid JSON
pub const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;
