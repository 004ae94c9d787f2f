//! Backend for front-end e2e suites: the application wired to a mock
//! Identity Admin API that knows a fixed set of accounts.

mod helpers;
mod test_app;

pub use helpers::{AdminUsersResponder, TRACING};
pub use test_app::{TestApp, spawn_app};
