use axum::Router;
use axum::http::{HeaderValue, header};
use axum::routing::{any, get};
use std::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::configuration::Settings;
use crate::identity_admin_client::IdentityAdminClient;
use crate::routes::constants::{
    CHECK_EMAIL_EXISTS_PATH, CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS, CORS_ALLOW_ORIGIN,
};
use crate::routes::{check_email_exists, health_check};

#[derive(Clone)]
pub struct AppState {
    /// `None` when the admin API coordinates are not configured
    pub admin_client: Option<IdentityAdminClient>,
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let admin_client = configuration.admin_api.client();
        if admin_client.is_none() {
            tracing::warn!(
                "Identity Admin API base URL or service role key is missing, \
                every existence check will fail until both are provided"
            );
        }
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        listener.set_nonblocking(true)?;
        let port = listener.local_addr()?.port();
        let router = build_router(AppState { admin_client });

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        let listener = tokio::net::TcpListener::from_std(self.listener)?;
        axum::serve(listener, self.router).await
    }
}

pub fn build_router(app_state: AppState) -> Router {
    // Every answer of the check, including pre-flight and error responses,
    // carries the cross-origin headers.
    let check_email_router = Router::new()
        .route(CHECK_EMAIL_EXISTS_PATH, any(check_email_exists))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(CORS_ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ));

    Router::new()
        .route("/health_check", get(health_check))
        .merge(check_email_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
