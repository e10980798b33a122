use axum::http::{header, HeaderValue};
use axum::routing::{get, MethodRouter};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_url_handler, fallback_handler, health_handler, method_not_allowed_handler,
    preflight_handler, resolve_url_handler, welcome_handler,
};
use crate::state::AppState;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET,POST,OPTIONS";
pub const CORS_ALLOW_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";
pub const CORS_ALLOW_CREDENTIALS: &str = "true";

pub struct App {}

impl App {
    /// Builds the gateway router.
    ///
    /// `POST` on any path is a create request; whether the path is the
    /// configured creation path is for the lifecycle to decide. `GET` on any
    /// path other than `/` and `/health` is a redirect lookup. Every response
    /// carries the CORS headers.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", with_preflight(get(welcome_handler).post(create_url_handler)))
            .route("/health", with_preflight(get(health_handler)))
            .route(
                "/{id}",
                with_preflight(get(resolve_url_handler).post(create_url_handler)),
            )
            .fallback(fallback_handler)
            .layer(TraceLayer::new_for_http())
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static(CORS_ALLOW_ORIGIN),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(CORS_ALLOW_METHODS),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(CORS_ALLOW_HEADERS),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static(CORS_ALLOW_CREDENTIALS),
            ))
            .with_state(state)
    }
}

fn with_preflight(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route
        .options(preflight_handler)
        .fallback(method_not_allowed_handler)
}
