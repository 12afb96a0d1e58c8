use crate::config::Config;
use crate::services::account_service::{AccountService, Argon2Hasher};
use crate::services::message_service::MessageService;
use crate::services::token_service::TokenService;
use crate::storage::message_repo::MessageRepository;
use crate::storage::user_repo::UserRepository;
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, header};
use axum::{
    Router,
    routing::{get, post},
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod health;
pub mod messages;
pub mod middleware;
pub mod schemas;

#[derive(Clone, Debug)]
pub struct AppState {
    pub account_service: AccountService,
    pub token_service: TokenService,
    pub message_service: MessageService,
}

/// Configures and returns the application router.
///
/// # Panics
/// Panics if the configured CORS origin is not a valid header value.
pub fn app_router(config: Config, pool: PgPool) -> Router {
    let state = AppState {
        account_service: AccountService::new(UserRepository::new(pool.clone()), Arc::new(Argon2Hasher)),
        token_service: TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_secs),
        message_service: MessageService::new(MessageRepository::new(pool)),
    };

    let cors = CorsLayer::new()
        .allow_origin(
            config.server.cors_origin.parse::<HeaderValue>().expect("Invalid CORS origin"),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health::health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route(
            "/messages",
            post(messages::send)
                .get(messages::list)
                .put(messages::bulk_update)
                .delete(messages::bulk_delete),
        )
        .layer(cors)
        .layer(PropagateRequestIdLayer::new(axum::http::HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<tower_http::request_id::RequestId>()
                        .map(|id| id.header_value().to_str().unwrap_or_default())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                        let status = response.status();
                        tracing::Span::current().record("http.response.status_code", status.as_u16());

                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %status.as_u16(),
                            "request completed"
                        );
                    },
                )
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(SetRequestIdLayer::new(
            axum::http::HeaderName::from_static("x-request-id"),
            MakeRequestUuid,
        ))
        .with_state(state)
}
