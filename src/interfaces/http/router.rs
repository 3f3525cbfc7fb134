//! API Router with Swagger UI
//!
//! Routes are nested under `/api/v0/users` to match the public API
//! contract. `/metrics` is only mounted when a Prometheus recorder
//! handle is supplied, so test routers skip it.

use axum::{middleware, routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::modules::accounts::dto::{
    AccountDto, AuthResponse, AuthenticateRequest, ErrorBody, RegisterRequest,
    ResetPasswordRequest, UpdateRequest,
};
use super::modules::accounts::handlers::{self as accounts, AccountsState};
use super::modules::health::handlers::{self as health, HealthResponse, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Accounts
        accounts::list_accounts,
        accounts::register,
        accounts::authenticate,
        accounts::find_account,
        accounts::forgot_password,
        accounts::reset_password,
        accounts::update_account,
        accounts::delete_account,
    ),
    components(schemas(
        AccountDto,
        RegisterRequest,
        UpdateRequest,
        AuthenticateRequest,
        ResetPasswordRequest,
        AuthResponse,
        ErrorBody,
        HealthResponse,
    )),
    tags(
        (name = "Accounts", description = "Account lifecycle and credential recovery"),
        (name = "Health", description = "Service health"),
    )
)]
struct ApiDoc;

/// Build the application router.
pub fn create_router(
    accounts_state: AccountsState,
    health_state: HealthState,
    metrics_state: Option<MetricsState>,
) -> Router {
    let account_routes = Router::new()
        .route("/", get(accounts::list_accounts))
        .route("/register", post(accounts::register))
        .route("/authenticate", post(accounts::authenticate))
        .route(
            "/forgotPassword/{user_name_or_email}",
            get(accounts::forgot_password),
        )
        .route("/resetPassword", post(accounts::reset_password))
        .route(
            "/{user_name_or_email}",
            get(accounts::find_account)
                .put(accounts::update_account)
                .delete(accounts::delete_account),
        )
        .with_state(accounts_state);

    let health_routes = Router::new()
        .route("/healthcheck", get(health::health_check))
        .with_state(health_state);

    let users = Router::new().merge(account_routes).merge(health_routes);

    let mut app = Router::new()
        .nest("/api/v0/users", users)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(state) = metrics_state {
        app = app.route("/metrics", get(prometheus_metrics).with_state(state));
    }

    app.layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
