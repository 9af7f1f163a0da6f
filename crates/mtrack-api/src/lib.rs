//! mtrack API /v1: REST endpoints over the inspection engine
//!
//! The adapter performs no backend calls. Callers post the payloads they
//! already fetched and get engine verdicts back.
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};

pub use config::ServerConfig;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handlers::health))
        .route("/v1/shift", get(handlers::shift))
        .route("/v1/tolerance/evaluate", post(handlers::evaluate_tolerance))
        .route("/v1/checklist/readiness", post(handlers::checklist_readiness))
        .route("/v1/parameters/evaluate", post(handlers::evaluate_parameters))
        .route("/v1/validate/machine", post(handlers::validate_machine))
        .route("/v1/validate/downtime", post(handlers::validate_downtime))
        .route("/v1/validate/employee", post(handlers::validate_employee))
        .route("/v1/submissions/daily", post(handlers::submit_daily))
        .route("/v1/submissions/parameters", post(handlers::submit_parameters))
        .route("/v1/submissions/downtime", post(handlers::submit_downtime))
        .route("/v1/report/periods", post(handlers::report_periods))
        .route("/v1/report/build", post(handlers::build_report))
        .route("/v1/report/render", post(handlers::render_report))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::cors())
        .layer(middleware::trace())
        .with_state(state)
}

pub async fn run(addr: std::net::SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("mtrack API listening on {}", addr);
    axum::serve(listener, app).await
}
