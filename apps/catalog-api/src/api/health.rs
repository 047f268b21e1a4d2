//! Readiness check backed by the catalog read model.

use crate::state::AppState;
use axum::{extract::State, response::Response};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "catalog",
        Box::pin(async {
            state
                .catalog
                .ping()
                .await
                .map(|products| tracing::debug!(products, "Catalog answered readiness check"))
                .map_err(|e| format!("Catalog ping failed: {}", e))
        }),
    )];

    run_health_checks(checks).await
}
