use axum::Router;

pub mod health;
pub mod items;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().merge(items::router(state))
}

/// Creates a router with the /ready endpoint that checks the catalog read model.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, Config, Environment};
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use domain_catalog::InMemoryCatalog;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn state() -> AppState {
        let catalog = InMemoryCatalog::from_json_str(include_str!("../../data/catalog.json"))
            .expect("bundled catalog snapshot is valid");

        AppState {
            config: Config {
                app: app_info!(),
                server: ServerConfig {
                    public_url: Some("https://shop.example.com".to_string()),
                    ..ServerConfig::default()
                },
                catalog: CatalogConfig {
                    data_path: "data/catalog.json".into(),
                    assets_url: None,
                },
                environment: Environment::Development,
            },
            catalog,
        }
    }

    fn app() -> Router {
        let state = state();
        Router::new()
            .nest("/api", routes(&state))
            .merge(ready_router(state))
    }

    async fn get(uri: &str) -> axum::response::Response {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_items_links_use_public_base_url() {
        let response = get("/api/items?per-page=1").await;
        assert_eq!(response.status(), StatusCode::OK);

        let link = response.headers()["link"].to_str().unwrap().to_string();
        assert!(link.starts_with("<https://shop.example.com/api/items?page=1&per-page=1>; rel=self"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let href = body[0]["_links"]["self"]["href"].as_str().unwrap();
        assert!(href.starts_with("https://shop.example.com/api/items/"));
    }

    #[tokio::test]
    async fn test_ready_reports_catalog() {
        let response = get("/ready").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["catalog"], "connected");
    }
}
