use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

#[cfg(not(test))]
use {
    std::net::IpAddr,
    std::sync::Arc,
    tower_governor::{governor::GovernorConfigBuilder, key_extractor::KeyExtractor, GovernorLayer},
    tracing::warn,
};

use crate::api::handlers::{self as api_handlers, AppState};
use crate::config::Settings;

/// Create the router with all endpoints
#[cfg_attr(test, allow(unused_variables))]
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    // Public API routes - read-only, no authentication required
    #[cfg_attr(test, allow(unused_mut))]
    let mut api_routes = Router::new()
        .route("/recipes/search", get(api_handlers::search_recipes))
        .route("/recipes/:id", get(api_handlers::get_recipe))
        .route("/stats", get(api_handlers::get_stats))
        .with_state(state.clone());

    // Rate limiting only in non-test builds. The key extractor uses the peer IP
    // when axum provides one and falls back to 127.0.0.1 otherwise.
    #[cfg(not(test))]
    {
        #[derive(Clone, Copy, Debug)]
        struct FallbackIpKeyExtractor;

        impl KeyExtractor for FallbackIpKeyExtractor {
            type Key = IpAddr;

            fn extract<B>(
                &self,
                req: &axum::http::Request<B>,
            ) -> Result<Self::Key, tower_governor::GovernorError> {
                if let Some(axum::extract::ConnectInfo(addr)) = req
                    .extensions()
                    .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
                {
                    return Ok(addr.ip());
                }

                Ok(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)))
            }
        }

        match GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_second(settings.server.api_rate_limit)
            .burst_size(settings.server.api_rate_limit as u32 * 2)
            .finish()
        {
            Some(config) => {
                api_routes = api_routes.layer(GovernorLayer {
                    config: Arc::new(config),
                });
            }
            None => warn!("Invalid rate limit configuration, API rate limiting disabled"),
        }
    }

    let api_routes = api_routes;

    let health_routes = Router::new()
        .route("/health", get(api_handlers::health_check))
        .route("/ready", get(api_handlers::readiness_check))
        .with_state(state);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            // Whole-request deadline, answered with 408
            TimeoutLayer::new(Duration::from_secs(settings.server.request_timeout_seconds)),
        )
        .layer(RequestBodyLimitLayer::new(
            settings.server.max_request_body_size,
        ))
        .layer(
            // CORS - allow all origins for read-only public API
            CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::NewRecipe;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    // Helper to create test app state
    async fn create_test_state() -> AppState {
        let pool = sqlx::SqlitePool::connect("sqlite::memory:").await.unwrap();
        crate::db::run_migrations(&pool).await.unwrap();

        let settings = crate::config::Settings {
            database: crate::config::DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 5,
                min_connections: 2,
                connection_timeout_seconds: 30,
                idle_timeout_seconds: 600,
            },
            server: crate::config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                api_rate_limit: 100,
                request_timeout_seconds: 10,
                max_request_body_size: 1048576,
            },
            search: crate::config::SearchConfig::default(),
        };

        AppState::new(pool, settings)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_routes_exist() {
        let state = create_test_state().await;
        let app = create_router(state.clone(), &state.settings);

        let (status, body) = get_json(app.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = get_json(app, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], true);
    }

    #[tokio::test]
    async fn test_stats_and_recipe_detail() {
        let state = create_test_state().await;
        let recipe = crate::db::recipes::create_recipe(
            &state.pool,
            &NewRecipe {
                title: "Test Recipe".to_string(),
                ingredients: vec!["1 cup flour".to_string(), "2 eggs".to_string()],
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let app = create_router(state.clone(), &state.settings);

        let (status, body) = get_json(app.clone(), "/api/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_recipes"], 1);

        let (status, body) = get_json(app.clone(), &format!("/api/recipes/{}", recipe.id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Test Recipe");
        assert_eq!(body["ingredients"][0], "1 cup flour");
        assert_eq!(body["ingredient_names"][1], "eggs");

        let (status, body) = get_json(app, "/api/recipes/9999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Recipe 9999 not found");
    }

    #[tokio::test]
    async fn test_search_route_validates() {
        let state = create_test_state().await;
        let app = create_router(state.clone(), &state.settings);

        let (status, body) = get_json(app, "/api/recipes/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Ingredients parameter is required");
    }
}
